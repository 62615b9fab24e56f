use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, TOML parsing fails,
    /// or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::from_toml_str(&raw)?;

        tracing::debug!(config_path = %path.display(), "loaded httperr configuration");

        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if TOML parsing or validation fails
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback status is not an error status
    pub fn validate(&self) -> anyhow::Result<()> {
        let fallback = self.resolver.fallback;

        if !fallback.is_client_error() && !fallback.is_server_error() {
            anyhow::bail!("resolver.fallback must be a 4xx or 5xx status, got {}", fallback.as_u16());
        }

        Ok(())
    }
}
