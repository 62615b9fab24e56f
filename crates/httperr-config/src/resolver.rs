use http::StatusCode;
use serde::Deserialize;

/// Status resolution configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Status returned when nothing in the error chain classifies it
    #[serde(default = "default_fallback", deserialize_with = "crate::status::deserialize")]
    pub fallback: StatusCode,
    /// Well-known sentinel errors to recognise
    #[serde(default)]
    pub sentinels: SentinelConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            sentinels: SentinelConfig::default(),
        }
    }
}

/// Toggles for the built-in sentinel table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentinelConfig {
    /// Map a data-access "no rows" error to `404 Not Found`
    #[serde(default = "default_true")]
    pub row_not_found: bool,
    /// Map `std::io::ErrorKind::NotFound` to `404 Not Found`
    #[serde(default)]
    pub io_not_found: bool,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            row_not_found: true,
            io_not_found: false,
        }
    }
}

const fn default_fallback() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

const fn default_true() -> bool {
    true
}
