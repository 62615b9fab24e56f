#![allow(clippy::must_use_candidate)]

mod loader;
pub mod resolver;
mod status;

use serde::Deserialize;

pub use resolver::*;

/// Top-level httperr configuration
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Status resolution configuration
    #[serde(default)]
    pub resolver: ResolverConfig,
}
