#![allow(dead_code)]

pub mod errors;

use std::error::Error;

/// Route `tracing` output through the test writer, once per binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Box an error for mixing types in a join
pub fn boxed(err: impl Error + Send + Sync + 'static) -> httperr_core::BoxError {
    Box::new(err)
}
