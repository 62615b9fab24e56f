//! Classify errors by HTTP status
//!
//! Attach a status to an error with [`StatusEnvelope`], then recover it from
//! any error chain with [`http_status`].

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod chain;
mod envelope;
mod error;
pub mod grpc;
mod join;
mod resolver;
mod sentinel;

use std::error::Error;
use std::sync::OnceLock;

pub use envelope::{Attribute, BoxError, Message, StatusEnvelope};
pub use error::{HttpError, ResolveError};
pub use grpc::GrpcStatus;
pub use http::StatusCode;
pub use join::{JoinedError, MultiCause, join};
pub use resolver::{StatusResolver, StatusResolverBuilder};
pub use sentinel::{Sentinel, SentinelMatcher};

static GLOBAL: OnceLock<StatusResolver> = OnceLock::new();

/// Install the process-wide resolver
///
/// Must happen before the first call to [`http_status`] or [`global`];
/// afterwards the resolver is handed back.
pub fn install(resolver: StatusResolver) -> Result<(), StatusResolver> {
    GLOBAL.set(resolver)?;
    tracing::debug!("installed process-wide status resolver");
    Ok(())
}

/// The process-wide resolver, defaulting to [`StatusResolver::default`]
pub fn global() -> &'static StatusResolver {
    GLOBAL.get_or_init(StatusResolver::default)
}

/// HTTP status that best represents `err`
///
/// # Panics
///
/// Panics when joined branches carry conflicting explicit statuses; see
/// [`StatusResolver::resolve`].
pub fn http_status(err: &(dyn Error + 'static)) -> StatusCode {
    global().resolve(err)
}

/// HTTP status that best represents `err`, reporting conflicts as errors
pub fn try_http_status(err: &(dyn Error + 'static)) -> Result<StatusCode, ResolveError> {
    global().try_resolve(err)
}
