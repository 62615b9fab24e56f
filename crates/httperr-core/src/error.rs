use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// Trait for errors that carry an explicit HTTP status
///
/// The resolver treats any registered implementor as status-bearing and
/// stops walking the chain as soon as it meets one.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;
}

/// Errors raised while resolving a status from an error chain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Two or more joined branches carry an explicit status
    #[error("multiple joined errors provide an HTTP status: {}", StatusList(.statuses))]
    AmbiguousStatus {
        /// Every status found under the joined error, in cause order
        statuses: Vec<StatusCode>,
    },
}

struct StatusList<'a>(&'a [StatusCode]);

impl fmt::Display for StatusList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, status) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", status.as_u16())?;
        }
        Ok(())
    }
}
