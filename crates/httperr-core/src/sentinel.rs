use std::error::Error;
use std::io;

use http::StatusCode;

/// Predicate recognising a sentinel error
pub type SentinelMatcher = fn(&(dyn Error + 'static)) -> bool;

/// A well-known error condition mapped to a fixed status
///
/// Sentinels are matched against every error in the chain, after explicit
/// and `tonic` statuses have been ruled out.
#[derive(Debug, Clone, Copy)]
pub struct Sentinel {
    name: &'static str,
    matches: SentinelMatcher,
    status: StatusCode,
}

impl Sentinel {
    pub const fn new(name: &'static str, matches: SentinelMatcher, status: StatusCode) -> Self {
        Self { name, matches, status }
    }

    /// "No rows" from the `ClickHouse` client
    #[cfg(feature = "clickhouse")]
    pub const fn row_not_found() -> Self {
        Self::new("row_not_found", is_clickhouse_row_not_found, StatusCode::NOT_FOUND)
    }

    /// `std::io::ErrorKind::NotFound`
    pub const fn io_not_found() -> Self {
        Self::new("io_not_found", is_io_not_found, StatusCode::NOT_FOUND)
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether `err` itself is this sentinel
    pub fn matches(&self, err: &(dyn Error + 'static)) -> bool {
        (self.matches)(err)
    }
}

#[cfg(feature = "clickhouse")]
fn is_clickhouse_row_not_found(err: &(dyn Error + 'static)) -> bool {
    matches!(err.downcast_ref::<clickhouse::error::Error>(), Some(clickhouse::error::Error::RowNotFound))
}

fn is_io_not_found(err: &(dyn Error + 'static)) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}
