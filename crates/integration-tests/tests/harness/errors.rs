//! Error types standing in for other libraries in a chain

use std::error::Error;

use http::StatusCode;
use httperr_core::{GrpcStatus, HttpError, MultiCause, StatusEnvelope};
use tonic::Code;

/// Unit sentinel, compared by type like `errors.ErrUnsupported` would be
#[derive(Debug, thiserror::Error)]
#[error("unsupported operation")]
pub struct Unsupported;

/// Generic single-cause wrapper with no status of its own
#[derive(Debug, thiserror::Error)]
#[error("{message}: {source}")]
pub struct Wrapped {
    message: String,
    #[source]
    source: httperr_core::BoxError,
}

impl Wrapped {
    pub fn new(message: impl Into<String>, source: impl Into<httperr_core::BoxError>) -> Self {
        Self {
            message: message.into(),
            source: source.into(),
        }
    }
}

/// Application error that carries its own status
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invoice {0} not found")]
    InvoiceNotFound(u64),

    #[error("payment declined")]
    Declined,
}

impl HttpError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvoiceNotFound(_) => StatusCode::NOT_FOUND,
            Self::Declined => StatusCode::PAYMENT_REQUIRED,
        }
    }
}

/// Per-field failures collected from one request
#[derive(Debug, thiserror::Error)]
#[error("{} invalid fields", .0.len())]
pub struct ValidationErrors(pub Vec<StatusEnvelope>);

impl MultiCause for ValidationErrors {
    fn causes(&self) -> Vec<&(dyn Error + 'static)> {
        self.0.iter().map(|e| e as &(dyn Error + 'static)).collect()
    }
}

/// Driver error from a data-access layer the resolver knows nothing about
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("no rows returned")]
    RowNotFound,

    #[error("connection reset")]
    ConnectionReset,
}

pub fn is_db_row_not_found(err: &(dyn Error + 'static)) -> bool {
    matches!(err.downcast_ref::<DbError>(), Some(DbError::RowNotFound))
}

/// Error from an RPC client that is not built on tonic
#[derive(Debug, thiserror::Error)]
#[error("ledger rpc failed: {reason}")]
pub struct LedgerRpcError {
    pub code: Code,
    pub reason: &'static str,
}

impl GrpcStatus for LedgerRpcError {
    fn grpc_code(&self) -> Code {
        self.code
    }
}
