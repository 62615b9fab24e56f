use http::StatusCode;
use tonic::Code;

/// Errors that carry a gRPC status code from another protocol layer
///
/// [`tonic::Status`] is always recognised. Register other implementors with
/// [`StatusResolverBuilder::foreign_status`](crate::StatusResolverBuilder::foreign_status).
/// These are consulted after explicit statuses, so they never make a join
/// ambiguous.
pub trait GrpcStatus: std::error::Error {
    /// The gRPC code this error represents
    fn grpc_code(&self) -> Code;
}

impl GrpcStatus for tonic::Status {
    fn grpc_code(&self) -> Code {
        self.code()
    }
}

/// Translate a `tonic` status code into the nearest HTTP status
pub const fn status_for_code(code: Code) -> StatusCode {
    match code {
        Code::NotFound => StatusCode::NOT_FOUND,
        Code::Unauthenticated => StatusCode::UNAUTHORIZED,
        Code::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        Code::InvalidArgument => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
