use std::error::Error;
use std::io;

use http::StatusCode;
use httperr_config::ResolverConfig;
use tonic::Code;

use crate::chain::{Chain, Links};
use crate::grpc::{self, GrpcStatus};
use crate::{HttpError, JoinedError, MultiCause, ResolveError, Sentinel, StatusEnvelope};

type StatusLookup = fn(&(dyn Error + 'static)) -> Option<StatusCode>;
type CausesLookup = for<'a> fn(&'a (dyn Error + 'static)) -> Option<Vec<&'a (dyn Error + 'static)>>;
type ForeignLookup = fn(&(dyn Error + 'static)) -> Option<Code>;

fn status_of<T: HttpError + 'static>(err: &(dyn Error + 'static)) -> Option<StatusCode> {
    err.downcast_ref::<T>().map(HttpError::status_code)
}

fn code_of<T: GrpcStatus + 'static>(err: &(dyn Error + 'static)) -> Option<Code> {
    err.downcast_ref::<T>().map(GrpcStatus::grpc_code)
}

fn causes_of<'a, T: MultiCause + 'static>(err: &'a (dyn Error + 'static)) -> Option<Vec<&'a (dyn Error + 'static)>> {
    err.downcast_ref::<T>().map(MultiCause::causes)
}

/// Recovers the HTTP status that best represents an error
///
/// Resolution order, most specific first:
///
/// 1. the error is a registered [`HttpError`] type
/// 2. it has a single cause: resolve that cause
/// 3. it is a registered [`MultiCause`] type: resolve every cause, and
///    exactly one of them may carry a status
/// 4. a registered [`GrpcStatus`] type anywhere in the chain, via
///    [`grpc::status_for_code`]
/// 5. the first configured [`Sentinel`] matching anything in the chain
/// 6. the fallback status
///
/// [`StatusEnvelope`], [`JoinedError`] and [`tonic::Status`] are always
/// registered.
#[derive(Debug, Clone)]
pub struct StatusResolver {
    status_lookups: Vec<StatusLookup>,
    causes_lookups: Vec<CausesLookup>,
    foreign_lookups: Vec<ForeignLookup>,
    sentinels: Vec<Sentinel>,
    fallback: StatusCode,
}

impl StatusResolver {
    /// Start from the built-in registrations, no sentinels and a `500` fallback
    pub fn builder() -> StatusResolverBuilder {
        StatusResolverBuilder {
            inner: Self {
                status_lookups: vec![status_of::<StatusEnvelope> as StatusLookup],
                causes_lookups: vec![causes_of::<JoinedError> as CausesLookup],
                foreign_lookups: vec![code_of::<tonic::Status> as ForeignLookup],
                sentinels: Vec::new(),
                fallback: StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Build a resolver with the sentinels and fallback named in `config`
    pub fn from_config(config: &ResolverConfig) -> Self {
        let mut builder = Self::builder().fallback(config.fallback);

        #[cfg(feature = "clickhouse")]
        if config.sentinels.row_not_found {
            builder = builder.sentinel(Sentinel::row_not_found());
        }

        #[cfg(not(feature = "clickhouse"))]
        if config.sentinels.row_not_found {
            tracing::debug!("row_not_found sentinel skipped, no data-access integration is compiled in");
        }

        if config.sentinels.io_not_found {
            builder = builder.sentinel(Sentinel::io_not_found());
        }

        builder.build()
    }

    /// Status used when nothing classifies an error
    pub const fn fallback(&self) -> StatusCode {
        self.fallback
    }

    /// Resolve the status for `err`
    ///
    /// # Panics
    ///
    /// Panics when two or more joined branches carry an explicit status.
    /// That is a defect in how the error was composed, not a runtime
    /// condition; use [`Self::try_resolve`] to observe it instead.
    pub fn resolve(&self, err: &(dyn Error + 'static)) -> StatusCode {
        match self.try_resolve(err) {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(error = %e, chain = %err, "refusing to pick between conflicting HTTP statuses");
                panic!("{e}");
            }
        }
    }

    /// Resolve the status for `err`, reporting conflicting joined statuses
    pub fn try_resolve(&self, err: &(dyn Error + 'static)) -> Result<StatusCode, ResolveError> {
        if let Some(status) = self.explicit_status(err)? {
            tracing::debug!(rule = "explicit", status = status.as_u16(), "resolved HTTP status");
            return Ok(status);
        }

        if let Some(code) = self.chain(err).find_map(|e| self.foreign_code(e)) {
            let status = grpc::status_for_code(code);
            tracing::debug!(
                rule = "grpc",
                grpc_code = ?code,
                status = status.as_u16(),
                "resolved HTTP status"
            );
            return Ok(status);
        }

        if let Some(sentinel) = self
            .sentinels
            .iter()
            .find(|sentinel| self.chain(err).any(|e| sentinel.matches(e)))
        {
            tracing::debug!(
                rule = "sentinel",
                sentinel = sentinel.name(),
                status = sentinel.status().as_u16(),
                "resolved HTTP status"
            );
            return Ok(sentinel.status());
        }

        tracing::trace!(status = self.fallback.as_u16(), "unclassified error, using fallback status");
        Ok(self.fallback)
    }

    /// Look only for explicitly attached statuses
    ///
    /// `Ok(None)` means no branch of the chain carries one.
    pub fn explicit_status(&self, err: &(dyn Error + 'static)) -> Result<Option<StatusCode>, ResolveError> {
        if let Some(status) = self.status_lookups.iter().find_map(|lookup| lookup(err)) {
            return Ok(Some(status));
        }

        match self.links(err) {
            Links::Leaf => Ok(None),
            Links::One(cause) => self.explicit_status(cause),
            Links::Many(causes) => {
                let mut statuses = Vec::new();
                for cause in causes {
                    if let Some(status) = self.explicit_status(cause)? {
                        statuses.push(status);
                    }
                }

                match statuses.len() {
                    0 => Ok(None),
                    1 => Ok(Some(statuses[0])),
                    _ => Err(ResolveError::AmbiguousStatus { statuses }),
                }
            }
        }
    }

    /// gRPC code carried by `err` itself, if it is a registered foreign type
    fn foreign_code(&self, err: &(dyn Error + 'static)) -> Option<Code> {
        self.foreign_lookups.iter().find_map(|lookup| lookup(err))
    }

    /// The errors directly beneath `err`
    ///
    /// A single cause takes precedence over registered multi-cause access.
    pub fn links<'a>(&self, err: &'a (dyn Error + 'static)) -> Links<'a> {
        // `io::Error::source` skips a custom payload, so reach it directly
        if let Some(inner) = err.downcast_ref::<io::Error>().and_then(io::Error::get_ref) {
            return Links::One(inner);
        }

        if let Some(cause) = err.source() {
            return Links::One(cause);
        }

        self.causes_lookups
            .iter()
            .find_map(|lookup| lookup(err))
            .map_or(Links::Leaf, Links::Many)
    }

    /// Iterate over every error reachable from `err`, starting with `err`
    pub fn chain<'a>(&'a self, err: &'a (dyn Error + 'static)) -> Chain<'a> {
        Chain::new(self, err)
    }
}

impl Default for StatusResolver {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

/// Builder for [`StatusResolver`]
#[derive(Debug, Clone)]
pub struct StatusResolverBuilder {
    inner: StatusResolver,
}

impl StatusResolverBuilder {
    /// Treat `T` as carrying an explicit status
    #[must_use]
    pub fn status_bearing<T: HttpError + 'static>(mut self) -> Self {
        self.inner.status_lookups.push(status_of::<T>);
        self
    }

    /// Treat `T` as fanning out into several causes
    #[must_use]
    pub fn multi_cause<T: MultiCause + 'static>(mut self) -> Self {
        self.inner.causes_lookups.push(causes_of::<T>);
        self
    }

    /// Treat `T` as carrying a gRPC status to translate
    #[must_use]
    pub fn foreign_status<T: GrpcStatus + 'static>(mut self) -> Self {
        self.inner.foreign_lookups.push(code_of::<T>);
        self
    }

    /// Recognise a sentinel; earlier sentinels win
    #[must_use]
    pub fn sentinel(mut self, sentinel: Sentinel) -> Self {
        self.inner.sentinels.push(sentinel);
        self
    }

    /// Status for unclassified errors
    #[must_use]
    pub fn fallback(mut self, status: StatusCode) -> Self {
        self.inner.fallback = status;
        self
    }

    pub fn build(self) -> StatusResolver {
        self.inner
    }
}
