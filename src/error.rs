use async_graphql::ErrorExtensions;
use thiserror::Error;
use tracing::warn;

/// Failures surfaced to GraphQL clients as field errors.
///
/// A missing movie is not an error: resolvers return `null` for it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("upstream request failed: {0:#}")]
    Upstream(#[source] anyhow::Error),
    #[error("field `{0}` is not implemented")]
    NotImplemented(&'static str),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Upstream(_) => "UPSTREAM_FAILURE",
            ApiError::NotImplemented(_) => "NOT_IMPLEMENTED",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

/// Maps a failed TMDB call onto a field error.
pub fn upstream(err: anyhow::Error) -> async_graphql::Error {
    warn!("TMDB request failed: {:#}", err);
    ApiError::Upstream(err).extend()
}
