use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

pub mod http;

pub use http::HttpRawDataClient;

/// The two independent upstream datasets the aggregator draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Precipitation,
    Temperature,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Precipitation => "precipitation",
            SourceKind::Temperature => "temperature",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to obtain an upstream dataset.
///
/// A body that fails to deserialize is deliberately NOT represented here;
/// the client maps it to an empty observation list (see
/// [`HttpRawDataClient`]).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The upstream could not be reached, or the request timed out.
    #[error("{kind} upstream unavailable: {source}")]
    Unavailable {
        kind: SourceKind,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-success status.
    #[error("{kind} upstream returned status {status}: {body}")]
    Status {
        kind: SourceKind,
        status: StatusCode,
        body: String,
    },
}

impl FetchError {
    pub fn kind(&self) -> SourceKind {
        match self {
            FetchError::Unavailable { kind, .. } | FetchError::Status { kind, .. } => *kind,
        }
    }
}

/// One upstream dataset, fetched for a (zip, trailing-days) query.
///
/// `zip` format and the `days` range are the caller's responsibility; a
/// source issues exactly one fetch per invocation and never retries.
#[async_trait]
pub trait RawDataSource<T>: Send + Sync + Debug {
    async fn fetch(&self, zip: &str, days: u16) -> Result<Vec<T>, FetchError>;
}
