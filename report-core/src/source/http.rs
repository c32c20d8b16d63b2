use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;

use crate::{
    config::SourceEndpoint,
    model::{PrecipitationObservation, TemperatureObservation},
};

use super::{FetchError, RawDataSource, SourceKind};

/// Per-request ceiling for one upstream call. A timeout surfaces as
/// [`FetchError::Unavailable`].
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for one upstream observation service.
///
/// One instance per source; the configured endpoint decides which
/// observation shape the responses carry. Stateless between calls, so a
/// single instance can serve any number of fetches.
#[derive(Debug, Clone)]
pub struct HttpRawDataClient {
    kind: SourceKind,
    endpoint: SourceEndpoint,
    http: Client,
}

impl HttpRawDataClient {
    /// Build a client with the default request timeout.
    pub fn new(kind: SourceKind, endpoint: SourceEndpoint) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(DEFAULT_REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(kind, endpoint, http))
    }

    /// Build a client around an existing `reqwest::Client`, e.g. one shared
    /// across sources or configured with a different timeout.
    pub fn with_client(kind: SourceKind, endpoint: SourceEndpoint, http: Client) -> Self {
        Self { kind, endpoint, http }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        zip: &str,
        days: u16,
    ) -> Result<Vec<T>, FetchError> {
        let url = self.endpoint.observation_url(zip, days);

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Unavailable { kind: self.kind, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Unavailable { kind: self.kind, source })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                kind: self.kind,
                status,
                body: truncate_body(&body),
            });
        }

        // Lenient policy: a body that isn't a well-formed observation list
        // counts as "no data", but loudly enough to show up in logs.
        match serde_json::from_str(&body) {
            Ok(records) => Ok(records),
            Err(err) => {
                warn!(
                    kind = %self.kind,
                    %url,
                    error = %err,
                    "malformed upstream body treated as empty observation list"
                );
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait]
impl RawDataSource<PrecipitationObservation> for HttpRawDataClient {
    async fn fetch(&self, zip: &str, days: u16) -> Result<Vec<PrecipitationObservation>, FetchError> {
        self.fetch_list(zip, days).await
    }
}

#[async_trait]
impl RawDataSource<TemperatureObservation> for HttpRawDataClient {
    async fn fetch(&self, zip: &str, days: u16) -> Result<Vec<TemperatureObservation>, FetchError> {
        self.fetch_list(zip, days).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_leaves_short_bodies_alone() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }
}
