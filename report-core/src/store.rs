use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use uuid::Uuid;

use crate::model::WeatherReport;

pub mod jsonl;

pub use jsonl::JsonlReportStore;

/// Failure to persist a report.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Owns persisted reports and assigns their identity.
///
/// `save` is deliberately not idempotent: every call creates a new record
/// with a fresh identity, even for back-to-back identical inputs. There are
/// no update or delete operations.
#[async_trait]
pub trait ReportStore: Send + Sync + Debug {
    async fn save(&self, report: WeatherReport) -> Result<WeatherReport, StoreError>;
}

/// Store backed by a `Vec`, for tests and callers that need no durability.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: Mutex<Vec<WeatherReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything saved so far, in save order.
    pub fn saved(&self) -> Vec<WeatherReport> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<WeatherReport>> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save(&self, mut report: WeatherReport) -> Result<WeatherReport, StoreError> {
        report.id = Some(Uuid::new_v4());
        self.lock().push(report.clone());
        Ok(report)
    }
}
