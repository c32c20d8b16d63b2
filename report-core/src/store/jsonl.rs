use async_trait::async_trait;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::model::WeatherReport;

use super::{ReportStore, StoreError};

/// Append-only file store: one JSON object per line.
///
/// Stands in for a relational report table behind the same contract. The
/// file and its parent directories are created on first save.
#[derive(Debug, Clone)]
pub struct JsonlReportStore {
    path: PathBuf,
}

impl JsonlReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReportStore for JsonlReportStore {
    async fn save(&self, mut report: WeatherReport) -> Result<WeatherReport, StoreError> {
        report.id = Some(Uuid::new_v4());

        let line = serde_json::to_string(&report)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{line}")?;

        Ok(report)
    }
}
