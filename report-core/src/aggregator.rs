use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::{
    model::{PrecipitationObservation, TemperatureObservation, WeatherReport},
    source::{FetchError, RawDataSource},
    stats,
    store::{ReportStore, StoreError},
};

/// Why a `build_report` call failed. Any failure aborts the whole call;
/// there is no partial-success result.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error(transparent)]
    Upstream(#[from] FetchError),

    /// Averaging over an empty window is undefined, so an empty temperature
    /// dataset fails the call instead of producing sentinel values.
    #[error("no temperature observations for zip {zip} in the last {days} days")]
    EmptyTemperatureWindow { zip: String, days: u16 },

    #[error("failed to persist weather report: {0}")]
    Store(#[from] StoreError),
}

/// Builds one weather report per call: fetch both upstream datasets, derive
/// the summary statistics, persist, return.
///
/// All collaborators arrive through the constructor; the aggregator holds no
/// state of its own, so one instance can serve concurrent calls.
#[derive(Debug)]
pub struct ReportAggregator {
    precipitation: Arc<dyn RawDataSource<PrecipitationObservation>>,
    temperature: Arc<dyn RawDataSource<TemperatureObservation>>,
    store: Arc<dyn ReportStore>,
}

impl ReportAggregator {
    pub fn new(
        precipitation: Arc<dyn RawDataSource<PrecipitationObservation>>,
        temperature: Arc<dyn RawDataSource<TemperatureObservation>>,
        store: Arc<dyn ReportStore>,
    ) -> Self {
        Self { precipitation, temperature, store }
    }

    /// Build, persist and return the report for a zip over the trailing
    /// `days`-day window.
    pub async fn build_report(
        &self,
        zip: &str,
        days: u16,
    ) -> Result<WeatherReport, AggregationError> {
        // The two upstreams are independent, so fetch them concurrently and
        // join before deriving anything. Either failure aborts the call
        // before any persistence happens.
        let (precipitation, temperatures) = tokio::try_join!(
            self.precipitation.fetch(zip, days),
            self.temperature.fetch(zip, days),
        )?;

        let rainfall_total_inches = stats::total_rain(&precipitation);
        let snow_total_inches = stats::total_snow(&precipitation);

        let average_high_f = stats::average_high(&temperatures)
            .ok_or_else(|| AggregationError::EmptyTemperatureWindow {
                zip: zip.to_string(),
                days,
            })?;
        let average_low_f = stats::average_low(&temperatures)
            .ok_or_else(|| AggregationError::EmptyTemperatureWindow {
                zip: zip.to_string(),
                days,
            })?;

        info!(
            zip,
            days,
            rainfall_total_inches,
            snow_total_inches,
            average_high_f,
            average_low_f,
            "derived weather statistics"
        );

        let report = WeatherReport {
            id: None,
            zip_code: zip.to_string(),
            created_on: Utc::now(),
            rainfall_total_inches,
            snow_total_inches,
            average_high_f,
            average_low_f,
        };

        let report = self.store.save(report).await?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeatherType;
    use crate::source::SourceKind;
    use crate::store::InMemoryReportStore;
    use async_trait::async_trait;
    use reqwest::StatusCode;

    #[derive(Debug)]
    struct StaticSource<T>(Vec<T>);

    #[async_trait]
    impl<T: Clone + Send + Sync + std::fmt::Debug + 'static> RawDataSource<T> for StaticSource<T> {
        async fn fetch(&self, _zip: &str, _days: u16) -> Result<Vec<T>, FetchError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug)]
    struct UnavailableSource(SourceKind);

    #[async_trait]
    impl<T: Send + Sync + 'static> RawDataSource<T> for UnavailableSource {
        async fn fetch(&self, _zip: &str, _days: u16) -> Result<Vec<T>, FetchError> {
            Err(FetchError::Status {
                kind: self.0,
                status: StatusCode::BAD_GATEWAY,
                body: "down for maintenance".to_string(),
            })
        }
    }

    #[derive(Debug)]
    struct FailingStore;

    #[async_trait]
    impl ReportStore for FailingStore {
        async fn save(&self, _report: WeatherReport) -> Result<WeatherReport, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    fn precip(weather_type: WeatherType, amount_inches: f64) -> PrecipitationObservation {
        PrecipitationObservation {
            zip_code: "90210".to_string(),
            created_on: Utc::now(),
            weather_type,
            amount_inches,
        }
    }

    fn temp(temp_high_f: f64, temp_low_f: f64) -> TemperatureObservation {
        TemperatureObservation {
            zip_code: "90210".to_string(),
            created_on: Utc::now(),
            temp_high_f,
            temp_low_f,
        }
    }

    fn sample_precipitation() -> Arc<StaticSource<PrecipitationObservation>> {
        Arc::new(StaticSource(vec![
            precip(WeatherType::Rain, 1.25),
            precip(WeatherType::Rain, 0.35),
            precip(WeatherType::Snow, 2.0),
        ]))
    }

    fn sample_temperatures() -> Arc<StaticSource<TemperatureObservation>> {
        Arc::new(StaticSource(vec![temp(70.0, 50.0), temp(80.0, 60.0)]))
    }

    #[tokio::test]
    async fn build_report_persists_exactly_one_report() {
        let store = Arc::new(InMemoryReportStore::new());
        let aggregator = ReportAggregator::new(
            sample_precipitation(),
            sample_temperatures(),
            store.clone(),
        );

        let before = Utc::now();
        let report = aggregator.build_report("90210", 7).await.unwrap();
        let after = Utc::now();

        assert_eq!(report.zip_code, "90210");
        assert_eq!(report.rainfall_total_inches, 1.6);
        assert_eq!(report.snow_total_inches, 2.0);
        assert_eq!(report.average_high_f, 75.0);
        assert_eq!(report.average_low_f, 55.0);
        assert!(report.created_on >= before && report.created_on <= after);

        let saved = store.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, report.id);
        assert!(report.id.is_some());
    }

    #[tokio::test]
    async fn precipitation_failure_aborts_without_persistence() {
        let store = Arc::new(InMemoryReportStore::new());
        let aggregator = ReportAggregator::new(
            Arc::new(UnavailableSource(SourceKind::Precipitation)),
            sample_temperatures(),
            store.clone(),
        );

        let err = aggregator.build_report("90210", 7).await.unwrap_err();

        assert!(matches!(err, AggregationError::Upstream(_)));
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn temperature_failure_aborts_without_persistence() {
        let store = Arc::new(InMemoryReportStore::new());
        let aggregator = ReportAggregator::new(
            sample_precipitation(),
            Arc::new(UnavailableSource(SourceKind::Temperature)),
            store.clone(),
        );

        let err = aggregator.build_report("90210", 7).await.unwrap_err();

        assert!(matches!(err, AggregationError::Upstream(_)));
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn empty_temperature_window_fails_the_call() {
        let store = Arc::new(InMemoryReportStore::new());
        let aggregator = ReportAggregator::new(
            sample_precipitation(),
            Arc::new(StaticSource::<TemperatureObservation>(Vec::new())),
            store.clone(),
        );

        let err = aggregator.build_report("90210", 7).await.unwrap_err();

        assert!(matches!(
            err,
            AggregationError::EmptyTemperatureWindow { ref zip, days: 7 } if zip == "90210"
        ));
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn empty_precipitation_window_yields_zero_totals() {
        let store = Arc::new(InMemoryReportStore::new());
        let aggregator = ReportAggregator::new(
            Arc::new(StaticSource::<PrecipitationObservation>(Vec::new())),
            sample_temperatures(),
            store.clone(),
        );

        let report = aggregator.build_report("90210", 7).await.unwrap();

        assert_eq!(report.rainfall_total_inches, 0.0);
        assert_eq!(report.snow_total_inches, 0.0);
        assert_eq!(store.saved().len(), 1);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_aggregation_error() {
        let aggregator = ReportAggregator::new(
            sample_precipitation(),
            sample_temperatures(),
            Arc::new(FailingStore),
        );

        let err = aggregator.build_report("90210", 7).await.unwrap_err();

        assert!(matches!(err, AggregationError::Store(_)));
    }
}
