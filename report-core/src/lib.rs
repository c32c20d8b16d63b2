//! Core library for the zip-code weather report service.
//!
//! This crate defines:
//! - Configuration for the two upstream observation services
//! - Typed HTTP clients fetching raw observations
//! - Pure statistics over precipitation and temperature data
//! - The report aggregator and the report store contract
//!
//! It is used by `report-cli`, but can also be reused by other binaries or
//! services that need to build weather reports.

pub mod aggregator;
pub mod config;
pub mod model;
pub mod source;
pub mod stats;
pub mod store;

pub use aggregator::{AggregationError, ReportAggregator};
pub use config::{Config, SourceEndpoint};
pub use model::{
    PrecipitationObservation, TemperatureObservation, WeatherReport, WeatherType,
};
pub use source::{FetchError, HttpRawDataClient, RawDataSource, SourceKind};
pub use store::{InMemoryReportStore, JsonlReportStore, ReportStore, StoreError};
