use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of precipitation reported by the precipitation upstream.
///
/// Upstreams occasionally introduce new type strings; anything we don't
/// recognize lands in `Other` instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherType {
    Rain,
    Snow,
    #[serde(other)]
    Other,
}

impl WeatherType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherType::Rain => "rain",
            WeatherType::Snow => "snow",
            WeatherType::Other => "other",
        }
    }
}

impl std::fmt::Display for WeatherType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One precipitation event as served by the precipitation upstream.
///
/// Upstream serializers differ in casing (lowerCamel vs PascalCase), so the
/// observation types accept both spellings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecipitationObservation {
    #[serde(alias = "ZipCode")]
    pub zip_code: String,
    #[serde(alias = "CreatedOn")]
    pub created_on: DateTime<Utc>,
    #[serde(alias = "WeatherType")]
    pub weather_type: WeatherType,
    #[serde(alias = "AmountInches")]
    pub amount_inches: f64,
}

/// One daily temperature reading as served by the temperature upstream.
///
/// `temp_low_f <= temp_high_f` is the upstream's invariant, not ours; a
/// violated reading still averages without issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureObservation {
    #[serde(alias = "ZipCode")]
    pub zip_code: String,
    #[serde(alias = "CreatedOn")]
    pub created_on: DateTime<Utc>,
    #[serde(alias = "TempHighF")]
    pub temp_high_f: f64,
    #[serde(alias = "TempLowF")]
    pub temp_low_f: f64,
}

/// The derived summary for one zip/window pair.
///
/// `id` stays `None` until a [`crate::store::ReportStore`] assigns identity;
/// `created_on` is the aggregation time, never an observation timestamp.
/// All four statistics carry exactly one decimal place (half-to-even).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub zip_code: String,
    pub created_on: DateTime<Utc>,
    pub rainfall_total_inches: f64,
    pub snow_total_inches: f64,
    pub average_high_f: f64,
    pub average_low_f: f64,
}
