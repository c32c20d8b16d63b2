//! Pure derivation of summary statistics from raw observations.
//!
//! Everything here is stateless and order-independent; sums and means are
//! commutative reductions. All returned values carry exactly one decimal
//! place, rounded half-to-even — the single rounding rule for the whole
//! crate.

use crate::model::{PrecipitationObservation, TemperatureObservation, WeatherType};

/// Round to one decimal place, ties to even.
///
/// Idempotent: a value already at one decimal place maps to itself.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Total rainfall inches across the observations.
pub fn total_rain(observations: &[PrecipitationObservation]) -> f64 {
    total_of(observations, WeatherType::Rain)
}

/// Total snowfall inches across the observations.
pub fn total_snow(observations: &[PrecipitationObservation]) -> f64 {
    total_of(observations, WeatherType::Snow)
}

fn total_of(observations: &[PrecipitationObservation], weather_type: WeatherType) -> f64 {
    let total: f64 = observations
        .iter()
        .filter(|o| o.weather_type == weather_type)
        .map(|o| o.amount_inches)
        .sum();

    round1(total)
}

/// Mean daily high, or `None` when there are no readings to average.
pub fn average_high(observations: &[TemperatureObservation]) -> Option<f64> {
    average_of(observations, |o| o.temp_high_f)
}

/// Mean daily low, or `None` when there are no readings to average.
pub fn average_low(observations: &[TemperatureObservation]) -> Option<f64> {
    average_of(observations, |o| o.temp_low_f)
}

fn average_of(
    observations: &[TemperatureObservation],
    field: impl Fn(&TemperatureObservation) -> f64,
) -> Option<f64> {
    if observations.is_empty() {
        return None;
    }

    let sum: f64 = observations.iter().map(field).sum();
    Some(round1(sum / observations.len() as f64))
}
