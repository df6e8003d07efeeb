//! UHI estimation from a raw satellite land-surface-temperature sample.
//!
//! Converts the scaled MODIS digital number into Celsius, applies a
//! vegetation mitigation factor and buckets the result into a risk level.
//! Pure and deterministic, no I/O.

use crate::error::UhiError;
use crate::models::{RiskLevel, UhiEstimate};

/// MODIS `LST_Day_1km` product scale factor (digital number -> Kelvin).
pub const LST_SCALE: f64 = 0.02;
/// Kelvin to Celsius offset.
pub const KELVIN_TO_CELSIUS: f64 = 273.15;

/// Mitigation factor at zero vegetation cover.
pub const MITIGATION_BASE: f64 = 0.85;
/// Additional mitigation effect across the full 0-100% green-space range.
pub const MITIGATION_SPAN: f64 = 0.10;

/// Inclusive lower bounds of the risk buckets, in Celsius.
pub const HIGH_RISK_CELSIUS: f64 = 38.0;
pub const MEDIUM_RISK_CELSIUS: f64 = 34.0;

/// Estimate UHI metrics for one observation.
///
/// `raw_lst` is the mean of the LST band in scaled digital-number form, or
/// `None` when the query window held no cloud-free observation; that case is
/// an explicit error, never a fabricated temperature.
pub fn estimate(raw_lst: Option<f64>, green_space_percent: f64) -> Result<UhiEstimate, UhiError> {
    let raw = raw_lst.ok_or(UhiError::NoDataAvailable)?;
    let avg_temp = round2(raw * LST_SCALE - KELVIN_TO_CELSIUS);

    // NaN passes straight through clamp; treat any non-finite share as no cover.
    let fraction = if green_space_percent.is_finite() {
        green_space_percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let factor = MITIGATION_BASE + fraction / 100.0 * MITIGATION_SPAN;
    // Mitigation only cools. Capping keeps that true for sub-zero surfaces,
    // where a factor below 1 would otherwise raise the temperature.
    let mitigated_temp = round2((avg_temp * factor).min(avg_temp));

    Ok(UhiEstimate {
        avg_temp,
        mitigated_temp,
        green_space_percent: fraction,
        level: classify(avg_temp),
    })
}

/// Risk bucket for an average temperature, evaluated high-to-low with
/// inclusive lower bounds.
pub fn classify(avg_temp: f64) -> RiskLevel {
    if avg_temp >= HIGH_RISK_CELSIUS {
        RiskLevel::High
    } else if avg_temp >= MEDIUM_RISK_CELSIUS {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Round to two decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
