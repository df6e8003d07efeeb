use serde::Serialize;

use crate::error::UhiError;

/// A validated WGS84 point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, UhiError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(UhiError::InvalidInput(format!(
                "latitude out of range: {lat}"
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(UhiError::InvalidInput(format!(
                "longitude out of range: {lon}"
            )));
        }
        Ok(Self { lat, lon })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One UHI estimate, produced fresh per request and never persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UhiEstimate {
    pub avg_temp: f64,
    pub mitigated_temp: f64,
    pub green_space_percent: f64,
    pub level: RiskLevel,
}
