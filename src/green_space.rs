//! Green-space fraction resolution.
//!
//! Resolution order: caller-supplied value, then the static city table, then
//! an NDVI mask mean over a buffer around the point. Anything unresolvable
//! defaults to zero cover, which only makes the estimate more conservative.

use crate::cities;
use crate::earth_engine::{DateWindow, EarthEngineClient, NDVI_WINDOW_DAYS};
use crate::models::Coordinate;

/// Buffer radius around the point when deriving the fraction from NDVI.
pub const DEFAULT_RADIUS_KM: f64 = 2.0;

/// Green-space share of the area in `[0, 100]`.
pub async fn resolve(
    client: &EarthEngineClient,
    coord: Coordinate,
    requested: Option<f64>,
) -> f64 {
    if let Some(fraction) = requested {
        if !fraction.is_finite() {
            return 0.0;
        }
        return fraction.clamp(0.0, 100.0);
    }

    if let Some(city) = cities::find_at(coord) {
        return city.green_space_percent;
    }

    match client
        .mean_ndvi_mask(coord, DEFAULT_RADIUS_KM, DateWindow::trailing_days(NDVI_WINDOW_DAYS))
        .await
    {
        Ok(Some(mask_mean)) => (mask_mean * 100.0).clamp(0.0, 100.0),
        Ok(None) => {
            log::warn!(
                "No NDVI data around ({}, {}), assuming no green space",
                coord.lat,
                coord.lon
            );
            0.0
        }
        Err(err) => {
            log::warn!(
                "NDVI lookup failed for ({}, {}): {:#}",
                coord.lat,
                coord.lon,
                err
            );
            0.0
        }
    }
}
