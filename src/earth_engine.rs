//! Earth Engine data source for satellite band means.
//!
//! Issues image-collection reduce queries (date-filtered mean, point reduce)
//! against the platform's `value:compute` endpoint and extracts the scalar
//! band value from the response. The client is constructed once at startup
//! and injected into request handlers.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;

use crate::config::EarthEngineConfig;
use crate::models::Coordinate;

/// MODIS 8-day land surface temperature product and band.
pub const LST_COLLECTION: &str = "MODIS/061/MOD11A2";
pub const LST_BAND: &str = "LST_Day_1km";
/// Reduce scale for the 1 km LST product, in meters.
const LST_SCALE_M: f64 = 1000.0;
/// Trailing observation window for LST queries, in days.
pub const LST_WINDOW_DAYS: i64 = 30;

/// MODIS 16-day vegetation index product and band.
pub const NDVI_COLLECTION: &str = "MODIS/061/MOD13Q1";
pub const NDVI_BAND: &str = "NDVI";
const NDVI_SCALE_M: f64 = 250.0;
/// NDVI composites are sparse, so the green-space window is wider.
pub const NDVI_WINDOW_DAYS: i64 = 90;
/// MOD13Q1 NDVI digital numbers carry a 0.0001 scale factor.
const NDVI_VALUE_SCALE: f64 = 0.0001;
/// NDVI above this counts as vegetated in the green-space mask.
pub const NDVI_GREEN_THRESHOLD: f64 = 0.2;

/// Half-open observation window, as calendar dates.
#[derive(Clone, Copy, Debug)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window ending today and starting `days` back.
    pub fn trailing_days(days: i64) -> Self {
        let end = Utc::now().date_naive();
        Self {
            start: end - Duration::days(days),
            end,
        }
    }
}

pub struct EarthEngineClient {
    client: reqwest::Client,
    base_url: String,
    project: String,
    token: String,
}

impl EarthEngineClient {
    /// Create a new client with default HTTP settings.
    pub fn new(config: &EarthEngineConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            project: config.project.clone(),
            token: config.token.clone(),
        }
    }

    /// URL of the scalar compute endpoint for the configured project.
    pub fn compute_url(&self) -> String {
        format!("{}/projects/{}/value:compute", self.base_url, self.project)
    }

    /// Mean LST digital number at the point over the window.
    ///
    /// Returns `Ok(None)` when no cloud-free observation fell in the window.
    pub async fn mean_lst(&self, coord: Coordinate, window: DateWindow) -> Result<Option<f64>> {
        let body = reduce_expression(
            LST_COLLECTION,
            LST_BAND,
            coord,
            window,
            LST_SCALE_M,
            None,
            None,
        );
        self.compute(body, LST_BAND).await
    }

    /// Mean of `indicator(NDVI > threshold)` over a buffer around the point,
    /// a value in `[0, 1]`. The mask threshold is sent in digital-number
    /// units so the platform applies it before reducing.
    pub async fn mean_ndvi_mask(
        &self,
        coord: Coordinate,
        radius_km: f64,
        window: DateWindow,
    ) -> Result<Option<f64>> {
        let body = reduce_expression(
            NDVI_COLLECTION,
            NDVI_BAND,
            coord,
            window,
            NDVI_SCALE_M,
            Some(radius_km * 1000.0),
            Some(NDVI_GREEN_THRESHOLD / NDVI_VALUE_SCALE),
        );
        self.compute(body, NDVI_BAND).await
    }

    async fn compute(&self, body: serde_json::Value, band: &str) -> Result<Option<f64>> {
        let response = self
            .client
            .post(self.compute_url())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .context("Failed to reach Earth Engine")?;

        match response.status() {
            reqwest::StatusCode::OK => {}
            reqwest::StatusCode::NOT_FOUND => {
                log::info!("Earth Engine returned no result for {}", band);
                return Ok(None);
            }
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                return Err(anyhow::anyhow!(
                    "Earth Engine refused the request; check UHI_EE_TOKEN and UHI_EE_PROJECT"
                ));
            }
            status => {
                return Err(anyhow::anyhow!(
                    "Earth Engine query failed with status: {}",
                    status
                ));
            }
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .context("Failed to decode Earth Engine response")?;

        Ok(extract_band_value(&payload, band))
    }
}

/// Build a mean-reduce query over a date-filtered image collection.
///
/// `buffer_m` widens the point to a disk; `mask_above` keeps only pixels
/// whose digital number exceeds the threshold before reducing.
fn reduce_expression(
    collection: &str,
    band: &str,
    coord: Coordinate,
    window: DateWindow,
    scale_m: f64,
    buffer_m: Option<f64>,
    mask_above: Option<f64>,
) -> serde_json::Value {
    let mut expression = json!({
        "collection": collection,
        "band": band,
        "startDate": window.start.format("%Y-%m-%d").to_string(),
        "endDate": window.end.format("%Y-%m-%d").to_string(),
        "reducer": "mean",
        "geometry": {
            "type": "Point",
            "coordinates": [coord.lon, coord.lat],
        },
        "scale": scale_m,
    });
    if let Some(radius) = buffer_m {
        expression["bufferMeters"] = json!(radius);
    }
    if let Some(threshold) = mask_above {
        expression["maskAbove"] = json!(threshold);
    }
    json!({ "expression": expression })
}

/// Pull the scalar band mean out of a compute response.
///
/// A missing or null band means no pixel survived the filters.
fn extract_band_value(payload: &serde_json::Value, band: &str) -> Option<f64> {
    payload.get("result")?.get(band)?.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> EarthEngineClient {
        EarthEngineClient::new(&EarthEngineConfig {
            project: "earthengine-uhi".to_string(),
            token: "test-token".to_string(),
            base_url: "https://earthengine.example/v1".to_string(),
        })
    }

    #[test]
    fn test_compute_url() {
        assert_eq!(
            test_client().compute_url(),
            "https://earthengine.example/v1/projects/earthengine-uhi/value:compute"
        );
    }

    #[test]
    fn test_lst_expression_shape() {
        let coord = Coordinate::new(28.7041, 77.1025).unwrap();
        let window = DateWindow {
            start: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
        };
        let body = reduce_expression(LST_COLLECTION, LST_BAND, coord, window, 1000.0, None, None);
        let expr = &body["expression"];

        assert_eq!(expr["collection"], "MODIS/061/MOD11A2");
        assert_eq!(expr["band"], "LST_Day_1km");
        assert_eq!(expr["startDate"], "2025-07-01");
        assert_eq!(expr["endDate"], "2025-07-31");
        assert_eq!(expr["reducer"], "mean");
        // GeoJSON order: lon first
        assert_eq!(expr["geometry"]["coordinates"][0], 77.1025);
        assert_eq!(expr["geometry"]["coordinates"][1], 28.7041);
        assert!(expr.get("bufferMeters").is_none());
        assert!(expr.get("maskAbove").is_none());
    }

    #[test]
    fn test_ndvi_expression_carries_buffer_and_mask() {
        let coord = Coordinate::new(19.076, 72.8777).unwrap();
        let window = DateWindow::trailing_days(NDVI_WINDOW_DAYS);
        let body = reduce_expression(
            NDVI_COLLECTION,
            NDVI_BAND,
            coord,
            window,
            250.0,
            Some(2000.0),
            Some(NDVI_GREEN_THRESHOLD / NDVI_VALUE_SCALE),
        );
        let expr = &body["expression"];

        assert_eq!(expr["bufferMeters"], 2000.0);
        // 0.2 NDVI in digital-number units
        assert_eq!(expr["maskAbove"], 2000.0);
    }

    #[test]
    fn test_extract_band_value() {
        let scalar = serde_json::json!({ "result": { "LST_Day_1km": 15123.4 } });
        assert_eq!(extract_band_value(&scalar, "LST_Day_1km"), Some(15123.4));

        let null = serde_json::json!({ "result": { "LST_Day_1km": null } });
        assert_eq!(extract_band_value(&null, "LST_Day_1km"), None);

        let missing = serde_json::json!({ "result": {} });
        assert_eq!(extract_band_value(&missing, "LST_Day_1km"), None);

        let empty = serde_json::json!({});
        assert_eq!(extract_band_value(&empty, "LST_Day_1km"), None);
    }

    #[test]
    fn test_trailing_window_length() {
        let window = DateWindow::trailing_days(30);
        assert_eq!((window.end - window.start).num_days(), 30);
    }
}
