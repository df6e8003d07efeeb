use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::cities;
use crate::config;
use crate::earth_engine::{DateWindow, EarthEngineClient, LST_WINDOW_DAYS};
use crate::error::UhiError;
use crate::estimator;
use crate::green_space;
use crate::models::{Coordinate, UhiEstimate};

pub async fn run(address: std::net::SocketAddr) {
    let client = Arc::new(EarthEngineClient::new(config::config()));

    let health_route = warp::path!("health").map(|| StatusCode::OK);

    let predict_route = warp::path!("predict")
        .and(warp::query::<PredictQuery>())
        .and(with_client(client.clone()))
        .and_then(predict);

    let heatmap_route = warp::path!("heatmap").map(|| warp::reply::json(&heatmap()));

    let cities_route = warp::path!("cities").map(|| warp::reply::json(&cities::all()));

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET"]);

    let routes = health_route
        .or(predict_route)
        .or(heatmap_route)
        .or(cities_route)
        .recover(rejection)
        .with(cors);

    warp::serve(routes).run(address).await
}

fn with_client(
    client: Arc<EarthEngineClient>,
) -> impl Filter<Extract = (Arc<EarthEngineClient>,), Error = Infallible> + Clone {
    warp::any().map(move || client.clone())
}

#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    lat: f64,
    lon: f64,
    city: Option<String>,
    green_space: Option<f64>,
}

#[derive(Serialize)]
struct PredictResponse {
    city: String,
    #[serde(flatten)]
    estimate: UhiEstimate,
}

pub async fn predict(
    query: PredictQuery,
    client: Arc<EarthEngineClient>,
) -> Result<impl Reply, Rejection> {
    let coord = Coordinate::new(query.lat, query.lon).map_err(reject)?;

    let city = query
        .city
        .or_else(|| cities::find_at(coord).map(|c| c.name.to_string()))
        .unwrap_or_else(|| "Unknown".to_string());

    let raw = client
        .mean_lst(coord, DateWindow::trailing_days(LST_WINDOW_DAYS))
        .await
        .map_err(|e| reject(UhiError::UpstreamUnavailable(e)))?;

    let fraction = green_space::resolve(&client, coord, query.green_space).await;

    let estimate = estimator::estimate(raw, fraction).map_err(reject)?;

    Ok(warp::reply::json(&PredictResponse { city, estimate }))
}

#[derive(Serialize)]
struct HeatmapPoint {
    name: &'static str,
    lat: f64,
    lon: f64,
    intensity: f64,
}

/// Per-city heat weight in `(0, 1]`. Denser green cover lowers the weight;
/// at most half of it can be mitigated away.
fn heatmap() -> Vec<HeatmapPoint> {
    cities::all()
        .into_iter()
        .map(|c| HeatmapPoint {
            name: c.name,
            lat: c.lat,
            lon: c.lon,
            intensity: estimator::round2(1.0 - c.green_space_percent / 100.0 * 0.5),
        })
        .collect()
}

fn reject(err: UhiError) -> Rejection {
    warp::reject::custom(ApiError(err))
}

#[derive(Debug)]
struct ApiError(UhiError);
impl warp::reject::Reject for ApiError {}

#[derive(Serialize)]
struct ErrorMessage {
    code: u16,
    error: String,
}

pub async fn rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found.".to_string())
    } else if let Some(ApiError(err)) = err.find::<ApiError>() {
        let code = match err {
            UhiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            UhiError::NoDataAvailable => StatusCode::NOT_FOUND,
            UhiError::UpstreamUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        log::error!("Request failed: {:#}", err);
        (code, err.to_string())
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        (
            StatusCode::BAD_REQUEST,
            "Missing or non-numeric lat/lon.".to_string(),
        )
    } else {
        log::error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error.".to_string(),
        )
    };

    let json = warp::reply::json(&ErrorMessage {
        code: code.as_u16(),
        error: message,
    });

    Ok(warp::reply::with_status(json, code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EarthEngineConfig;

    fn offline_client() -> Arc<EarthEngineClient> {
        Arc::new(EarthEngineClient::new(&EarthEngineConfig {
            project: "earthengine-uhi".to_string(),
            token: "test-token".to_string(),
            base_url: "https://earthengine.example/v1".to_string(),
        }))
    }

    #[test]
    fn test_heatmap_intensity_bounds() {
        let points = heatmap();
        assert_eq!(points.len(), cities::all().len());
        for point in &points {
            assert!(point.intensity > 0.0 && point.intensity <= 1.0, "{}", point.name);
        }
    }

    #[test]
    fn test_heatmap_greener_is_cooler() {
        let points = heatmap();
        let mumbai = points.iter().find(|p| p.name == "Mumbai").unwrap();
        let pune = points.iter().find(|p| p.name == "Pune").unwrap();
        // Mumbai 8% green vs Pune 20%
        assert!(mumbai.intensity > pune.intensity);
    }

    #[tokio::test]
    async fn test_missing_lat_lon_is_bad_request() {
        let route = warp::path!("predict")
            .and(warp::query::<PredictQuery>())
            .map(|_| StatusCode::OK)
            .recover(rejection);

        let response = warp::test::request()
            .path("/predict?lat=28.7")
            .reply(&route)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = warp::test::request()
            .path("/predict?lat=abc&lon=77.1")
            .reply(&route)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_out_of_range_coordinate_is_bad_request() {
        // Coordinate validation rejects before any upstream call is made.
        let route = warp::path!("predict")
            .and(warp::query::<PredictQuery>())
            .and(with_client(offline_client()))
            .and_then(predict)
            .recover(rejection);

        let response = warp::test::request()
            .path("/predict?lat=91&lon=0")
            .reply(&route)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["code"], 400);
        assert!(body["error"].as_str().unwrap().contains("latitude"));
    }

    #[tokio::test]
    async fn test_no_data_maps_to_not_found() {
        let route = warp::path!("predict")
            .and_then(|| async {
                Err::<StatusCode, Rejection>(reject(UhiError::NoDataAvailable))
            })
            .recover(rejection);

        let response = warp::test::request().path("/predict").reply(&route).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["code"], 404);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("no cloud-free satellite observation"));
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_internal_error() {
        let route = warp::path!("predict")
            .and_then(|| async {
                Err::<StatusCode, Rejection>(reject(UhiError::UpstreamUnavailable(
                    anyhow::anyhow!("connection refused"),
                )))
            })
            .recover(rejection);

        let response = warp::test::request().path("/predict").reply(&route).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["code"], 500);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("upstream imagery service unavailable"));
    }
}
