use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, extract::Query};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::dataset::load_segments;
use crate::error::{RError, RResult};
use crate::optimizer::{
    DEFAULT_MAX_TRANSFERS, OptimizerConfig, RouteDocument, RouteQuery, find_routes,
    parse_travel_date,
};

pub async fn run_service(dataset: PathBuf, config: OptimizerConfig, ip_addr: Ipv4Addr, port: u16) {
    log::info!("Starting the server...");

    let dataset = Arc::new(dataset);
    let config = Arc::new(config);
    let cors = CorsLayer::new().allow_methods(Any).allow_origin(Any);

    let app = Router::new()
        .route(
            "/api/routes",
            get(move |params| find_routes_handler(Arc::clone(&dataset), Arc::clone(&config), params)),
        )
        .layer(cors);
    let address = SocketAddr::from((ip_addr, port));
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    log::info!("Listening on {ip_addr}:{port}...");

    axum::serve(listener, app).await.unwrap();
}

#[derive(Debug, Deserialize)]
struct FindRoutesRequest {
    origin: Option<String>,
    destination: Option<String>,
    max_transfers: Option<u32>,
    travel_date: Option<String>,
}

/// Every failure is shaped as a `{"error": "<message>"}` body; no stack
/// detail ever reaches the caller.
async fn find_routes_handler(
    dataset: Arc<PathBuf>,
    config: Arc<OptimizerConfig>,
    Query(params): Query<FindRoutesRequest>,
) -> Response {
    match compute_routes(&dataset, &config, params) {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(error) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
    }
}

/// The unified segment list is re-read for every request; requests share no
/// mutable state and need no locks.
fn compute_routes(
    dataset: &Path,
    config: &OptimizerConfig,
    params: FindRoutesRequest,
) -> RResult<RouteDocument> {
    let (Some(origin), Some(destination)) = (params.origin, params.destination) else {
        return Err(RError::MissingEndpoints);
    };

    let query = RouteQuery {
        origin,
        destination,
        max_transfers: params.max_transfers.unwrap_or(DEFAULT_MAX_TRANSFERS),
        travel_date: parse_travel_date(params.travel_date.as_deref())?,
    };

    let records = load_segments(dataset)?;
    find_routes(&records, &query, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(origin: Option<&str>, destination: Option<&str>) -> FindRoutesRequest {
        FindRoutesRequest {
            origin: origin.map(str::to_string),
            destination: destination.map(str::to_string),
            max_transfers: None,
            travel_date: None,
        }
    }

    #[test]
    fn test_missing_endpoints_fail_before_any_io() {
        let config = OptimizerConfig::default();
        let dataset = Path::new("no_such_dataset.json");

        let err = compute_routes(dataset, &config, request(None, Some("BLR"))).unwrap_err();
        assert_eq!(err.to_string(), "Origin and destination are required.");

        let err = compute_routes(dataset, &config, request(Some("DEL"), None)).unwrap_err();
        assert_eq!(err.to_string(), "Origin and destination are required.");
    }

    #[test]
    fn test_bad_travel_date_is_rejected() {
        let config = OptimizerConfig::default();
        let mut params = request(Some("DEL"), Some("BLR"));
        params.travel_date = Some("tomorrow".to_string());

        let err = compute_routes(Path::new("no_such_dataset.json"), &config, params).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid travel date format. Expected YYYY-MM-DD."
        );
    }

    #[test]
    fn test_missing_dataset_is_reported() {
        let config = OptimizerConfig::default();
        let params = request(Some("DEL"), Some("BLR"));

        let err = compute_routes(Path::new("no_such_dataset.json"), &config, params).unwrap_err();
        assert_eq!(err.to_string(), "Could not find 'no_such_dataset.json'.");
    }
}
