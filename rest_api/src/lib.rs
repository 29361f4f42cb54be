use axum::{
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use thiserror::Error;
use anyhow::Context;
use anyhow::Error as AnyhowError;

use graph_client::{MapStore, MapStoreError};
use models::{City, Road};

pub mod config;

// Define the REST API error enum
#[derive(Debug, Error)]
pub enum RestApiError {
    #[error("Map store error: {0}")]
    Store(#[from] MapStoreError),
}

// Implement IntoResponse for RestApiError to convert it into an HTTP response
impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            RestApiError::Store(MapStoreError::CityNotFound(name)) => {
                (StatusCode::NOT_FOUND, format!("City not found: {}", name))
            }
            RestApiError::Store(e) => {
                (StatusCode::BAD_GATEWAY, format!("Graph database failure: {}", e))
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

// Shared state for the Axum application
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MapStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn MapStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddRoadParams {
    pub source: String,
    pub destination: String,
    pub distance: i64,
}

#[derive(Debug, Deserialize)]
pub struct RouteParams {
    pub source: String,
    pub destination: String,
}

// Handler for the POST /city endpoint
async fn add_city_handler(
    State(state): State<AppState>,
    Json(city): Json<City>,
) -> Result<StatusCode, RestApiError> {
    state.store.add_city(&city).await?;
    Ok(StatusCode::OK)
}

// Handler for the GET /city endpoint
async fn list_cities_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<City>>, RestApiError> {
    Ok(Json(state.store.cities().await?))
}

// Handler for the POST /path endpoint. The road travels in the query
// string, not in the body.
async fn add_road_handler(
    State(state): State<AppState>,
    Query(params): Query<AddRoadParams>,
) -> Result<StatusCode, RestApiError> {
    state
        .store
        .add_road(&params.source, &params.destination, params.distance)
        .await?;
    Ok(StatusCode::OK)
}

// Handler for the GET /path endpoint. No extractors declared, so stray
// query parameters are accepted and ignored.
async fn list_roads_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Road>>, RestApiError> {
    Ok(Json(state.store.roads().await?))
}

// Handler for the GET /path/distance endpoint. Stray query parameters are
// accepted and ignored here as well.
async fn list_road_distances_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<i64>>, RestApiError> {
    Ok(Json(state.store.road_distances().await?))
}

// Handler for the GET /road endpoint
async fn find_routes_handler(
    State(state): State<AppState>,
    Query(params): Query<RouteParams>,
) -> Result<Json<Vec<String>>, RestApiError> {
    let routes = state
        .store
        .routes(&params.source, &params.destination)
        .await?;
    Ok(Json(routes.iter().map(|route| route.to_string()).collect()))
}

// Handler for the GET /path/shortest endpoint. One-element array when the
// cities are connected, empty array otherwise.
async fn find_shortest_route_handler(
    State(state): State<AppState>,
    Query(params): Query<RouteParams>,
) -> Result<Json<Vec<String>>, RestApiError> {
    let shortest = state
        .store
        .shortest_route(&params.source, &params.destination)
        .await?;
    Ok(Json(
        shortest.into_iter().map(|route| route.to_string()).collect(),
    ))
}

// Handler for the GET /health endpoint
async fn health_check_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "message": "Map API is healthy" })))
}

/// Builds the application router. Kept separate from [`start_server`] so
/// tests can drive the routes without binding a socket.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any);

    Router::new()
        .route("/city", post(add_city_handler).get(list_cities_handler))
        .route("/path", post(add_road_handler).get(list_roads_handler))
        .route("/path/distance", get(list_road_distances_handler))
        .route("/path/shortest", get(find_shortest_route_handler))
        .route("/road", get(find_routes_handler))
        .route("/health", get(health_check_handler))
        .with_state(state)
        .layer(cors)
}

// Main function to start the REST API server
pub async fn start_server(
    addr: SocketAddr,
    state: AppState,
    shutdown_rx: oneshot::Receiver<()>,
) -> Result<(), AnyhowError> {
    let app = router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to address: {}", addr))?;

    tracing::info!(%addr, "REST API server listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
            tracing::info!("Received shutdown signal, stopping REST API server");
        })
        .await
        .context("REST API server failed to start or run")?;

    tracing::info!("REST API server stopped");
    Ok(())
}
