//! Router and request handlers.
//!
//! Handlers are thin: they decode the request, call into `Rover` or the
//! tile source, and encode the result. Malformed path segments and JSON
//! bodies are rejected by the extractors before any handler runs.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use rover_contracts::{
    geojson::{GeometryView, MissionView},
    mission::Waypoint,
    tile::{TileCoordinate, TileRecord},
};

use crate::{error::ApiError, state::AppState, style::load_style};

/// Media type of Mapbox vector tiles.
pub const TILE_CONTENT_TYPE: &str = "application/x-protobuf";

/// Body of `POST /api/waypoint`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaypointCommand {
    pub lat: f64,
    pub lon: f64,
}

/// Body of `POST /api/mission_start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSubmission {
    pub waypoints: Vec<Waypoint>,
}

/// Acknowledgement echoed back for operator commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ack<T> {
    pub status: &'static str,
    pub target: T,
}

impl<T> Ack<T> {
    fn accepted(target: T) -> Self {
        Self {
            status: "accepted",
            target,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.server.static_dir);
    let cors_permissive = state.server.cors_permissive;

    let router = Router::new()
        .route("/health", get(health))
        .route("/tiles/{z}/{x}/{y}", get(get_tile))
        .route("/style.json", get(get_style))
        .route("/api/mission", get(get_mission))
        .route("/api/robot", get(get_robot))
        .route("/api/waypoint", post(post_waypoint))
        .route("/api/mission_start", post(post_mission_start))
        // Frontend assets; API routes above take precedence.
        .fallback_service(static_files)
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http());

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn health() -> &'static str {
    "ok"
}

/// Accepts `17` as well as `17.pbf` for the row segment.
fn parse_row(segment: &str) -> Option<u32> {
    segment.strip_suffix(".pbf").unwrap_or(segment).parse().ok()
}

async fn get_tile(
    State(state): State<Arc<AppState>>,
    Path((z, x, y)): Path<(u8, u32, String)>,
) -> Response {
    let Some(y) = parse_row(&y) else {
        return (StatusCode::BAD_REQUEST, "tile row must be an unsigned integer").into_response();
    };
    let coord = TileCoordinate::new(z, x, y);

    let tiles = Arc::clone(&state.tiles);
    let lookup = tokio::task::spawn_blocking(move || tiles.get(coord)).await;

    match lookup {
        Ok(Ok(Some(tile))) => tile_response(tile),
        Ok(Ok(None)) => StatusCode::NO_CONTENT.into_response(),
        Ok(Err(e)) => {
            warn!(z, x, y, error = %e, "tile lookup failed, serving empty tile");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            warn!(z, x, y, error = %e, "tile lookup task aborted, serving empty tile");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

fn tile_response(tile: TileRecord) -> Response {
    let is_compressed = tile.is_compressed;
    let mut response = Response::new(Body::from(tile.data));
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(TILE_CONTENT_TYPE));
    if is_compressed {
        headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
    }
    response
}

async fn get_style(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let style = load_style(&state.server.style_path, &state.server.public_url).await?;
    Ok(Json(style))
}

async fn get_mission(State(state): State<Arc<AppState>>) -> Result<Json<MissionView>, ApiError> {
    info!("mission requested");
    Ok(Json(state.rover.mission_view()?))
}

async fn get_robot(State(state): State<Arc<AppState>>) -> Result<Json<GeometryView>, ApiError> {
    Ok(Json(state.rover.tick()?))
}

/// Single-target command from the UI. There is no device link, so the
/// command is logged and acknowledged only.
async fn post_waypoint(Json(cmd): Json<WaypointCommand>) -> Json<Ack<WaypointCommand>> {
    info!(lat = cmd.lat, lon = cmd.lon, "waypoint command received, forwarded to device stub");
    Json(Ack::accepted(cmd))
}

async fn post_mission_start(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<MissionSubmission>,
) -> Result<Json<Ack<Option<Waypoint>>>, ApiError> {
    let first = state.rover.replace_mission(submission.waypoints)?;
    Ok(Json(Ack::accepted(first)))
}
