//! Unauthenticated service routes: liveness, gravity database readiness, and build info.

use crate::resolver::RULES;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

#[derive(Serialize)]
struct Status {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

/// One served list: its path prefix and whether items under it can be written.
#[derive(Serialize)]
struct ServedList {
    path: &'static str,
    modifiable: bool,
}

#[derive(Serialize)]
struct VersionBody {
    name: &'static str,
    version: &'static str,
    lists: Vec<ServedList>,
}

async fn health() -> Json<Status> {
    Json(Status { status: "ok", database: None })
}

async fn ready(State(state): State<AppState>) -> Response {
    match state.provider.ping().await {
        Ok(()) => Json(Status { status: "ok", database: Some("ok") }).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "gravity database unavailable");
            let body = Status { status: "degraded", database: Some("unavailable") };
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}

async fn version() -> Json<VersionBody> {
    let lists = RULES
        .iter()
        .map(|rule| ServedList { path: rule.prefix, modifiable: rule.modifiable })
        .collect();
    Json(VersionBody {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        lists,
    })
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
