//! Common routes: greeting, liveness, store readiness, build info.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

/// Liveness and readiness share one body; `database` is only reported by `/ready`.
#[derive(Serialize)]
struct ProbeBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

#[utoipa::path(get, path = "/", responses((status = 200, description = "Greeting", body = String)), tag = "common")]
pub async fn hello() -> Json<&'static str> {
    Json("hello world!")
}

async fn live() -> Json<ProbeBody> {
    Json(ProbeBody { status: "ok", database: None })
}

/// 503 while the entity store cannot answer a ping.
async fn store_ready(State(state): State<AppState>) -> (StatusCode, Json<ProbeBody>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(ProbeBody { status: "ok", database: Some("ok") })),
        Err(e) => {
            tracing::warn!(error = %e, "entity store not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ProbeBody { status: "degraded", database: Some("unavailable") }),
            )
        }
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /, /health, /ready, /version, /info.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(live))
        .route("/ready", get(store_ready))
        .route("/version", get(build_info))
        .route("/info", get(build_info))
        .with_state(state)
}
