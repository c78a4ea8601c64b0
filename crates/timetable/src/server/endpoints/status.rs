use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::server::types::{Flash, PageError};
use crate::types::AppState;

/// GET /
pub async fn get_index() -> Redirect {
    Redirect::to("/schedule")
}

/// GET /health
///
/// Reports whether the database answers a trivial query.
pub async fn get_health(State(s): State<Arc<AppState>>) -> Response {
    match s.store.ping() {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        )
            .into_response(),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// GET /init-db
///
/// Re-applies the schema. Every statement is idempotent, so existing data is kept.
pub async fn get_init_db(State(s): State<Arc<AppState>>) -> Result<Redirect, PageError> {
    info!("GET /init-db");

    s.store.init_schema()?;
    Ok(Redirect::to(
        &Flash::DatabaseInitialized.redirect_target("/schedule"),
    ))
}
