//! Health check endpoint

use axum::{Json, Router, routing::get};

use crate::core::AppState;
use crate::utils::AppResponse;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

async fn health() -> Json<AppResponse<&'static str>> {
    Json(AppResponse::success("ok"))
}
