//! Welcome and smoke-test endpoints

use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiTestResponse {
    pub status: &'static str,
    pub data: &'static str,
}

/// Welcome message
#[utoipa::path(
    get,
    path = "/",
    tag = "Status",
    responses((status = 200, description = "Welcome message", body = WelcomeResponse))
)]
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the CasaCore Backend! 🌱🧱",
    })
}

/// Confirms the API is up without touching the database
#[utoipa::path(
    get,
    path = "/api/test",
    tag = "Status",
    responses((status = 200, description = "API is running", body = ApiTestResponse))
)]
pub async fn api_test() -> Json<ApiTestResponse> {
    Json(ApiTestResponse {
        status: "success",
        data: "The products backend is running!",
    })
}

/// `GET /`
pub fn router() -> Router {
    Router::new().route("/", get(welcome))
}

/// `GET /test`, nested under `/api`
pub fn api_router() -> Router {
    Router::new().route("/test", get(api_test))
}
