//! Database connectivity check

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use database::mongodb::check_health_detailed;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct TestDbResponse {
    /// `success` or `error`
    pub status: &'static str,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// Ping the database
///
/// 200 when the admin ping succeeds, 503 otherwise (including when the
/// connection could not be opened at start-up).
#[utoipa::path(
    get,
    path = "/api/test-db",
    tag = "Status",
    responses(
        (status = 200, description = "Database reachable", body = TestDbResponse),
        (status = 503, description = "Database unreachable", body = TestDbResponse)
    )
)]
pub async fn test_db(State(state): State<AppState>) -> Response {
    let health = check_health_detailed(&state.connection).await;
    let database = state.connection.database_name().to_string();

    let (status_code, status) = if health.healthy {
        (StatusCode::OK, "success")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "error")
    };

    let body = TestDbResponse {
        status,
        database,
        message: health.message,
        response_time_ms: health.response_time_ms,
    };

    (status_code, Json(body)).into_response()
}

/// `GET /test-db`, nested under `/api`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/test-db", get(test_db))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{get_json, unusable_state};

    #[tokio::test]
    async fn test_db_reports_unusable_connection_as_503() {
        let (status, body) = get_json(router(unusable_state()), "/test-db").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "error");
        assert_eq!(body["database"], "casacore_db");
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .contains("invalid connection string")
        );
    }

    #[tokio::test]
    async fn test_db_reports_closed_connection_as_503() {
        let state = unusable_state();
        state.connection.close().await;

        let (status, body) = get_json(router(state), "/test-db").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["message"], "Database connection is closed");
    }
}
