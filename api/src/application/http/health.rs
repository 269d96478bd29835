use axum::{Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use taskhub_core::domain::health::{entities::DatabaseHealthStatus, ports::HealthCheckService};
use utoipa::{OpenApi, ToSchema};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(OpenApi)]
#[openapi(paths(health, readiness))]
pub struct HealthApiDoc;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "",
    tag = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, body = HealthResponse)
    ),
)]
pub async fn health() -> Response<HealthResponse> {
    Response::OK(HealthResponse {
        status: "OK".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness probe",
    description = "Pings the database and reports the round-trip time.",
    responses(
        (status = 200, body = DatabaseHealthStatus)
    ),
)]
pub async fn readiness(
    State(state): State<AppState>,
) -> Result<Response<DatabaseHealthStatus>, ApiError> {
    let status = state.service.readiness().await?;
    Ok(Response::OK(status))
}

pub fn health_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/health", state.args.server.root_path),
            get(health),
        )
        .route(
            &format!("{}/health/ready", state.args.server.root_path),
            get(readiness),
        )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::application::http::test::test_server;

    #[tokio::test]
    async fn test_health_endpoints() {
        let server = test_server().await;

        let response = server.get("/api/v1/health").await;
        response.assert_status_ok();
        response.assert_json(&HealthResponse {
            status: "OK".to_string(),
        });

        let response = server.get("/api/v1/health/ready").await;
        response.assert_status(StatusCode::OK);
        assert_eq!(response.json::<DatabaseHealthStatus>().status, "UP");
    }
}
