use super::handlers::get_me::{__path_get_me, get_me};
use super::handlers::issue_token::{__path_issue_token, issue_token};
use super::handlers::register_user::{__path_register_user, register_user};
use crate::application::{auth::auth, http::server::app_state::AppState};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(register_user, issue_token, get_me))]
pub struct UserApiDoc;

pub fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/users/me", state.args.server.root_path),
            get(get_me),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .route(
            &format!("{}/users/register", state.args.server.root_path),
            post(register_user),
        )
        .route(
            &format!("{}/users/token", state.args.server.root_path),
            post(issue_token),
        )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use taskhub_core::domain::{authentication::entities::Token, user::entities::User};

    use crate::application::http::server::api_entities::api_error::ErrorResponse;
    use crate::application::http::test::{login, test_server};

    #[tokio::test]
    async fn test_register_login_and_me() {
        let server = test_server().await;
        let token = login(&server, "ada@example.com").await;

        let response = server
            .get("/api/v1/users/me")
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<User>().email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let server = test_server().await;
        login(&server, "ada@example.com").await;

        let response = server
            .post("/api/v1/users/register")
            .json(&json!({
                "full_name": "Ada Again",
                "email": "ada@example.com",
                "password": "Secret#123",
                "password2": "Secret#123",
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<ErrorResponse>().code, "ENTITY_IN_DB");
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let server = test_server().await;

        let response = server
            .post("/api/v1/users/register")
            .json(&json!({
                "full_name": "Ada Lovelace",
                "email": "not-an-email",
                "password": "Secret#123",
                "password2": "Secret#123",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let server = test_server().await;
        login(&server, "ada@example.com").await;

        let response = server
            .post("/api/v1/users/token")
            .form(&[("username", "ada@example.com"), ("password", "Wrong#123")])
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body = response.json::<ErrorResponse>();
        assert_eq!(body.code, "INVALID_CREDENTIALS");
        assert_eq!(body.status, 401);
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let server = test_server().await;

        let response = server.get("/api/v1/users/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<ErrorResponse>().code, "INVALID_TOKEN");

        let response = server
            .get("/api/v1/users/me")
            .authorization_bearer("garbage")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_type_is_bearer() {
        let server = test_server().await;
        login(&server, "ada@example.com").await;

        let token = server
            .post("/api/v1/users/token")
            .form(&[("username", "ada@example.com"), ("password", "Secret#123")])
            .await
            .json::<Token>();

        assert_eq!(token.token_type, "bearer");
    }
}
