use super::handlers::create_task::{__path_create_task, create_task};
use super::handlers::delete_task::{__path_delete_task, delete_task};
use super::handlers::get_task::{__path_get_task, get_task};
use super::handlers::get_tasks::{__path_get_tasks, get_tasks};
use super::handlers::update_task::{__path_update_task, update_task};
use crate::application::{auth::auth, http::server::app_state::AppState};

use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_tasks, get_task, create_task, update_task, delete_task))]
pub struct TaskApiDoc;

pub fn task_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/tasks", state.args.server.root_path),
            get(get_tasks).post(create_task),
        )
        .route(
            &format!("{}/tasks/{{task_id}}", state.args.server.root_path),
            get(get_task).patch(update_task).delete(delete_task),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use taskhub_core::domain::{
        pagination::value_objects::PaginationWindow,
        task::entities::{Priority, Task, TaskStatus},
    };

    use crate::application::http::server::api_entities::api_error::ErrorResponse;
    use crate::application::http::test::{login, test_server};

    async fn create(server: &TestServer, token: &str, body: serde_json::Value) -> Task {
        let response = server
            .post("/api/v1/tasks")
            .authorization_bearer(token)
            .json(&body)
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Task>()
    }

    #[tokio::test]
    async fn test_tasks_require_authentication() {
        let server = test_server().await;

        let response = server.get("/api/v1/tasks").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<ErrorResponse>().code, "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_two_tasks_end_to_end() {
        let server = test_server().await;
        let token = login(&server, "ada@example.com").await;

        create(
            &server,
            &token,
            json!({"title": "Critical task", "description": "first", "priority": "CRITICAL"}),
        )
        .await;
        create(
            &server,
            &token,
            json!({"title": "High task", "description": "second", "priority": 2}),
        )
        .await;

        let response = server
            .get("/api/v1/tasks")
            .authorization_bearer(&token)
            .add_query_param("limit", 10)
            .add_query_param("offset", 0)
            .add_query_param("filters", "")
            .await;

        response.assert_status_ok();
        let window = response.json::<PaginationWindow<Task>>();
        let priorities: Vec<Priority> = window.items.iter().map(|task| task.priority).collect();
        assert_eq!(priorities, vec![Priority::Critical, Priority::High]);
        assert_eq!(window.pagination_items, 2);
        assert_eq!(window.total_items, 2);
        assert_eq!(window.remaining_elements, 0);
    }

    #[tokio::test]
    async fn test_filter_and_invalid_filter() {
        let server = test_server().await;
        let token = login(&server, "ada@example.com").await;
        create(&server, &token, json!({"title": "Draft", "description": ""})).await;
        create(
            &server,
            &token,
            json!({"title": "Running", "description": "", "status": "ACTIVE"}),
        )
        .await;

        let response = server
            .get("/api/v1/tasks")
            .authorization_bearer(&token)
            .add_query_param("filters", r#"[["status","=","active"]]"#)
            .await;
        let window = response.json::<PaginationWindow<Task>>();
        assert_eq!(window.items.len(), 1);
        assert_eq!(window.items[0].status, TaskStatus::Active);

        let response = server
            .get("/api/v1/tasks")
            .authorization_bearer(&token)
            .add_query_param("filters", r#"[["status","~","active"]]"#)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().code, "INVALID_FILTER");
    }

    #[tokio::test]
    async fn test_limit_bounds() {
        let server = test_server().await;
        let token = login(&server, "ada@example.com").await;

        for limit in [0, 101] {
            let response = server
                .get("/api/v1/tasks")
                .authorization_bearer(&token)
                .add_query_param("limit", limit)
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
            assert_eq!(response.json::<ErrorResponse>().code, "VALIDATION_ERROR");
        }

        for limit in [1, 100] {
            server
                .get("/api/v1/tasks")
                .authorization_bearer(&token)
                .add_query_param("limit", limit)
                .await
                .assert_status_ok();
        }
    }

    #[tokio::test]
    async fn test_offset_out_of_range() {
        let server = test_server().await;
        let token = login(&server, "ada@example.com").await;

        let response = server
            .get("/api/v1/tasks")
            .authorization_bearer(&token)
            .add_query_param("offset", u64::MAX)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_update_fetch_and_delete() {
        let server = test_server().await;
        let token = login(&server, "ada@example.com").await;
        let task = create(&server, &token, json!({"title": "Write docs", "description": ""})).await;
        let path = format!("/api/v1/tasks/{}", task.id);

        let response = server
            .patch(&path)
            .authorization_bearer(&token)
            .json(&json!({"status": "completed"}))
            .await;
        response.assert_status_ok();
        let updated = response.json::<Task>();
        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(updated.title, "Write docs");

        let fetched = server.get(&path).authorization_bearer(&token).await.json::<Task>();
        assert_eq!(fetched, updated);

        server
            .delete(&path)
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let response = server.get(&path).authorization_bearer(&token).await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<ErrorResponse>().code, "ENTITY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_rejects_short_title() {
        let server = test_server().await;
        let token = login(&server, "ada@example.com").await;

        let response = server
            .post("/api/v1/tasks")
            .authorization_bearer(&token)
            .json(&json!({"title": "ab", "description": ""}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().code, "VALIDATION_ERROR");
    }
}
