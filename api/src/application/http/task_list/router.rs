use super::handlers::create_task_list::{__path_create_task_list, create_task_list};
use super::handlers::delete_task_list::{__path_delete_task_list, delete_task_list};
use super::handlers::get_task_list::{__path_get_task_list, get_task_list};
use super::handlers::get_task_lists::{__path_get_task_lists, get_task_lists};
use super::handlers::update_task_list::{__path_update_task_list, update_task_list};
use crate::application::{auth::auth, http::server::app_state::AppState};

use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_task_lists,
    get_task_list,
    create_task_list,
    update_task_list,
    delete_task_list
))]
pub struct TaskListApiDoc;

pub fn task_list_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/task-lists", state.args.server.root_path),
            get(get_task_lists).post(create_task_list),
        )
        .route(
            &format!("{}/task-lists/{{list_id}}", state.args.server.root_path),
            get(get_task_list)
                .patch(update_task_list)
                .delete(delete_task_list),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
