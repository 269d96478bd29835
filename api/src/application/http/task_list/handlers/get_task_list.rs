use crate::application::auth::RequiredIdentity;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use axum_extra::extract::WithRejection;
use taskhub_core::domain::task_list::entities::TaskList;
use taskhub_core::domain::task_list::ports::TaskListService;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/{list_id}",
    tag = "task-list",
    summary = "Get task list",
    params(
        ("list_id" = Uuid, Path, description = "Task list ID"),
    ),
    responses(
        (status = 200, body = TaskList),
        (status = 404, description = "Unknown task list"),
    ),
    security(("bearer" = []))
)]
pub async fn get_task_list(
    State(state): State<AppState>,
    RequiredIdentity(_user): RequiredIdentity,
    WithRejection(Path(list_id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<Response<TaskList>, ApiError> {
    let task_list = state
        .service
        .get_task_list(list_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(task_list))
}
