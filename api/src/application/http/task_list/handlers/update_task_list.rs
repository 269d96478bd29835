use crate::application::auth::RequiredIdentity;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::task_list::validators::UpdateTaskListValidator;
use axum::extract::{Path, State};
use axum_extra::extract::WithRejection;
use taskhub_core::domain::task_list::entities::TaskList;
use taskhub_core::domain::task_list::ports::TaskListService;
use uuid::Uuid;

#[utoipa::path(
    patch,
    path = "/{list_id}",
    tag = "task-list",
    summary = "Update task list",
    params(
        ("list_id" = Uuid, Path, description = "Task list ID"),
    ),
    responses(
        (status = 200, body = TaskList),
        (status = 404, description = "Unknown task list"),
        (status = 409, description = "Name already taken"),
    ),
    request_body = UpdateTaskListValidator,
    security(("bearer" = []))
)]
pub async fn update_task_list(
    State(state): State<AppState>,
    RequiredIdentity(_user): RequiredIdentity,
    WithRejection(Path(list_id), _): WithRejection<Path<Uuid>, ApiError>,
    ValidateJson(payload): ValidateJson<UpdateTaskListValidator>,
) -> Result<Response<TaskList>, ApiError> {
    let task_list = state
        .service
        .update_task_list(list_id, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(task_list))
}
