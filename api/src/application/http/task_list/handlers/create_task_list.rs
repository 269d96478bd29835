use crate::application::auth::RequiredIdentity;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::task_list::validators::CreateTaskListValidator;
use axum::extract::State;
use taskhub_core::domain::task_list::entities::TaskList;
use taskhub_core::domain::task_list::ports::TaskListService;

#[utoipa::path(
    post,
    path = "",
    tag = "task-list",
    summary = "Create task list",
    description = "Creates a uniquely named list, optionally moving existing tasks into it.",
    responses(
        (status = 201, body = TaskList),
        (status = 409, description = "Name already taken"),
    ),
    request_body = CreateTaskListValidator,
    security(("bearer" = []))
)]
pub async fn create_task_list(
    State(state): State<AppState>,
    RequiredIdentity(_user): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateTaskListValidator>,
) -> Result<Response<TaskList>, ApiError> {
    let task_list = state
        .service
        .create_task_list(payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(task_list))
}
