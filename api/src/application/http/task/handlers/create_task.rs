use crate::application::auth::RequiredIdentity;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::task::validators::CreateTaskValidator;
use axum::extract::State;
use taskhub_core::domain::task::entities::Task;
use taskhub_core::domain::task::ports::TaskService;

#[utoipa::path(
    post,
    path = "",
    tag = "task",
    summary = "Create task",
    description = "Creates a task. Status defaults to `new` and priority to `LOW`. An assigned user is notified by mail.",
    responses(
        (status = 201, body = Task),
        (status = 400, description = "Invalid payload"),
    ),
    request_body = CreateTaskValidator,
    security(("bearer" = []))
)]
pub async fn create_task(
    State(state): State<AppState>,
    RequiredIdentity(_user): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateTaskValidator>,
) -> Result<Response<Task>, ApiError> {
    let task = state
        .service
        .create_task(payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(task))
}
