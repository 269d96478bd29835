use crate::application::auth::RequiredIdentity;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::task::validators::UpdateTaskValidator;
use axum::extract::{Path, State};
use axum_extra::extract::WithRejection;
use taskhub_core::domain::task::entities::Task;
use taskhub_core::domain::task::ports::TaskService;
use uuid::Uuid;

#[utoipa::path(
    patch,
    path = "/{task_id}",
    tag = "task",
    summary = "Update task",
    description = "Partial update, absent fields are left untouched.",
    params(
        ("task_id" = Uuid, Path, description = "Task ID"),
    ),
    responses(
        (status = 200, body = Task),
        (status = 404, description = "Unknown task"),
    ),
    request_body = UpdateTaskValidator,
    security(("bearer" = []))
)]
pub async fn update_task(
    State(state): State<AppState>,
    RequiredIdentity(_user): RequiredIdentity,
    WithRejection(Path(task_id), _): WithRejection<Path<Uuid>, ApiError>,
    ValidateJson(payload): ValidateJson<UpdateTaskValidator>,
) -> Result<Response<Task>, ApiError> {
    let task = state
        .service
        .update_task(task_id, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(task))
}
