use crate::application::auth::RequiredIdentity;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use axum_extra::extract::WithRejection;
use taskhub_core::domain::task::ports::TaskService;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/{task_id}",
    tag = "task",
    summary = "Delete task",
    params(
        ("task_id" = Uuid, Path, description = "Task ID"),
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Unknown task"),
    ),
    security(("bearer" = []))
)]
pub async fn delete_task(
    State(state): State<AppState>,
    RequiredIdentity(_user): RequiredIdentity,
    WithRejection(Path(task_id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<Response<()>, ApiError> {
    state
        .service
        .delete_task(task_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::NoContent)
}
