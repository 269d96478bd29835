use crate::application::auth::RequiredIdentity;
use crate::application::http::query_params::ListParams;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Query, State};
use axum_extra::extract::WithRejection;
use taskhub_core::domain::pagination::value_objects::{ListQuery, PaginationWindow};
use taskhub_core::domain::task_list::entities::TaskList;
use taskhub_core::domain::task_list::ports::TaskListService;

#[utoipa::path(
    get,
    path = "",
    tag = "task-list",
    summary = "List task lists",
    description = "One page of task lists, each with its tasks.",
    params(ListParams),
    responses(
        (status = 200, body = PaginationWindow<TaskList>),
        (status = 400, description = "Invalid filter or page bounds"),
    ),
    security(("bearer" = []))
)]
pub async fn get_task_lists(
    State(state): State<AppState>,
    RequiredIdentity(_user): RequiredIdentity,
    WithRejection(Query(params), _): WithRejection<Query<ListParams>, ApiError>,
) -> Result<Response<PaginationWindow<TaskList>>, ApiError> {
    let window = state
        .service
        .get_task_lists(ListQuery::try_from(params)?)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(window))
}
