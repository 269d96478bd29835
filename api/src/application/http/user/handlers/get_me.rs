use crate::application::auth::RequiredIdentity;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use taskhub_core::domain::user::entities::User;

#[utoipa::path(
    get,
    path = "/me",
    tag = "user",
    summary = "Current user",
    responses(
        (status = 200, body = User),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer" = []))
)]
pub async fn get_me(RequiredIdentity(user): RequiredIdentity) -> Result<Response<User>, ApiError> {
    Ok(Response::OK(user))
}
