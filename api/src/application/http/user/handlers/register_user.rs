use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::user::validators::RegisterUserValidator;
use axum::extract::State;
use taskhub_core::domain::user::entities::User;
use taskhub_core::domain::user::ports::UserService;
use taskhub_core::domain::user::value_objects::RegisterUserInput;

#[utoipa::path(
    post,
    path = "/register",
    tag = "user",
    summary = "Register user",
    description = "Creates an account. The email must be unused and both passwords must match.",
    responses(
        (status = 201, body = User),
        (status = 409, description = "Email already registered"),
    ),
    request_body = RegisterUserValidator
)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<RegisterUserValidator>,
) -> Result<Response<User>, ApiError> {
    let user = state
        .service
        .register_user(RegisterUserInput {
            full_name: payload.full_name,
            email: payload.email,
            password: payload.password,
            password2: payload.password2,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(user))
}
