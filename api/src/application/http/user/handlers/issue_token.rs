use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::user::validators::TokenForm;
use axum::Form;
use axum::extract::State;
use axum_extra::extract::WithRejection;
use taskhub_core::domain::authentication::entities::Token;
use taskhub_core::domain::authentication::ports::AuthService;

#[utoipa::path(
    post,
    path = "/token",
    tag = "user",
    summary = "Issue access token",
    description = "Exchanges an email and password for a bearer token.",
    responses(
        (status = 200, body = Token),
        (status = 401, description = "Incorrect username or password"),
    ),
    request_body(content = TokenForm, content_type = "application/x-www-form-urlencoded")
)]
pub async fn issue_token(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<TokenForm>, ApiError>,
) -> Result<Response<Token>, ApiError> {
    let token = state
        .service
        .authenticate(form.username, form.password)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(token))
}
