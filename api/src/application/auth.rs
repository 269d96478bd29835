use axum::{
    RequestPartsExt,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use taskhub_core::domain::{
    authentication::ports::AuthService, common::entities::app_errors::CoreError,
    user::entities::User,
};
use tracing::debug;

use super::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub async fn extract_token_from_bearer(parts: &mut Parts) -> Result<String, ApiError> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| {
            debug!("Request without bearer token");
            ApiError::from(CoreError::InvalidToken)
        })?;

    Ok(bearer.token().to_string())
}

/// Resolves the bearer token to a [`User`] stored in the request extensions.
pub async fn auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = req.into_parts();
    let token = extract_token_from_bearer(&mut parts).await?;

    let user = state.service.authorize(token).await?;
    parts.extensions.insert(user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// The authenticated user. Only available behind the [`auth`] middleware.
pub struct RequiredIdentity(pub User);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(RequiredIdentity)
            .ok_or(ApiError::from(CoreError::InvalidToken))
    }
}
