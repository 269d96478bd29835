use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterUserValidator {
    #[validate(length(min = 1, max = 255, message = "full_name is required"))]
    pub full_name: String,

    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    pub password: String,

    pub password2: String,
}

/// OAuth2 password form, `username` carries the email.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}
