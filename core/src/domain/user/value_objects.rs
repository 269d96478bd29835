use crate::domain::common::entities::app_errors::CoreError;

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 20;
pub const PASSWORD_SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

impl RegisterUserInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_password(&self.password)?;
        if self.password != self.password2 {
            return Err(CoreError::Validation("Passwords do not match".to_string()));
        }
        Ok(())
    }
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    let len = password.chars().count();
    let valid = (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&len)
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password
            .chars()
            .any(|c| PASSWORD_SPECIAL_CHARACTERS.contains(c))
        && !password.chars().any(char::is_whitespace);

    if !valid {
        return Err(CoreError::Validation(format!(
            "Password must be {PASSWORD_MIN_LENGTH}-{PASSWORD_MAX_LENGTH} characters long and \
             contain an uppercase letter, a lowercase letter, a digit and one of \
             {PASSWORD_SPECIAL_CHARACTERS}"
        )));
    }
    Ok(())
}
