use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("{0}")]
    EntityDoesNotExist(String),

    #[error("{0}")]
    EntityAlreadyExists(String),

    #[error("{0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    /// Stable machine-readable code, identical for the same condition
    /// whatever entity or call site raised it.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::InvalidFilter(_) => "INVALID_FILTER",
            CoreError::EntityDoesNotExist(_) => "ENTITY_NOT_FOUND",
            CoreError::EntityAlreadyExists(_) => "ENTITY_IN_DB",
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::Persistence(_) => "PERSISTENCE_ERROR",
            CoreError::InvalidCredentials => "INVALID_CREDENTIALS",
            CoreError::InvalidToken => "INVALID_TOKEN",
            CoreError::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_code_is_entity_agnostic() {
        let task = CoreError::EntityDoesNotExist("Task not found".to_string());
        let list = CoreError::EntityDoesNotExist("TaskList not found".to_string());

        assert_eq!(task.code(), list.code());
        assert_eq!(task.code(), "ENTITY_NOT_FOUND");
    }

    #[test]
    fn test_messages_are_preserved() {
        let err = CoreError::EntityAlreadyExists("The email is already in use".to_string());
        assert_eq!(err.to_string(), "The email is already in use");
        assert_eq!(err.code(), "ENTITY_IN_DB");

        let err = CoreError::InvalidFilter("unsupported operator `~`".to_string());
        assert_eq!(err.to_string(), "Invalid filter: unsupported operator `~`");
    }
}
