use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;

pub const NAME_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateTaskListInput {
    pub id: Option<Uuid>,
    pub name: String,
    /// Existing tasks moved into the new list.
    pub tasks: Vec<Uuid>,
}

impl CreateTaskListInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_name(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateTaskListInput {
    pub name: Option<String>,
    pub tasks: Option<Vec<Uuid>>,
}

impl UpdateTaskListInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if len == 0 || len > NAME_MAX_LENGTH {
        return Err(CoreError::Validation(format!(
            "name must be between 1 and {NAME_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}
