use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::task::entities::{Priority, TaskStatus};

pub const TITLE_MIN_LENGTH: usize = 3;
pub const TITLE_MAX_LENGTH: usize = 25;
pub const DESCRIPTION_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateTaskInput {
    pub id: Option<Uuid>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub user: Option<Uuid>,
    pub task_list_id: Option<Uuid>,
    pub title: String,
    pub description: String,
}

impl CreateTaskInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        validate_description(&self.description)
    }
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateTaskInput {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub user: Option<Uuid>,
    pub task_list_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl UpdateTaskInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.chars().count();
    if !(TITLE_MIN_LENGTH..=TITLE_MAX_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "title must be between {TITLE_MIN_LENGTH} and {TITLE_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > DESCRIPTION_MAX_LENGTH {
        return Err(CoreError::Validation(format!(
            "description must be at most {DESCRIPTION_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}
