use serde::{Deserialize, Serialize};
use taskhub_core::domain::task_list::value_objects::{CreateTaskListInput, UpdateTaskListInput};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTaskListValidator {
    #[serde(default)]
    pub id: Option<Uuid>,

    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: String,

    /// Existing tasks to move into the list.
    #[serde(default)]
    pub tasks: Vec<Uuid>,
}

impl From<CreateTaskListValidator> for CreateTaskListInput {
    fn from(payload: CreateTaskListValidator) -> Self {
        CreateTaskListInput {
            id: payload.id,
            name: payload.name,
            tasks: payload.tasks,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskListValidator {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: Option<String>,

    #[serde(default)]
    pub tasks: Option<Vec<Uuid>>,
}

impl From<UpdateTaskListValidator> for UpdateTaskListInput {
    fn from(payload: UpdateTaskListValidator) -> Self {
        UpdateTaskListInput {
            name: payload.name,
            tasks: payload.tasks,
        }
    }
}
