use serde::{Deserialize, Serialize};
use taskhub_core::domain::task::{
    entities::{Priority, TaskStatus},
    value_objects::{CreateTaskInput, UpdateTaskInput},
};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTaskValidator {
    #[serde(default)]
    pub id: Option<Uuid>,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    /// Level `1`-`5` or name such as `HIGH`.
    #[serde(default)]
    pub priority: Option<Priority>,

    #[serde(default)]
    pub user: Option<Uuid>,

    #[serde(default)]
    pub task_list_id: Option<Uuid>,

    #[validate(length(min = 3, max = 25, message = "title must be between 3 and 25 characters"))]
    pub title: String,

    #[validate(length(max = 255, message = "description must be at most 255 characters"))]
    pub description: String,
}

impl From<CreateTaskValidator> for CreateTaskInput {
    fn from(payload: CreateTaskValidator) -> Self {
        CreateTaskInput {
            id: payload.id,
            status: payload.status,
            priority: payload.priority,
            user: payload.user,
            task_list_id: payload.task_list_id,
            title: payload.title,
            description: payload.description,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskValidator {
    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub priority: Option<Priority>,

    #[serde(default)]
    pub user: Option<Uuid>,

    #[serde(default)]
    pub task_list_id: Option<Uuid>,

    #[serde(default)]
    #[validate(length(min = 3, max = 25, message = "title must be between 3 and 25 characters"))]
    pub title: Option<String>,

    #[serde(default)]
    #[validate(length(max = 255, message = "description must be at most 255 characters"))]
    pub description: Option<String>,
}

impl From<UpdateTaskValidator> for UpdateTaskInput {
    fn from(payload: UpdateTaskValidator) -> Self {
        UpdateTaskInput {
            status: payload.status,
            priority: payload.priority,
            user: payload.user,
            task_list_id: payload.task_list_id,
            title: payload.title,
            description: payload.description,
        }
    }
}
