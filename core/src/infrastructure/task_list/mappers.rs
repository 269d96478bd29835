use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};

use crate::domain::common::generate_uuid_v7;
use crate::domain::task::entities::Task;
use crate::domain::task_list::entities::TaskList;
use crate::entity::task_list::{ActiveModel as TaskListActiveModel, Model as TaskListModel};
use crate::entity::tasks::Model as TaskModel;

impl TaskList {
    /// Builds the list from records already read from the store, without
    /// re-validating them.
    pub fn from_models(model: TaskListModel, tasks: Vec<TaskModel>) -> Self {
        TaskList {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
            tasks: tasks.into_iter().map(Task::from).collect(),
        }
    }
}

pub fn new_task_list_model(
    id: Option<uuid::Uuid>,
    name: String,
    now: DateTime<Utc>,
) -> TaskListActiveModel {
    TaskListActiveModel {
        id: Set(id.unwrap_or_else(generate_uuid_v7)),
        name: Set(name),
        created_at: Set(now),
        updated_at: Set(None),
    }
}

pub fn task_list_changes(name: Option<String>, now: DateTime<Utc>) -> TaskListActiveModel {
    TaskListActiveModel {
        id: NotSet,
        name: name.map_or(NotSet, Set),
        created_at: NotSet,
        updated_at: Set(Some(now)),
    }
}
