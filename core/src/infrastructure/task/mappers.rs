use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};

use crate::domain::common::generate_uuid_v7;
use crate::domain::task::{
    entities::Task,
    value_objects::{CreateTaskInput, UpdateTaskInput},
};
use crate::entity::tasks::{ActiveModel as TaskActiveModel, Model as TaskModel};

impl From<TaskModel> for Task {
    fn from(model: TaskModel) -> Self {
        Task {
            id: model.id,
            status: model.status,
            priority: model.priority,
            user: model.user,
            created_at: model.created_at,
            updated_at: model.updated_at,
            task_list_id: model.task_list_id,
            title: model.title,
            description: model.description,
        }
    }
}

pub fn new_task_model(input: CreateTaskInput, now: DateTime<Utc>) -> TaskActiveModel {
    TaskActiveModel {
        id: Set(input.id.unwrap_or_else(generate_uuid_v7)),
        status: Set(input.status.unwrap_or_default()),
        priority: Set(input.priority.unwrap_or_default()),
        user: Set(input.user),
        created_at: Set(now),
        updated_at: Set(None),
        task_list_id: Set(input.task_list_id),
        title: Set(input.title),
        description: Set(input.description),
    }
}

/// Only the fields present in `input` are `Set`.
pub fn task_changes(input: UpdateTaskInput, now: DateTime<Utc>) -> TaskActiveModel {
    TaskActiveModel {
        id: NotSet,
        status: input.status.map_or(NotSet, Set),
        priority: input.priority.map_or(NotSet, Set),
        user: input.user.map_or(NotSet, |user| Set(Some(user))),
        created_at: NotSet,
        updated_at: Set(Some(now)),
        task_list_id: input.task_list_id.map_or(NotSet, |id| Set(Some(id))),
        title: input.title.map_or(NotSet, Set),
        description: input.description.map_or(NotSet, Set),
    }
}
