use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    pagination::value_objects::{ListQuery, PaginationWindow},
    task::{
        entities::Task,
        value_objects::{CreateTaskInput, UpdateTaskInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait TaskService: Send + Sync {
    fn get_tasks(
        &self,
        query: ListQuery,
    ) -> impl Future<Output = Result<PaginationWindow<Task>, CoreError>> + Send;

    fn get_task(&self, task_id: Uuid) -> impl Future<Output = Result<Task, CoreError>> + Send;

    fn create_task(
        &self,
        input: CreateTaskInput,
    ) -> impl Future<Output = Result<Task, CoreError>> + Send;

    fn update_task(
        &self,
        task_id: Uuid,
        input: UpdateTaskInput,
    ) -> impl Future<Output = Result<Task, CoreError>> + Send;

    fn delete_task(&self, task_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}
