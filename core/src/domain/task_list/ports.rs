use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    pagination::value_objects::{ListQuery, PaginationWindow},
    task_list::{
        entities::TaskList,
        value_objects::{CreateTaskListInput, UpdateTaskListInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait TaskListService: Send + Sync {
    fn get_task_lists(
        &self,
        query: ListQuery,
    ) -> impl Future<Output = Result<PaginationWindow<TaskList>, CoreError>> + Send;

    fn get_task_list(
        &self,
        task_list_id: Uuid,
    ) -> impl Future<Output = Result<TaskList, CoreError>> + Send;

    fn create_task_list(
        &self,
        input: CreateTaskListInput,
    ) -> impl Future<Output = Result<TaskList, CoreError>> + Send;

    fn update_task_list(
        &self,
        task_list_id: Uuid,
        input: UpdateTaskListInput,
    ) -> impl Future<Output = Result<TaskList, CoreError>> + Send;

    fn delete_task_list(
        &self,
        task_list_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
