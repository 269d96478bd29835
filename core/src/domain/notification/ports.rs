use crate::domain::{common::entities::app_errors::CoreError, task::entities::Task};

#[cfg_attr(test, mockall::automock)]
pub trait TaskNotifier: Send + Sync {
    fn notify_task_assigned(
        &self,
        recipient: String,
        task: Task,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
