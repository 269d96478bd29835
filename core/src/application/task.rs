use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::services::Service,
    domain::{
        common::entities::app_errors::CoreError,
        crypto::ports::HasherRepository,
        notification::ports::TaskNotifier,
        pagination::value_objects::{ListQuery, PaginationWindow},
        task::{
            entities::Task,
            ports::TaskService,
            value_objects::{CreateTaskInput, UpdateTaskInput},
        },
    },
    entity::tasks,
    infrastructure::{
        repositories::FilterSet,
        task::mappers::{new_task_model, task_changes},
    },
};

impl<H, N> Service<H, N>
where
    H: HasherRepository,
    N: TaskNotifier,
{
    /// Tells the assignee about the task. Failures are logged only.
    async fn notify_assignee(&self, user_id: Uuid, task: &Task) {
        let user = self
            .user_repository
            .get_entity_by_id(user_id, &FilterSet::empty(), &self.db)
            .await;

        match user {
            Ok(Some(user)) => {
                if let Err(e) = self
                    .notifier
                    .notify_task_assigned(user.email, task.clone())
                    .await
                {
                    warn!(task_id = %task.id, "Failed to notify assignee: {}", e);
                }
            }
            Ok(None) => debug!(%user_id, "Assignee is not a registered user, no notification"),
            Err(e) => warn!(%user_id, "Failed to look up assignee: {}", e),
        }
    }
}

impl<H, N> TaskService for Service<H, N>
where
    H: HasherRepository,
    N: TaskNotifier,
{
    #[instrument(skip(self))]
    async fn get_tasks(&self, query: ListQuery) -> Result<PaginationWindow<Task>, CoreError> {
        self.pagination
            .build::<tasks::Entity, _, _>(&self.db, &query.filters, &query.page, Task::from)
            .await
    }

    #[instrument(skip(self))]
    async fn get_task(&self, task_id: Uuid) -> Result<Task, CoreError> {
        self.task_repository
            .get_entity_by_id_or_fail(task_id, &self.db)
            .await
            .map(Task::from)
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    async fn create_task(&self, input: CreateTaskInput) -> Result<Task, CoreError> {
        input.validate()?;

        let txn = self.begin().await?;

        if let Some(task_list_id) = input.task_list_id {
            self.task_list_repository
                .get_entity_by_id_or_fail(task_list_id, &txn)
                .await?;
        }

        let model = self
            .task_repository
            .create(new_task_model(input, Utc::now()), &txn)
            .await?;
        self.commit(txn).await?;

        let task = Task::from(model);
        info!(task_id = %task.id, "Task created");

        if let Some(user_id) = task.user {
            self.notify_assignee(user_id, &task).await;
        }

        Ok(task)
    }

    #[instrument(skip(self, input))]
    async fn update_task(&self, task_id: Uuid, input: UpdateTaskInput) -> Result<Task, CoreError> {
        input.validate()?;

        let txn = self.begin().await?;

        if let Some(task_list_id) = input.task_list_id {
            self.task_list_repository
                .get_entity_by_id_or_fail(task_list_id, &txn)
                .await?;
        }

        let model = self
            .task_repository
            .update_entity(
                task_id,
                task_changes(input, Utc::now()),
                &FilterSet::empty(),
                &txn,
            )
            .await?;
        self.commit(txn).await?;

        info!(task_id = %task_id, "Task updated");
        Ok(Task::from(model))
    }

    #[instrument(skip(self))]
    async fn delete_task(&self, task_id: Uuid) -> Result<(), CoreError> {
        let txn = self.begin().await?;
        self.task_repository
            .delete_entity(task_id, &FilterSet::empty(), &txn)
            .await?;
        self.commit(txn).await?;

        info!(task_id = %task_id, "Task deleted");
        Ok(())
    }
}
