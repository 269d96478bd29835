use chrono::Utc;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{
    application::services::Service,
    domain::{
        common::entities::app_errors::CoreError,
        crypto::ports::HasherRepository,
        notification::ports::TaskNotifier,
        pagination::value_objects::{ListQuery, PaginationWindow},
        task_list::{
            entities::TaskList,
            ports::TaskListService,
            value_objects::{CreateTaskListInput, UpdateTaskListInput},
        },
    },
    entity::{task_list, tasks},
    infrastructure::{
        repositories::FilterSet,
        task_list::mappers::{new_task_list_model, task_list_changes},
    },
};

fn name_taken(name: &str) -> String {
    format!("The task list with name {name} already exists")
}

impl<H, N> Service<H, N>
where
    H: HasherRepository,
    N: TaskNotifier,
{
    async fn with_tasks<C>(&self, model: task_list::Model, db: &C) -> Result<TaskList, CoreError>
    where
        C: ConnectionTrait,
    {
        let tasks = model
            .find_related(tasks::Entity)
            .order_by_asc(tasks::Column::CreatedAt)
            .order_by_asc(tasks::Column::Id)
            .all(db)
            .await
            .map_err(|e| {
                error!("Failed to load tasks of list {}: {}", model.id, e);
                CoreError::Persistence(e.to_string())
            })?;

        Ok(TaskList::from_models(model, tasks))
    }

    /// Moves existing tasks into the list. Every id must exist.
    async fn attach_tasks<C>(
        &self,
        task_list_id: Uuid,
        task_ids: &[Uuid],
        db: &C,
    ) -> Result<(), CoreError>
    where
        C: ConnectionTrait,
    {
        if task_ids.is_empty() {
            return Ok(());
        }

        for task_id in task_ids {
            self.task_repository
                .get_entity_by_id_or_fail(*task_id, db)
                .await?;
        }

        tasks::Entity::update_many()
            .col_expr(tasks::Column::TaskListId, Expr::value(task_list_id))
            .col_expr(tasks::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(tasks::Column::Id.is_in(task_ids.iter().copied()))
            .exec(db)
            .await
            .map_err(|e| {
                error!("Failed to attach tasks to list {}: {}", task_list_id, e);
                CoreError::Persistence(e.to_string())
            })?;

        Ok(())
    }
}

impl<H, N> TaskListService for Service<H, N>
where
    H: HasherRepository,
    N: TaskNotifier,
{
    #[instrument(skip(self))]
    async fn get_task_lists(
        &self,
        query: ListQuery,
    ) -> Result<PaginationWindow<TaskList>, CoreError> {
        self.pagination
            .build_with_children::<task_list::Entity, tasks::Entity, _, _>(
                &self.db,
                &query.filters,
                &query.page,
                TaskList::from_models,
            )
            .await
    }

    #[instrument(skip(self))]
    async fn get_task_list(&self, task_list_id: Uuid) -> Result<TaskList, CoreError> {
        let model = self
            .task_list_repository
            .get_entity_by_id_or_fail(task_list_id, &self.db)
            .await?;

        self.with_tasks(model, &self.db).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create_task_list(&self, input: CreateTaskListInput) -> Result<TaskList, CoreError> {
        input.validate()?;

        let txn = self.begin().await?;

        self.task_list_repository
            .ensure_unique(
                task_list::Column::Name,
                input.name.clone(),
                &txn,
                &name_taken(&input.name),
            )
            .await?;

        let model = self
            .task_list_repository
            .create(new_task_list_model(input.id, input.name, Utc::now()), &txn)
            .await?;
        self.attach_tasks(model.id, &input.tasks, &txn).await?;

        let task_list = self.with_tasks(model, &txn).await?;
        self.commit(txn).await?;

        info!(task_list_id = %task_list.id, "Task list created");
        Ok(task_list)
    }

    #[instrument(skip(self, input))]
    async fn update_task_list(
        &self,
        task_list_id: Uuid,
        input: UpdateTaskListInput,
    ) -> Result<TaskList, CoreError> {
        input.validate()?;

        let txn = self.begin().await?;

        if let Some(name) = &input.name {
            let existing = self
                .task_list_repository
                .get_entity_by_args(task_list::Column::Name, name.clone(), &txn, &FilterSet::empty())
                .await?;

            if existing.is_some_and(|other| other.id != task_list_id) {
                return Err(CoreError::EntityAlreadyExists(name_taken(name)));
            }
        }

        let model = self
            .task_list_repository
            .update_entity(
                task_list_id,
                task_list_changes(input.name, Utc::now()),
                &FilterSet::empty(),
                &txn,
            )
            .await?;

        if let Some(task_ids) = &input.tasks {
            self.attach_tasks(task_list_id, task_ids, &txn).await?;
        }

        let task_list = self.with_tasks(model, &txn).await?;
        self.commit(txn).await?;

        info!(task_list_id = %task_list_id, "Task list updated");
        Ok(task_list)
    }

    #[instrument(skip(self))]
    async fn delete_task_list(&self, task_list_id: Uuid) -> Result<(), CoreError> {
        let txn = self.begin().await?;
        self.task_list_repository
            .delete_entity(task_list_id, &FilterSet::empty(), &txn)
            .await?;
        self.commit(txn).await?;

        info!(task_list_id = %task_list_id, "Task list deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::value_objects::{PageRequest, SortOrder};
    use crate::domain::task::{
        entities::{Priority, TaskStatus},
        ports::TaskService,
    };
    use crate::test_support::{at, insert_task, insert_task_list, test_service};

    fn create_input(name: &str, tasks: Vec<Uuid>) -> CreateTaskListInput {
        CreateTaskListInput {
            id: None,
            name: name.to_string(),
            tasks,
        }
    }

    #[tokio::test]
    async fn test_create_task_list_attaches_tasks() {
        let service = test_service().await;
        let first = insert_task(&service.db, "First", TaskStatus::New, Priority::Low, at(1), None).await;
        let second = insert_task(&service.db, "Second", TaskStatus::New, Priority::Low, at(2), None).await;

        let task_list = service
            .create_task_list(create_input("Chores", vec![first.id, second.id]))
            .await
            .unwrap();

        assert_eq!(task_list.name, "Chores");
        let ids: Vec<Uuid> = task_list.tasks.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert!(
            task_list
                .tasks
                .iter()
                .all(|task| task.task_list_id == Some(task_list.id))
        );
    }

    #[tokio::test]
    async fn test_create_task_list_with_unknown_task_rolls_back() {
        let service = test_service().await;

        let err = service
            .create_task_list(create_input("Chores", vec![Uuid::now_v7()]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ENTITY_NOT_FOUND");

        let window = service.get_task_lists(ListQuery::default()).await.unwrap();
        assert!(window.items.is_empty());
        assert_eq!(window.total_items, 0);
    }

    #[tokio::test]
    async fn test_task_list_name_is_unique() {
        let service = test_service().await;
        service
            .create_task_list(create_input("Chores", vec![]))
            .await
            .unwrap();

        let err = service
            .create_task_list(create_input("Chores", vec![]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ENTITY_IN_DB");

        let other = service
            .create_task_list(create_input("Errands", vec![]))
            .await
            .unwrap();
        let err = service
            .update_task_list(
                other.id,
                UpdateTaskListInput {
                    name: Some("Chores".to_string()),
                    tasks: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ENTITY_IN_DB");
    }

    #[tokio::test]
    async fn test_update_task_list_keeps_own_name() {
        let service = test_service().await;
        let created = service
            .create_task_list(create_input("Chores", vec![]))
            .await
            .unwrap();
        let task = insert_task(&service.db, "Laundry", TaskStatus::New, Priority::Low, at(1), None).await;

        let updated = service
            .update_task_list(
                created.id,
                UpdateTaskListInput {
                    name: Some("Chores".to_string()),
                    tasks: Some(vec![task.id]),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Chores");
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.tasks.len(), 1);
        assert_eq!(updated.tasks[0].id, task.id);
    }

    #[tokio::test]
    async fn test_get_task_lists_rehydrates_tasks_and_skips_empty_lists() {
        let service = test_service().await;
        let home = insert_task_list(&service.db, "Home", at(0)).await;
        let work = insert_task_list(&service.db, "Work", at(1)).await;
        insert_task(&service.db, "Dishes", TaskStatus::New, Priority::Low, at(2), Some(home.id)).await;
        insert_task(&service.db, "Laundry", TaskStatus::New, Priority::Low, at(3), Some(home.id)).await;

        let window = service
            .get_task_lists(ListQuery {
                filters: String::new(),
                page: PageRequest::new(10, 0, SortOrder::Asc),
            })
            .await
            .unwrap();

        assert_eq!(window.total_items, 2);
        assert_eq!(window.items.len(), 1);
        assert_eq!(window.items[0].id, home.id);
        assert_eq!(window.items[0].tasks.len(), 2);
        assert!(window.items.iter().all(|list| list.id != work.id));
    }

    #[tokio::test]
    async fn test_delete_task_list_cascades() {
        let service = test_service().await;
        let home = insert_task_list(&service.db, "Home", at(0)).await;
        let task = insert_task(&service.db, "Dishes", TaskStatus::New, Priority::Low, at(1), Some(home.id)).await;

        service.delete_task_list(home.id).await.unwrap();

        assert_eq!(
            service.get_task_list(home.id).await.unwrap_err().code(),
            "ENTITY_NOT_FOUND"
        );
        assert_eq!(
            service.get_task(task.id).await.unwrap_err().code(),
            "ENTITY_NOT_FOUND"
        );
        assert_eq!(
            service.delete_task_list(home.id).await.unwrap_err().code(),
            "ENTITY_NOT_FOUND"
        );
    }
}
