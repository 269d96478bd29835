use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::error;

use crate::{
    domain::{
        common::{TaskhubConfig, entities::app_errors::CoreError},
        crypto::ports::HasherRepository,
        notification::ports::TaskNotifier,
    },
    entity::{task_list, tasks, users},
    infrastructure::{
        jwt::JwtCodec,
        repositories::{EntityRepository, PaginationWindowBuilder},
    },
};

/// Application service behind every port. Repositories are stateless and
/// receive the connection or transaction of the running unit of work.
pub struct Service<H, N>
where
    H: HasherRepository,
    N: TaskNotifier,
{
    pub(crate) db: DatabaseConnection,
    pub(crate) hasher: Arc<H>,
    pub(crate) notifier: Arc<N>,
    pub(crate) jwt: JwtCodec,
    pub(crate) pagination: PaginationWindowBuilder,
    pub(crate) task_repository: EntityRepository<tasks::Entity>,
    pub(crate) task_list_repository: EntityRepository<task_list::Entity>,
    pub(crate) user_repository: EntityRepository<users::Entity>,
}

impl<H, N> Service<H, N>
where
    H: HasherRepository,
    N: TaskNotifier,
{
    pub fn new(db: DatabaseConnection, hasher: H, notifier: N, config: &TaskhubConfig) -> Self {
        Self {
            db,
            hasher: Arc::new(hasher),
            notifier: Arc::new(notifier),
            jwt: JwtCodec::new(&config.auth),
            pagination: PaginationWindowBuilder::new(config.pagination.total_count),
            task_repository: EntityRepository::new(),
            task_list_repository: EntityRepository::new(),
            user_repository: EntityRepository::new(),
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub(crate) async fn begin(&self) -> Result<DatabaseTransaction, CoreError> {
        self.db.begin().await.map_err(|e| {
            error!("Failed to open transaction: {}", e);
            CoreError::Persistence(e.to_string())
        })
    }

    pub(crate) async fn commit(&self, txn: DatabaseTransaction) -> Result<(), CoreError> {
        txn.commit().await.map_err(|e| {
            error!("Failed to commit transaction: {}", e);
            CoreError::Persistence(e.to_string())
        })
    }
}

impl<H, N> Clone for Service<H, N>
where
    H: HasherRepository,
    N: TaskNotifier,
{
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            hasher: Arc::clone(&self.hasher),
            notifier: Arc::clone(&self.notifier),
            jwt: self.jwt.clone(),
            pagination: self.pagination,
            task_repository: self.task_repository,
            task_list_repository: self.task_list_repository,
            user_repository: self.user_repository,
        }
    }
}
