use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel,
    LoaderTrait, QueryOrder, Related,
};
use tracing::error;

use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::pagination::value_objects::{PageRequest, PaginationWindow, TotalCountMode};
use crate::infrastructure::repositories::entity_repository::EntityRepository;
use crate::infrastructure::repositories::filter::{FilterSet, Join, compile};
use crate::infrastructure::repositories::registry::Filterable;

/// Wraps one page of an entity with its count metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationWindowBuilder {
    total_count: TotalCountMode,
}

impl PaginationWindowBuilder {
    pub fn new(total_count: TotalCountMode) -> Self {
        Self { total_count }
    }

    pub fn total_count(&self) -> TotalCountMode {
        self.total_count
    }

    pub async fn build<E, C, P>(
        &self,
        db: &C,
        filter_expression: &str,
        page: &PageRequest,
        projection: impl Fn(E::Model) -> P + Send,
    ) -> Result<PaginationWindow<P>, CoreError>
    where
        E: Filterable,
        E::Model: IntoActiveModel<E::ActiveModel> + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        C: ConnectionTrait,
        P: Send,
    {
        page.validate()?;
        let filter = compile::<E>(filter_expression)?;
        let repository = EntityRepository::<E>::new();

        let (records, total_items) = self.fetch_page(&repository, &filter, db, page, None).await?;

        let items = records.into_iter().map(projection).collect();
        Ok(PaginationWindow::new(items, total_items, page.offset))
    }

    /// Same as [`build`](Self::build) for an entity owning a child collection.
    /// Only parents with at least one child are listed. The children of the
    /// whole page are fetched in one query keyed by the parent ids, then
    /// handed to `projection` with their parent.
    pub async fn build_with_children<E, R, C, P>(
        &self,
        db: &C,
        filter_expression: &str,
        page: &PageRequest,
        projection: impl Fn(E::Model, Vec<R::Model>) -> P + Send,
    ) -> Result<PaginationWindow<P>, CoreError>
    where
        E: Filterable + Related<R>,
        E::Model: IntoActiveModel<E::ActiveModel> + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        R: Filterable + 'static,
        R::Model: Send + Sync,
        C: ConnectionTrait,
        P: Send,
    {
        page.validate()?;
        let filter = compile::<E>(filter_expression)?;
        let repository = EntityRepository::<E>::new();

        let join = E::field_map()
            .join_to::<R>()
            .unwrap_or_else(|| Join::to::<E, R>(std::any::type_name::<R>()));
        let (parents, total_items) = self
            .fetch_page(&repository, &filter, db, page, Some(join))
            .await?;

        let children = parents
            .load_many(
                R::find()
                    .order_by_asc(R::default_order_column())
                    .order_by_asc(R::id_column()),
                db,
            )
            .await
            .map_err(|e| {
                error!("Failed to load child collections: {}", e);
                CoreError::Persistence(e.to_string())
            })?;

        let items = parents
            .into_iter()
            .zip(children)
            .map(|(parent, children)| projection(parent, children))
            .collect();

        Ok(PaginationWindow::new(items, total_items, page.offset))
    }

    /// The page plus `total_items`: the count of the whole entity type, or
    /// of the filtered and joined rows, depending on the mode.
    async fn fetch_page<E, C>(
        &self,
        repository: &EntityRepository<E>,
        filter: &FilterSet<E>,
        db: &C,
        page: &PageRequest,
        join: Option<Join>,
    ) -> Result<(Vec<E::Model>, u64), CoreError>
    where
        E: Filterable,
        E::Model: IntoActiveModel<E::ActiveModel> + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        C: ConnectionTrait,
    {
        match self.total_count {
            TotalCountMode::Filtered => {
                repository
                    .get_entity_pagination(filter, db, page, join)
                    .await
            }
            TotalCountMode::Unfiltered => {
                let records = repository.get_entity_page(filter, db, page, join).await?;
                let total = repository.count(db).await?;
                Ok((records, total))
            }
        }
    }
}
