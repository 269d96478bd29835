use std::fmt;
use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityName, EntityTrait, IntoActiveModel, Iterable, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, Value,
};
use tracing::error;
use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::pagination::value_objects::{PageRequest, SortOrder};
use crate::infrastructure::repositories::filter::{FilterSet, Join};
use crate::infrastructure::repositories::registry::Filterable;

/// Stateless CRUD over one entity type. Every call takes the connection or
/// transaction of the current unit of work.
pub struct EntityRepository<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E> EntityRepository<E> {
    pub fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E> Default for EntityRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EntityRepository<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EntityRepository<E> {}

impl<E: EntityName + Default> fmt::Debug for EntityRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRepository")
            .field("table", &E::default().table_name())
            .finish()
    }
}

fn order(sort: SortOrder) -> Order {
    match sort {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

impl<E> EntityRepository<E>
where
    E: Filterable,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
{
    fn table() -> String {
        E::default().table_name().to_string()
    }

    fn db_error(action: &str, err: DbErr) -> CoreError {
        error!("Failed to {} {}: {}", action, Self::table(), err);

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                CoreError::Persistence(format!("unique constraint violated: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                CoreError::Persistence(format!("foreign key constraint violated: {detail}"))
            }
            _ => CoreError::Persistence(err.to_string()),
        }
    }

    fn not_found(entity_id: Uuid) -> CoreError {
        CoreError::EntityDoesNotExist(format!(
            "The {} with id {} not exist",
            Self::table(),
            entity_id
        ))
    }

    /// Persists a new record and returns it as stored.
    pub async fn create<C>(&self, schema: E::ActiveModel, db: &C) -> Result<E::Model, CoreError>
    where
        C: ConnectionTrait,
    {
        schema
            .insert(db)
            .await
            .map_err(|e| Self::db_error("create", e))
    }

    /// Fails with `EntityAlreadyExists` when a record already has `value` in
    /// `column`.
    pub async fn ensure_unique<C>(
        &self,
        column: E::Column,
        value: impl Into<Value> + Send,
        db: &C,
        message: &str,
    ) -> Result<(), CoreError>
    where
        C: ConnectionTrait,
    {
        match self
            .get_entity_by_args(column, value, db, &FilterSet::empty())
            .await?
        {
            Some(_) => Err(CoreError::EntityAlreadyExists(message.to_string())),
            None => Ok(()),
        }
    }

    pub async fn get_entity<C>(
        &self,
        filter: &FilterSet<E>,
        db: &C,
    ) -> Result<Vec<E::Model>, CoreError>
    where
        C: ConnectionTrait,
    {
        E::find()
            .filter(filter.condition(None))
            .order_by(E::default_order_column(), Order::Asc)
            .order_by(E::id_column(), Order::Asc)
            .all(db)
            .await
            .map_err(|e| Self::db_error("fetch", e))
    }

    pub async fn get_entity_by_id<C>(
        &self,
        entity_id: Uuid,
        filter: &FilterSet<E>,
        db: &C,
    ) -> Result<Option<E::Model>, CoreError>
    where
        C: ConnectionTrait,
    {
        E::find()
            .filter(E::id_column().eq(entity_id))
            .filter(filter.condition(None))
            .one(db)
            .await
            .map_err(|e| Self::db_error("fetch by id", e))
    }

    /// Like [`get_entity_by_id`](Self::get_entity_by_id) but a missing
    /// record is an `EntityDoesNotExist` error.
    pub async fn get_entity_by_id_or_fail<C>(
        &self,
        entity_id: Uuid,
        db: &C,
    ) -> Result<E::Model, CoreError>
    where
        C: ConnectionTrait,
    {
        self.get_entity_by_id(entity_id, &FilterSet::empty(), db)
            .await?
            .ok_or_else(|| Self::not_found(entity_id))
    }

    pub async fn get_entity_by_args<C>(
        &self,
        column: E::Column,
        value: impl Into<Value> + Send,
        db: &C,
        filter: &FilterSet<E>,
    ) -> Result<Option<E::Model>, CoreError>
    where
        C: ConnectionTrait,
    {
        E::find()
            .filter(column.eq(value))
            .filter(filter.condition(None))
            .one(db)
            .await
            .map_err(|e| Self::db_error("fetch by column", e))
    }

    /// One page of records matching `filter` (and having a row through
    /// `join`, if given), sorted on the default ordering column.
    pub async fn get_entity_page<C>(
        &self,
        filter: &FilterSet<E>,
        db: &C,
        page: &PageRequest,
        join: Option<Join>,
    ) -> Result<Vec<E::Model>, CoreError>
    where
        C: ConnectionTrait,
    {
        let direction = order(page.order_by);

        E::find()
            .filter(filter.condition(join))
            .order_by(E::default_order_column(), direction.clone())
            .order_by(E::id_column(), direction)
            .offset(page.offset)
            .limit(page.limit)
            .all(db)
            .await
            .map_err(|e| Self::db_error("paginate", e))
    }

    /// [`get_entity_page`](Self::get_entity_page) plus the number of records
    /// matching `filter` and `join`.
    pub async fn get_entity_pagination<C>(
        &self,
        filter: &FilterSet<E>,
        db: &C,
        page: &PageRequest,
        join: Option<Join>,
    ) -> Result<(Vec<E::Model>, u64), CoreError>
    where
        C: ConnectionTrait,
    {
        let items = self.get_entity_page(filter, db, page, join).await?;
        let count = E::find()
            .filter(filter.condition(join))
            .count(db)
            .await
            .map_err(|e| Self::db_error("count", e))?;

        Ok((items, count))
    }

    pub async fn count<C>(&self, db: &C) -> Result<u64, CoreError>
    where
        C: ConnectionTrait,
    {
        E::find()
            .count(db)
            .await
            .map_err(|e| Self::db_error("count", e))
    }

    pub async fn count_filtered<C>(&self, filter: &FilterSet<E>, db: &C) -> Result<u64, CoreError>
    where
        C: ConnectionTrait,
    {
        E::find()
            .filter(filter.condition(None))
            .count(db)
            .await
            .map_err(|e| Self::db_error("count", e))
    }

    /// Applies the `Set` fields of `changes` to the record and leaves every
    /// other column untouched.
    pub async fn update_entity<C>(
        &self,
        entity_id: Uuid,
        changes: E::ActiveModel,
        filter: &FilterSet<E>,
        db: &C,
    ) -> Result<E::Model, CoreError>
    where
        C: ConnectionTrait,
    {
        let current = self
            .get_entity_by_id(entity_id, filter, db)
            .await?
            .ok_or_else(|| Self::not_found(entity_id))?;

        let updates: Vec<(E::Column, Value)> = E::Column::iter()
            .filter_map(|column| match changes.get(column) {
                ActiveValue::Set(value) => Some((column, value)),
                _ => None,
            })
            .collect();

        if updates.is_empty() {
            return Ok(current);
        }

        let mut active: E::ActiveModel = current.into_active_model();
        for (column, value) in updates {
            active.set(column, value);
        }

        active
            .update(db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => Self::not_found(entity_id),
                other => Self::db_error("update", other),
            })
    }

    pub async fn delete_entity<C>(
        &self,
        entity_id: Uuid,
        filter: &FilterSet<E>,
        db: &C,
    ) -> Result<(), CoreError>
    where
        C: ConnectionTrait,
    {
        let result = E::delete_many()
            .filter(E::id_column().eq(entity_id))
            .filter(filter.condition(None))
            .exec(db)
            .await
            .map_err(|e| Self::db_error("delete", e))?;

        if result.rows_affected == 0 {
            return Err(Self::not_found(entity_id));
        }

        Ok(())
    }
}
