use std::sync::LazyLock;

use sea_orm::EntityTrait;

use crate::domain::task::entities::{Priority, TaskStatus};
use crate::entity::{task_list, tasks, users};
use crate::infrastructure::repositories::filter::{FieldKind, FieldMap};

/// Entity type descriptor: filterable attributes, identifier column and the
/// column pages are sorted by.
pub trait Filterable: EntityTrait {
    fn field_map() -> &'static FieldMap<Self>;

    fn id_column() -> Self::Column;

    fn default_order_column() -> Self::Column;
}

static TASK_FIELDS: LazyLock<FieldMap<tasks::Entity>> = LazyLock::new(|| {
    FieldMap::new()
        .field("id", tasks::Column::Id, FieldKind::Uuid)
        .field("status", tasks::Column::Status, FieldKind::Enum(TaskStatus::filter_value))
        .field("priority", tasks::Column::Priority, FieldKind::Enum(Priority::filter_value))
        .field("user", tasks::Column::User, FieldKind::Uuid)
        .field("created_at", tasks::Column::CreatedAt, FieldKind::Timestamp)
        .field("updated_at", tasks::Column::UpdatedAt, FieldKind::Timestamp)
        .field("task_list_id", tasks::Column::TaskListId, FieldKind::Uuid)
        .field("title", tasks::Column::Title, FieldKind::Text)
        .field("description", tasks::Column::Description, FieldKind::Text)
        .relation::<task_list::Entity>("task_list", |relation| {
            relation
                .field("id", task_list::Column::Id, FieldKind::Uuid)
                .field("name", task_list::Column::Name, FieldKind::Text)
                .field("created_at", task_list::Column::CreatedAt, FieldKind::Timestamp)
                .field("updated_at", task_list::Column::UpdatedAt, FieldKind::Timestamp)
        })
});

static TASK_LIST_FIELDS: LazyLock<FieldMap<task_list::Entity>> = LazyLock::new(|| {
    FieldMap::new()
        .field("id", task_list::Column::Id, FieldKind::Uuid)
        .field("name", task_list::Column::Name, FieldKind::Text)
        .field("created_at", task_list::Column::CreatedAt, FieldKind::Timestamp)
        .field("updated_at", task_list::Column::UpdatedAt, FieldKind::Timestamp)
        .relation::<tasks::Entity>("tasks", |relation| {
            relation
                .field("id", tasks::Column::Id, FieldKind::Uuid)
                .field("status", tasks::Column::Status, FieldKind::Enum(TaskStatus::filter_value))
                .field("priority", tasks::Column::Priority, FieldKind::Enum(Priority::filter_value))
                .field("user", tasks::Column::User, FieldKind::Uuid)
                .field("title", tasks::Column::Title, FieldKind::Text)
                .field("description", tasks::Column::Description, FieldKind::Text)
                .field("created_at", tasks::Column::CreatedAt, FieldKind::Timestamp)
                .field("updated_at", tasks::Column::UpdatedAt, FieldKind::Timestamp)
        })
});

static USER_FIELDS: LazyLock<FieldMap<users::Entity>> = LazyLock::new(|| {
    FieldMap::new()
        .field("id", users::Column::Id, FieldKind::Uuid)
        .field("full_name", users::Column::FullName, FieldKind::Text)
        .field("email", users::Column::Email, FieldKind::Text)
        .field("created_at", users::Column::CreatedAt, FieldKind::Timestamp)
        .field("updated_at", users::Column::UpdatedAt, FieldKind::Timestamp)
});

impl Filterable for tasks::Entity {
    fn field_map() -> &'static FieldMap<Self> {
        &TASK_FIELDS
    }

    fn id_column() -> Self::Column {
        tasks::Column::Id
    }

    fn default_order_column() -> Self::Column {
        tasks::Column::CreatedAt
    }
}

impl Filterable for task_list::Entity {
    fn field_map() -> &'static FieldMap<Self> {
        &TASK_LIST_FIELDS
    }

    fn id_column() -> Self::Column {
        task_list::Column::Id
    }

    fn default_order_column() -> Self::Column {
        task_list::Column::CreatedAt
    }
}

impl Filterable for users::Entity {
    fn field_map() -> &'static FieldMap<Self> {
        &USER_FIELDS
    }

    fn id_column() -> Self::Column {
        users::Column::Id
    }

    fn default_order_column() -> Self::Column {
        users::Column::CreatedAt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_resolves_declared_attributes() {
        let fields = tasks::Entity::field_map();

        assert!(fields.get("status").is_some());
        assert!(fields.get("title").is_some());
        assert!(fields.get("nonexistent_attr").is_none());
        assert_eq!(
            fields.join_to::<task_list::Entity>().map(|j| j.name()),
            Some("task_list")
        );
    }

    #[test]
    fn test_join_to_related_entity() {
        let join = task_list::Entity::field_map().join_to::<tasks::Entity>();

        assert_eq!(join.map(|j| j.name()), Some("tasks"));
        assert!(tasks::Entity::field_map().join_to::<users::Entity>().is_none());
    }

    #[test]
    fn test_users_hide_password_hash() {
        assert!(users::Entity::field_map().get("password_hash").is_none());
        assert!(users::Entity::field_map().get("email").is_some());
    }
}
