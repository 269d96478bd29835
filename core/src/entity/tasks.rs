use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{Priority, TaskStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub status: TaskStatus,
    pub priority: Priority,
    pub user: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    pub task_list_id: Option<Uuid>,
    #[sea_orm(column_type = "String(StringLen::N(25))")]
    pub title: String,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::task_list::Entity",
        from = "Column::TaskListId",
        to = "super::task_list::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    TaskList,
}

impl Related<super::task_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaskList.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
