pub use super::task_list::Entity as TaskList;
pub use super::tasks::Entity as Tasks;
pub use super::users::Entity as Users;
