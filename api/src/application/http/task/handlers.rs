pub mod create_task;
pub mod delete_task;
pub mod get_task;
pub mod get_tasks;
pub mod update_task;
