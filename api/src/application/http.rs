pub mod health;
pub mod query_params;
pub mod server;
pub mod task;
pub mod task_list;
pub mod user;
