pub mod authentication;
pub mod common;
pub mod crypto;
pub mod filter;
pub mod health;
pub mod notification;
pub mod pagination;
pub mod task;
pub mod task_list;
pub mod user;
