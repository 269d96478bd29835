pub mod crypto;
pub mod db;
pub mod jwt;
pub mod notification;
pub mod repositories;
pub mod task;
pub mod task_list;
pub mod user;
