pub mod create_task_list;
pub mod delete_task_list;
pub mod get_task_list;
pub mod get_task_lists;
pub mod update_task_list;
