pub mod get_me;
pub mod issue_token;
pub mod register_user;
