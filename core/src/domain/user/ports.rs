use crate::domain::{
    common::entities::app_errors::CoreError,
    user::{entities::User, value_objects::RegisterUserInput},
};

#[cfg_attr(test, mockall::automock)]
pub trait UserService: Send + Sync {
    fn register_user(
        &self,
        input: RegisterUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn get_user_by_email(
        &self,
        email: String,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;
}
