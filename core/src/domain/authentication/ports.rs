use crate::domain::{
    authentication::entities::Token, common::entities::app_errors::CoreError,
    user::entities::User,
};

#[cfg_attr(test, mockall::automock)]
pub trait AuthService: Send + Sync {
    fn authenticate(
        &self,
        email: String,
        password: String,
    ) -> impl Future<Output = Result<Token, CoreError>> + Send;

    fn authorize(&self, token: String) -> impl Future<Output = Result<User, CoreError>> + Send;
}
