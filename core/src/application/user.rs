use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::{
    application::services::Service,
    domain::{
        authentication::{entities::Token, ports::AuthService},
        common::entities::app_errors::CoreError,
        crypto::ports::HasherRepository,
        notification::ports::TaskNotifier,
        user::{entities::User, ports::UserService, value_objects::RegisterUserInput},
    },
    entity::users,
    infrastructure::{repositories::FilterSet, user::mappers::new_user_model},
};

impl<H, N> Service<H, N>
where
    H: HasherRepository,
    N: TaskNotifier,
{
    async fn find_user_by_email(&self, email: &str) -> Result<Option<users::Model>, CoreError> {
        self.user_repository
            .get_entity_by_args(
                users::Column::Email,
                email.to_string(),
                &self.db,
                &FilterSet::empty(),
            )
            .await
    }
}

impl<H, N> UserService for Service<H, N>
where
    H: HasherRepository,
    N: TaskNotifier,
{
    #[instrument(skip(self, input), fields(email = %input.email))]
    async fn register_user(&self, input: RegisterUserInput) -> Result<User, CoreError> {
        input.validate()?;

        let txn = self.begin().await?;

        self.user_repository
            .ensure_unique(
                users::Column::Email,
                input.email.clone(),
                &txn,
                &format!("The user with email {} already exists", input.email),
            )
            .await?;

        let password_hash = self.hasher.hash_password(&input.password)?;
        let model = self
            .user_repository
            .create(
                new_user_model(input.full_name, input.email, password_hash, Utc::now()),
                &txn,
            )
            .await?;
        self.commit(txn).await?;

        info!(user_id = %model.id, "User registered");
        Ok(User::from(model))
    }

    #[instrument(skip(self))]
    async fn get_user_by_email(&self, email: String) -> Result<User, CoreError> {
        self.find_user_by_email(&email)
            .await?
            .map(User::from)
            .ok_or_else(|| {
                CoreError::EntityDoesNotExist(format!("The user with email {email} not exist"))
            })
    }
}

impl<H, N> AuthService for Service<H, N>
where
    H: HasherRepository,
    N: TaskNotifier,
{
    #[instrument(skip(self, password))]
    async fn authenticate(&self, email: String, password: String) -> Result<Token, CoreError> {
        let Some(user) = self.find_user_by_email(&email).await? else {
            warn!("Login attempt for unknown email");
            return Err(CoreError::InvalidCredentials);
        };

        if !self.hasher.verify_password(&password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(CoreError::InvalidCredentials);
        }

        let access_token = self.jwt.issue(&user.email)?;
        Ok(Token::bearer(access_token))
    }

    #[instrument(skip(self, token))]
    async fn authorize(&self, token: String) -> Result<User, CoreError> {
        let claims = self.jwt.verify(&token)?;

        self.get_user_by_email(claims.sub)
            .await
            .map_err(|_| CoreError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::crypto::ports::MockHasherRepository;
    use crate::infrastructure::notification::MailNotifier;
    use crate::test_support::{setup_db, test_config, test_service};

    fn register_input(email: &str) -> RegisterUserInput {
        RegisterUserInput {
            full_name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            password: "Secret#123".to_string(),
            password2: "Secret#123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_fetch_by_email() {
        let service = test_service().await;

        let user = service
            .register_user(register_input("ada@example.com"))
            .await
            .unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert_eq!(
            service
                .get_user_by_email("ada@example.com".to_string())
                .await
                .unwrap(),
            user
        );
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let service = test_service().await;
        service
            .register_user(register_input("ada@example.com"))
            .await
            .unwrap();

        let err = service
            .register_user(register_input("ada@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "ENTITY_IN_DB");
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_passwords() {
        let service = test_service().await;

        let err = service
            .register_user(RegisterUserInput {
                password2: "Secret#124".to_string(),
                ..register_input("ada@example.com")
            })
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::Validation("Passwords do not match".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_user_by_email() {
        let service = test_service().await;

        let err = service
            .get_user_by_email("nobody@example.com".to_string())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::EntityDoesNotExist(
                "The user with email nobody@example.com not exist".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_authenticate_and_authorize() {
        let service = test_service().await;
        let user = service
            .register_user(register_input("ada@example.com"))
            .await
            .unwrap();

        let token = service
            .authenticate("ada@example.com".to_string(), "Secret#123".to_string())
            .await
            .unwrap();
        assert_eq!(token.token_type, "bearer");

        let authorized = service.authorize(token.access_token).await.unwrap();
        assert_eq!(authorized, user);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_bad_credentials() {
        let service = test_service().await;
        service
            .register_user(register_input("ada@example.com"))
            .await
            .unwrap();

        let err = service
            .authenticate("ada@example.com".to_string(), "Secret#124".to_string())
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::InvalidCredentials);

        let err = service
            .authenticate("bob@example.com".to_string(), "Secret#123".to_string())
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_authorize_rejects_token_of_deleted_subject() {
        let service = test_service().await;
        let token = service.jwt.issue("ghost@example.com").unwrap();

        assert_eq!(
            service.authorize(token).await.unwrap_err(),
            CoreError::InvalidToken
        );
        assert_eq!(
            service.authorize("garbage".to_string()).await.unwrap_err(),
            CoreError::InvalidToken
        );
    }

    #[tokio::test]
    async fn test_register_stores_hashed_password() {
        let config = test_config();
        let mut hasher = MockHasherRepository::new();
        hasher
            .expect_hash_password()
            .times(1)
            .returning(|password| Ok(format!("hashed:{password}")));

        let service = Service::new(
            setup_db().await,
            hasher,
            MailNotifier::new(config.mail.clone()),
            &config,
        );
        let user = service
            .register_user(register_input("ada@example.com"))
            .await
            .unwrap();

        let stored = service
            .find_user_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, user.id);
        assert_eq!(stored.password_hash, "hashed:Secret#123");
    }
}
