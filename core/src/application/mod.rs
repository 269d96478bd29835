use crate::{
    domain::common::TaskhubConfig,
    infrastructure::{
        crypto::Argon2HasherRepository,
        db::postgres::{Postgres, PostgresConfig},
        notification::MailNotifier,
    },
};

pub mod health;
pub mod services;
pub mod task;
pub mod task_list;
pub mod user;

pub use services::Service;

pub type TaskhubService = Service<Argon2HasherRepository, MailNotifier>;

pub async fn create_service(config: TaskhubConfig) -> Result<TaskhubService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url.clone(),
    })
    .await?;

    let notifier = MailNotifier::new(config.mail.clone());

    Ok(Service::new(
        postgres.get_db(),
        Argon2HasherRepository::new(),
        notifier,
        &config,
    ))
}
