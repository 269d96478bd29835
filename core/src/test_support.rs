use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema, Set};
use uuid::Uuid;

use crate::application::Service;
use crate::domain::common::{
    AuthConfig, DatabaseConfig, MailConfig, PaginationConfig, TaskhubConfig, generate_uuid_v7,
};
use crate::domain::task::entities::{Priority, TaskStatus};
use crate::entity::{task_list, tasks, users};
use crate::infrastructure::{crypto::Argon2HasherRepository, notification::MailNotifier};

pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    db.execute(backend.build(&schema.create_table_from_entity(users::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(task_list::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(tasks::Entity)))
        .await
        .unwrap();

    db
}

/// Fixed base time so that fixtures sort deterministically.
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub async fn insert_task(
    db: &DatabaseConnection,
    title: &str,
    status: TaskStatus,
    priority: Priority,
    created_at: DateTime<Utc>,
    task_list_id: Option<Uuid>,
) -> tasks::Model {
    tasks::ActiveModel {
        id: Set(generate_uuid_v7()),
        status: Set(status),
        priority: Set(priority),
        user: Set(None),
        created_at: Set(created_at),
        updated_at: Set(None),
        task_list_id: Set(task_list_id),
        title: Set(title.to_string()),
        description: Set(format!("{title} description")),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn insert_task_list(
    db: &DatabaseConnection,
    name: &str,
    created_at: DateTime<Utc>,
) -> task_list::Model {
    task_list::ActiveModel {
        id: Set(generate_uuid_v7()),
        name: Set(name.to_string()),
        created_at: Set(created_at),
        updated_at: Set(None),
    }
    .insert(db)
    .await
    .unwrap()
}

pub fn test_config() -> TaskhubConfig {
    TaskhubConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
        },
        auth: AuthConfig {
            jwt_secret: "test-secret".to_string(),
            access_token_expire_minutes: 30,
        },
        mail: MailConfig {
            from: "noreply@example.com".to_string(),
            suppress_send: true,
        },
        pagination: PaginationConfig::default(),
    }
}

pub async fn test_service() -> Service<Argon2HasherRepository, MailNotifier> {
    let config = test_config();
    Service::new(
        setup_db().await,
        Argon2HasherRepository::new(),
        MailNotifier::new(config.mail.clone()),
        &config,
    )
}

pub async fn insert_user(db: &DatabaseConnection, email: &str) -> users::Model {
    users::ActiveModel {
        id: Set(generate_uuid_v7()),
        full_name: Set("Ada Lovelace".to_string()),
        email: Set(email.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        created_at: Set(at(0)),
        updated_at: Set(None),
    }
    .insert(db)
    .await
    .unwrap()
}
