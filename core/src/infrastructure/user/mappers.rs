use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;

use crate::domain::common::generate_uuid_v7;
use crate::domain::user::entities::User;
use crate::entity::users::{ActiveModel as UserActiveModel, Model as UserModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub fn new_user_model(
    full_name: String,
    email: String,
    password_hash: String,
    now: DateTime<Utc>,
) -> UserActiveModel {
    UserActiveModel {
        id: Set(generate_uuid_v7()),
        full_name: Set(full_name),
        email: Set(email),
        password_hash: Set(password_hash),
        created_at: Set(now),
        updated_at: Set(None),
    }
}
