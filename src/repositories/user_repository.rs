use sea_orm::*;
use chrono::Utc;
use uuid::Uuid;
use crate::entities::{user, user::Entity as User};

pub struct UserRepository;

pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl UserRepository {
    // Find user by email or username
    pub async fn find_by_login_id<C: ConnectionTrait>(
        db: &C,
        login_id: &str,
    ) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(
                Condition::any()
                    .add(user::Column::Email.eq(login_id))
                    .add(user::Column::Username.eq(login_id))
            )
            .one(db)
            .await
    }

    pub async fn find_by_public_id<C: ConnectionTrait>(
        db: &C,
        public_id: Uuid,
    ) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::PublicId.eq(public_id))
            .one(db)
            .await
    }

    pub async fn find_by_username<C: ConnectionTrait>(
        db: &C,
        username: &str,
    ) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await
    }

    pub async fn create<C: ConnectionTrait>(db: &C, new: NewUser) -> Result<user::Model, DbErr> {
        let now = Utc::now();
        let new_user = user::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            username: Set(new.username),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            is_staff: Set(new.is_staff),
            is_superuser: Set(new.is_superuser),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_user.insert(db).await
    }
}
