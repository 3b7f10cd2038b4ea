use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query_as;

use crate::domain::RepositoryError;
use crate::domain::ids::UserId;
use crate::domain::repositories::UserRepository;
use crate::domain::users::{NewUser, User};
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::{conflict_or_db_err, db_err};

#[derive(Clone)]
pub struct SqlUserRepository {
    pool: DatabasePool,
}

impl SqlUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_domain(record: UserRecord) -> User {
        User {
            id: UserId::new(record.id),
            username: record.username,
            uuid: record.uuid,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let user = user.normalize();
        let record = query_as::<_, UserRecord>(
            "INSERT INTO users (username, uuid, created_at) VALUES (?, ?, ?) \
             RETURNING id, username, uuid, created_at",
        )
        .bind(&user.username)
        .bind(&user.uuid)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| conflict_or_db_err(err, "A user with this username already exists"))?;

        Ok(Self::into_domain(record))
    }

    async fn get(&self, id: UserId) -> Result<User, RepositoryError> {
        query_as::<_, UserRecord>("SELECT id, username, uuid, created_at FROM users WHERE id = ?")
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .map(Self::into_domain)
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_username(&self, username: &str) -> Result<User, RepositoryError> {
        query_as::<_, UserRecord>(
            "SELECT id, username, uuid, created_at FROM users WHERE username = ?",
        )
        .bind(username.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .map(Self::into_domain)
        .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRecord {
    id: i64,
    username: String,
    uuid: String,
    created_at: DateTime<Utc>,
}
