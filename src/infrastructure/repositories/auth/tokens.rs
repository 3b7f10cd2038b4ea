use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query, query_as};

use crate::domain::RepositoryError;
use crate::domain::ids::{TokenId, UserId};
use crate::domain::repositories::TokenRepository;
use crate::domain::tokens::{ApiToken, NewApiToken};
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::{conflict_or_db_err, db_err};

const TOKEN_COLUMNS: &str = "id, user_id, token_hash, name, created_at, last_used_at, revoked_at";

#[derive(Clone)]
pub struct SqlTokenRepository {
    pool: DatabasePool,
}

impl SqlTokenRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_domain(record: TokenRecord) -> ApiToken {
        ApiToken {
            id: TokenId::new(record.id),
            user_id: UserId::new(record.user_id),
            token_hash: record.token_hash,
            name: record.name,
            created_at: record.created_at,
            last_used_at: record.last_used_at,
            revoked_at: record.revoked_at,
        }
    }
}

#[async_trait]
impl TokenRepository for SqlTokenRepository {
    async fn insert(&self, token: NewApiToken) -> Result<ApiToken, RepositoryError> {
        let record = query_as::<_, TokenRecord>(&format!(
            "INSERT INTO api_tokens (user_id, token_hash, name, created_at) VALUES (?, ?, ?, ?) \
             RETURNING {TOKEN_COLUMNS}"
        ))
        .bind(i64::from(token.user_id))
        .bind(&token.token_hash)
        .bind(token.name.trim())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| conflict_or_db_err(err, "Token already exists"))?;

        Ok(Self::into_domain(record))
    }

    async fn get_by_token_hash(&self, token_hash: &str) -> Result<ApiToken, RepositoryError> {
        query_as::<_, TokenRecord>(&format!(
            "SELECT {TOKEN_COLUMNS} FROM api_tokens WHERE token_hash = ?"
        ))
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .map(Self::into_domain)
        .ok_or(RepositoryError::NotFound)
    }

    async fn update_last_used(&self, id: TokenId) -> Result<(), RepositoryError> {
        query("UPDATE api_tokens SET last_used_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TokenRecord {
    id: i64,
    user_id: i64,
    token_hash: String,
    name: String,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
    revoked_at: Option<DateTime<Utc>>,
}
