use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{TokenId, UserId};

/// A stored API token. Only the hash is persisted; the plaintext value is
/// handed out once when the token is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiToken {
    pub id: TokenId,
    pub user_id: UserId,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl ApiToken {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub user_id: UserId,
    pub token_hash: String,
    pub name: String,
}

impl NewApiToken {
    pub fn new(user_id: UserId, token_hash: String, name: String) -> Self {
        Self {
            user_id,
            token_hash,
            name,
        }
    }
}
