use anyhow::Context;
use clap::Subcommand;
use serde::Serialize;

use super::print_json;
use crate::domain::ids::UserId;
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::domain::tokens::{ApiToken, NewApiToken};
use crate::infrastructure::auth::{generate_token, hash_token};
use crate::infrastructure::database::Database;
use crate::infrastructure::repositories::tokens::SqlTokenRepository;
use crate::infrastructure::repositories::users::SqlUserRepository;

#[derive(Debug, Subcommand)]
pub enum TokenCommands {
    /// Issue a new API token for an existing user
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        name: String,
    },
}

/// A freshly issued token. `value` is the only time the plaintext is shown.
#[derive(Debug, Serialize)]
pub struct IssuedToken {
    #[serde(flatten)]
    pub token: ApiToken,
    pub value: String,
}

pub(crate) async fn issue_token(
    token_repo: &dyn TokenRepository,
    user_id: UserId,
    name: &str,
) -> anyhow::Result<IssuedToken> {
    let value = generate_token();
    let token = token_repo
        .insert(NewApiToken::new(
            user_id,
            hash_token(&value),
            name.trim().to_string(),
        ))
        .await
        .context("failed to store API token")?;
    Ok(IssuedToken { token, value })
}

pub async fn run(database: &Database, command: TokenCommands) -> anyhow::Result<()> {
    match command {
        TokenCommands::Create { username, name } => {
            let user_repo = SqlUserRepository::new(database.clone_pool());
            let token_repo = SqlTokenRepository::new(database.clone_pool());

            let user = user_repo
                .get_by_username(username.trim())
                .await
                .with_context(|| format!("user not found: {username}"))?;
            let issued = issue_token(&token_repo, user.id, &name).await?;
            print_json(&issued)
        }
    }
}
