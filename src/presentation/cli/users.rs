use anyhow::Context;
use clap::Subcommand;
use serde::Serialize;
use uuid::Uuid;

use super::print_json;
use super::tokens::{IssuedToken, issue_token};
use crate::domain::repositories::UserRepository;
use crate::domain::users::{NewUser, User};
use crate::infrastructure::database::Database;
use crate::infrastructure::repositories::tokens::SqlTokenRepository;
use crate::infrastructure::repositories::users::SqlUserRepository;

#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// Create a user and print an initial API token
    Create {
        #[arg(long)]
        username: String,
    },
}

#[derive(Debug, Serialize)]
struct CreatedUser {
    user: User,
    token: IssuedToken,
}

pub async fn run(database: &Database, command: UserCommands) -> anyhow::Result<()> {
    match command {
        UserCommands::Create { username } => {
            let new_user = NewUser::new(username, Uuid::new_v4().to_string()).normalize();
            if new_user.username.is_empty() {
                anyhow::bail!("username must not be empty");
            }

            let user_repo = SqlUserRepository::new(database.clone_pool());
            let token_repo = SqlTokenRepository::new(database.clone_pool());

            let user = user_repo
                .insert(new_user)
                .await
                .context("failed to create user")?;
            let token = issue_token(&token_repo, user.id, "default").await?;
            print_json(&CreatedUser { user, token })
        }
    }
}
