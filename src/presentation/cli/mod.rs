pub mod tokens;
pub mod users;

use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};

use crate::infrastructure::tmdb::TMDB_URL;
use tokens::TokenCommands;
use users::UserCommands;

#[derive(Debug, Parser)]
#[command(author, version, about = "Track watched movies and chart your viewing habits", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "MOVIELOG_DATABASE_URL",
        default_value = "sqlite://movielog.db"
    )]
    pub database_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(long, env = "MOVIELOG_BIND_ADDRESS", default_value = "127.0.0.1:3000")]
    pub bind_address: SocketAddr,

    #[arg(long, env = "MOVIELOG_TMDB_API_KEY", hide_env_values = true)]
    pub tmdb_api_key: Option<String>,

    #[arg(long, env = "MOVIELOG_TMDB_URL", default_value = TMDB_URL)]
    pub tmdb_url: String,
}

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
