use anyhow::{Context, Result};
use clap::Parser;
use movielog::application::{ServerConfig, serve};
use movielog::infrastructure::database::Database;
use movielog::presentation::cli::{Cli, Commands, ServeCommand, tokens, users};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(cmd) => run_server(cli.database_url, cmd).await,
        Commands::User { command } => {
            let database = connect(&cli.database_url).await?;
            users::run(&database, command).await
        }
        Commands::Token { command } => {
            let database = connect(&cli.database_url).await?;
            tokens::run(&database, command).await
        }
    }
}

async fn connect(database_url: &str) -> Result<Database> {
    Database::connect(database_url)
        .await
        .with_context(|| format!("failed to open database {database_url}"))
}

async fn run_server(database_url: String, command: ServeCommand) -> Result<()> {
    let config = ServerConfig {
        bind_address: command.bind_address,
        database_url,
        tmdb_url: command.tmdb_url,
        tmdb_api_key: command.tmdb_api_key.unwrap_or_default(),
    };

    serve(config).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout is reserved for command output.
    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
