use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// A scratch database directory that lives as long as the test.
pub struct TestDatabase {
    _dir: TempDir,
    pub url: String,
}

impl TestDatabase {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let url = format!("sqlite://{}", dir.path().join("movielog.db").display());
        Self { _dir: dir, url }
    }
}

pub fn run_movielog(database: &TestDatabase, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_movielog"))
        .args(args)
        .env("MOVIELOG_DATABASE_URL", &database.url)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run movielog binary")
}

pub fn parse_stdout(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|_| panic!("Should output valid JSON, got: {}", stdout))
}

/// Create a user and return the JSON printed by the CLI.
pub fn create_user(database: &TestDatabase, username: &str) -> Value {
    let output = run_movielog(database, &["user", "create", "--username", username]);
    assert!(
        output.status.success(),
        "user create should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    parse_stdout(&output)
}
