use crate::helpers::{TestDatabase, create_user, run_movielog};

#[test]
fn test_user_create_prints_user_and_token() {
    let database = TestDatabase::new();

    let created = create_user(&database, "  alice ");

    assert_eq!(created["user"]["username"], "alice");
    assert!(created["user"]["id"].is_i64(), "Should have an ID");
    let token = created["token"]["value"].as_str().expect("token value");
    assert!(token.starts_with("mvl_"));
    assert_eq!(created["token"]["name"], "default");
    assert!(
        created["token"].get("token_hash").is_none(),
        "token hash must not be printed"
    );
}

#[test]
fn test_duplicate_username_fails() {
    let database = TestDatabase::new();
    create_user(&database, "alice");

    let output = run_movielog(&database, &["user", "create", "--username", "alice"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("already exists"),
        "stderr should explain the conflict: {stderr}"
    );
}

#[test]
fn test_blank_username_fails() {
    let database = TestDatabase::new();

    let output = run_movielog(&database, &["user", "create", "--username", "   "]);

    assert!(!output.status.success());
}
