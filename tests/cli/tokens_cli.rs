use crate::helpers::{TestDatabase, create_user, parse_stdout, run_movielog};

#[test]
fn test_token_create_issues_new_token() {
    let database = TestDatabase::new();
    let created = create_user(&database, "alice");
    let first = created["token"]["value"].as_str().expect("token value");

    let output = run_movielog(
        &database,
        &["token", "create", "--username", "alice", "--name", "laptop"],
    );

    assert!(
        output.status.success(),
        "token create should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let token = parse_stdout(&output);
    assert_eq!(token["name"], "laptop");
    assert_eq!(token["user_id"], created["user"]["id"]);
    assert_ne!(token["value"].as_str(), Some(first));
}

#[test]
fn test_token_create_for_unknown_user_fails() {
    let database = TestDatabase::new();

    let output = run_movielog(
        &database,
        &["token", "create", "--username", "nobody", "--name", "laptop"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("user not found"), "stderr: {stderr}");
}
