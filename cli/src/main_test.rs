use clap::Parser;
use session::{KeyValueStore, SessionStore};

use super::*;

#[test]
fn parses_login_with_global_flags() {
    let cli = Cli::try_parse_from([
        "projecthub",
        "--base-url",
        "http://api.test",
        "--state-dir",
        "/tmp/ph",
        "login",
        "--email",
        "alice@example.com",
        "--password",
        "pw",
    ])
    .unwrap();
    assert_eq!(cli.base_url, "http://api.test");
    assert_eq!(cli.state_dir, Some(PathBuf::from("/tmp/ph")));
    assert!(matches!(
        cli.command,
        Command::Login { ref email, ref password } if email == "alice@example.com" && password == "pw"
    ));
}

#[test]
fn task_status_defaults_to_todo() {
    let cli = Cli::try_parse_from([
        "projecthub",
        "tasks",
        "create",
        "p1",
        "--title",
        "Ship",
        "--description",
        "Now",
    ])
    .unwrap();
    let Command::Tasks(TasksCommand { command: TasksSubcommand::Create { status, .. } }) = cli.command else {
        panic!("expected tasks create");
    };
    assert_eq!(status, TaskStatus::Todo);
}

#[test]
fn task_status_uses_wire_names() {
    assert_eq!(parse_status("in-progress"), Ok(TaskStatus::InProgress));
    assert_eq!(parse_status("done"), Ok(TaskStatus::Done));
    assert_eq!(parse_status("Done"), Err("expected one of todo, in-progress, done".to_owned()));
}

#[test]
fn rejects_unknown_status() {
    let parsed = Cli::try_parse_from([
        "projecthub",
        "tasks",
        "create",
        "p1",
        "--title",
        "Ship",
        "--description",
        "Now",
        "--status",
        "blocked",
    ]);
    assert!(parsed.is_err());
}

#[test]
fn protected_commands_require_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let session = SessionStore::hydrated(FileStore::in_dir(dir.path()));
    assert!(matches!(require_session(&session), Err(CliError::NotSignedIn)));

    let storage = FileStore::in_dir(dir.path());
    storage.set("token", r#""abc123""#).unwrap();
    storage
        .set("user", r#"{"id":"1","username":"alice","email":"alice@example.com"}"#)
        .unwrap();
    let session = SessionStore::hydrated(FileStore::in_dir(dir.path()));
    assert!(require_session(&session).is_ok());
}

#[test]
fn unhydrated_session_is_not_signed_in() {
    let dir = tempfile::tempdir().unwrap();
    let session = SessionStore::new(FileStore::in_dir(dir.path()));
    assert!(matches!(require_session(&session), Err(CliError::NotSignedIn)));
}

#[tokio::test]
async fn logout_clears_the_session_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStore::in_dir(dir.path());
    storage.set("token", r#""abc123""#).unwrap();
    storage
        .set("user", r#"{"id":"1","username":"alice","email":"alice@example.com"}"#)
        .unwrap();

    let mut session = SessionStore::hydrated(storage.clone());
    let api = ApiClient::new("http://127.0.0.1:9", ReqwestTransport::new(), storage.clone());
    run(Command::Logout, &mut session, &api).await.unwrap();

    assert_eq!(storage.get("token"), Ok(None));
    assert_eq!(storage.get("user"), Ok(None));
}

#[tokio::test]
async fn empty_login_input_fails_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStore::in_dir(dir.path());
    let mut session = SessionStore::hydrated(storage.clone());
    let api = ApiClient::new("http://127.0.0.1:9", ReqwestTransport::new(), storage);

    let err = run(Command::Login { email: " ".to_owned(), password: "pw".to_owned() }, &mut session, &api)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Session(SessionError::Validation(ValidationError::MissingIdentifier))));
}
