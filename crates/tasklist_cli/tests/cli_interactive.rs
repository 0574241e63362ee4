use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasklist-{nanos}-{name}"))
}

fn run_session(store: &Path, input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tasklist"))
        .env("TASKLIST_STORE_PATH", store)
        .env("TASKLIST_CONFIG_PATH", store.join("config.json"))
        .env("TASKLIST_DISABLE_NOTIFICATIONS", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn tasklist");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

#[test]
fn interactive_help_and_exit() {
    let store = temp_path("interactive-help");
    let output = run_session(&store, "help\n?\nexit\nlist\n");
    std::fs::remove_dir_all(&store).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Usage").count(), 2);
    assert!(!stdout.contains("No tasks yet"));
}

#[test]
fn interactive_errors_do_not_end_session() {
    let store = temp_path("interactive-errors");
    let output = run_session(&store, "frobnicate\ntoggle missing\nadd \"unterminated\nhome\n");
    std::fs::remove_dir_all(&store).ok();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: validation_error"));
    assert!(stderr.contains("ERROR: not_found"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No tasks yet"));
}

#[test]
fn interactive_session_shares_one_collection() {
    let store = temp_path("interactive-session");
    let output = run_session(
        &store,
        "add \"Buy oat milk\" -p low\nadd \"Call mom\"\nlist --json\nquit\n",
    );
    let persisted = std::fs::read_to_string(store.join("tasks.json")).unwrap();
    std::fs::remove_dir_all(&store).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: Buy oat milk"));
    assert!(stdout.contains("Added task: Call mom"));

    let listed = stdout
        .lines()
        .find(|line| line.starts_with('['))
        .expect("list --json output");
    let tasks: serde_json::Value = serde_json::from_str(listed).unwrap();
    assert_eq!(tasks.as_array().unwrap().len(), 2);
    assert_eq!(tasks[0]["priority"], "low");

    let stored: serde_json::Value = serde_json::from_str(&persisted).unwrap();
    assert_eq!(stored, tasks);
}

#[test]
fn interactive_expands_configured_alias() {
    let store = temp_path("interactive-alias");
    std::fs::create_dir_all(&store).unwrap();
    std::fs::write(
        store.join("config.json"),
        r#"{ "aliases": { "progress": "home" } }"#,
    )
    .unwrap();

    let output = run_session(&store, "progress\n");
    std::fs::remove_dir_all(&store).ok();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No tasks yet"));
}
