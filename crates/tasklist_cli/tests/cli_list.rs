use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasklist-{nanos}-{name}"))
}

fn run(store: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tasklist"))
        .args(args)
        .env("TASKLIST_STORE_PATH", store)
        .env("TASKLIST_CONFIG_PATH", store.join("config.json"))
        .env("TASKLIST_DISABLE_NOTIFICATIONS", "1")
        .output()
        .expect("failed to run tasklist")
}

#[test]
fn list_on_empty_store_says_so() {
    let store = temp_path("cli-list-empty");
    let output = run(&store, &["list"]);
    std::fs::remove_dir_all(&store).ok();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No tasks yet"));
}

#[test]
fn list_keeps_insertion_order() {
    let store = temp_path("cli-list-order");
    run(&store, &["add", "first"]);
    run(&store, &["add", "second", "-p", "low"]);
    run(&store, &["add", "third"]);

    let output = run(&store, &["list", "--json"]);
    let table = run(&store, &["list"]);
    std::fs::remove_dir_all(&store).ok();

    assert!(output.status.success());
    let tasks: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    let texts: Vec<&str> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
    assert_eq!(tasks[1]["priority"], "low");

    let rendered = String::from_utf8_lossy(&table.stdout);
    assert!(rendered.contains("LOW"));
    assert!(rendered.find("first").unwrap() < rendered.find("third").unwrap());
}

#[test]
fn corrupt_store_loads_as_empty() {
    let store = temp_path("cli-list-corrupt");
    std::fs::create_dir_all(&store).unwrap();
    std::fs::write(store.join("tasks.json"), "{ not json").unwrap();

    let output = run(&store, &["list", "--json"]);
    std::fs::remove_dir_all(&store).ok();

    assert!(output.status.success());
    let tasks: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(tasks, serde_json::json!([]));
}

#[test]
fn legacy_notification_field_is_read_as_reminder() {
    let store = temp_path("cli-list-legacy");
    std::fs::create_dir_all(&store).unwrap();
    std::fs::write(
        store.join("tasks.json"),
        r#"[{"id":"1","text":"legacy","completed":false,"notificationId":"n-1"}]"#,
    )
    .unwrap();

    let output = run(&store, &["show", "1", "--json"]);
    std::fs::remove_dir_all(&store).ok();

    assert!(output.status.success());
    let task: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(task["reminderHandle"], "n-1");
}
