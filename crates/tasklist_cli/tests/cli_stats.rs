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

fn seed(store: &Path, completed: usize, total: usize) {
    let tasks: Vec<serde_json::Value> = (0..total)
        .map(|index| {
            serde_json::json!({
                "id": format!("task-{index}"),
                "text": format!("task {index}"),
                "completed": index < completed,
            })
        })
        .collect();
    std::fs::create_dir_all(store).unwrap();
    std::fs::write(
        store.join("tasks.json"),
        serde_json::to_string(&tasks).unwrap(),
    )
    .unwrap();
}

#[test]
fn home_reports_progress() {
    let store = temp_path("cli-home");
    seed(&store, 3, 10);

    let output = run(&store, &["home"]);
    std::fs::remove_dir_all(&store).ok();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("3 of 10 completed (7 pending)"));
}

#[test]
fn home_on_empty_store() {
    let store = temp_path("cli-home-empty");
    let output = run(&store, &["home"]);
    std::fs::remove_dir_all(&store).ok();

    assert!(String::from_utf8_lossy(&output.stdout).contains("No tasks yet"));
}

#[test]
fn stats_json_reports_rate_and_labels() {
    let store = temp_path("cli-stats");
    seed(&store, 3, 10);

    let output = run(&store, &["stats", "--json"]);
    std::fs::remove_dir_all(&store).ok();

    assert!(output.status.success());
    let stats: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(stats["total"], 10);
    assert_eq!(stats["completed"], 3);
    assert_eq!(stats["pending"], 7);
    assert_eq!(stats["completion_rate"], 30);
    assert_eq!(stats["focus_level"], "Low");
    assert_eq!(stats["productivity"], "Getting Started");
}

#[test]
fn stats_text_with_high_completion() {
    let store = temp_path("cli-stats-high");
    seed(&store, 11, 12);

    let output = run(&store, &["stats"]);
    std::fs::remove_dir_all(&store).ok();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Completion rate: 92%"));
    assert!(stdout.contains("Focus level: High"));
    assert!(stdout.contains("Productivity: Excellent"));
}
