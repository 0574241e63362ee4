use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasklist_core::config::Palette;
use tasklist_core::model::{Priority, Task};
use tasklist_core::stats::Statistics;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "")]
    status: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Priority")]
    priority: String,
}

pub fn priority_label(priority: Option<Priority>) -> String {
    match priority {
        Some(priority) => priority.as_str().to_ascii_uppercase(),
        None => "-".to_string(),
    }
}

fn status_marker(task: &Task) -> &'static str {
    if task.completed { "[x]" } else { "[ ]" }
}

pub fn task_table(tasks: &[Task], palette: &Palette) -> String {
    let rows = tasks.iter().map(|task| TaskRow {
        status: status_marker(task),
        id: task.id.clone(),
        text: if task.completed {
            palette.mutedize(&task.text)
        } else {
            task.text.clone()
        },
        priority: match task.priority {
            Some(Priority::High) => palette.accentize(&priority_label(task.priority)),
            other => priority_label(other),
        },
    });

    Table::new(rows).with(Style::modern()).to_string()
}

pub fn task_detail(task: &Task) -> String {
    let reminder = task
        .reminder_handle
        .as_ref()
        .map(|handle| handle.as_str())
        .unwrap_or("-");
    format!(
        "id: {}\ntext: {}\ncompleted: {}\npriority: {}\nreminder: {}",
        task.id,
        task.text,
        task.completed,
        priority_label(task.priority),
        reminder
    )
}

pub fn task_json(task: &Task) -> serde_json::Value {
    serde_json::json!({
        "id": task.id,
        "text": task.text,
        "completed": task.completed,
        "priority": task.priority,
        "reminderHandle": task.reminder_handle,
    })
}

pub fn tasks_json(tasks: &[Task]) -> serde_json::Value {
    serde_json::Value::Array(tasks.iter().map(task_json).collect())
}

pub fn home_summary(stats: &Statistics) -> String {
    if stats.total == 0 {
        return "No tasks yet".to_string();
    }
    format!("{} ({} pending)", stats.progress_label(), stats.pending)
}

pub fn profile_summary(stats: &Statistics, palette: &Palette) -> String {
    format!(
        "Total tasks: {}\nCompleted: {}\nPending: {}\nCompletion rate: {}%\nFocus level: {}\nProductivity: {}",
        stats.total,
        stats.completed,
        stats.pending,
        stats.completion_rate,
        palette.accentize(stats.focus_level().label()),
        palette.accentize(stats.productivity().label()),
    )
}

pub fn stats_json(stats: &Statistics) -> serde_json::Value {
    serde_json::json!(stats.summary())
}
