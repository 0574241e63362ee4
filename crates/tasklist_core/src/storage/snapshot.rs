use crate::error::AppError;
use crate::model::Task;
use std::collections::HashSet;

pub fn encode(tasks: &[Task]) -> Result<String, AppError> {
    serde_json::to_string(tasks).map_err(|err| AppError::invalid_data(err.to_string()))
}

/// Parses a stored snapshot, rejecting anything that is not a well-formed
/// task collection rather than keeping the parts that happen to parse.
pub fn decode(blob: &str) -> Result<Vec<Task>, AppError> {
    let tasks: Vec<Task> =
        serde_json::from_str(blob).map_err(|err| AppError::corrupt_state(err.to_string()))?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        if task.id.trim().is_empty() {
            return Err(AppError::corrupt_state(format!("task {index} has an empty id")));
        }
        if task.text.trim().is_empty() {
            return Err(AppError::corrupt_state(format!(
                "task {} has empty text",
                task.id
            )));
        }
        if !seen.insert(task.id.as_str()) {
            return Err(AppError::corrupt_state(format!(
                "duplicate task id {}",
                task.id
            )));
        }
    }

    Ok(tasks)
}
