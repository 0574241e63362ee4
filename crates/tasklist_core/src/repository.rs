use crate::error::AppError;
use crate::model::{Priority, Task};
use crate::notify::NotificationService;
use crate::reminder::ReminderCoordinator;
use crate::stats::Statistics;
use crate::storage::{KeyValueStore, TASKS_KEY, snapshot};
use uuid::Uuid;

/// Owns the task collection and mirrors every mutation to the store.
///
/// Writes are whole snapshots. A failed write does not undo the in-memory
/// change: it is logged and kept in [`TaskRepository::persistence_error`]
/// until a later write (or [`TaskRepository::flush`]) succeeds.
pub struct TaskRepository<S: KeyValueStore, N: NotificationService> {
    store: S,
    reminders: ReminderCoordinator<N>,
    tasks: Vec<Task>,
    persistence_error: Option<AppError>,
}

impl<S: KeyValueStore, N: NotificationService> TaskRepository<S, N> {
    /// Restores the collection from the store, starting empty if the
    /// stored snapshot cannot be read or parsed.
    pub fn open(store: S, notifications: N) -> Self {
        let mut repository = Self {
            store,
            reminders: ReminderCoordinator::new(notifications),
            tasks: Vec::new(),
            persistence_error: None,
        };

        match repository.load() {
            Ok(tasks) => {
                log::debug!("restored {} tasks", tasks.len());
                repository.tasks = tasks;
            }
            Err(err) => {
                log::warn!("discarding stored tasks: {}", err);
            }
        }

        repository
    }

    pub fn load(&self) -> Result<Vec<Task>, AppError> {
        match self.store.get(TASKS_KEY)? {
            Some(blob) => snapshot::decode(&blob),
            None => Ok(Vec::new()),
        }
    }

    pub fn add(&mut self, text: &str, priority: Priority) -> Result<Task, AppError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("task text is required"));
        }

        let reminder_handle = self.reminders.schedule(trimmed).into_option();
        let task = Task {
            id: self.fresh_id(),
            text: trimmed.to_string(),
            completed: false,
            priority: Some(priority),
            reminder_handle,
        };

        self.tasks.push(task.clone());
        self.persist();

        Ok(task)
    }

    pub fn toggle_complete(&mut self, id: &str) -> Result<Task, AppError> {
        let index = self.position(id)?;
        let task = &mut self.tasks[index];

        task.completed = !task.completed;
        if task.completed {
            let handle = task.reminder_handle.take();
            self.reminders.cancel(handle.as_ref());
        }

        let updated = self.tasks[index].clone();
        self.persist();

        Ok(updated)
    }

    pub fn edit_text(&mut self, id: &str, new_text: &str) -> Result<Task, AppError> {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("task text is required"));
        }

        let index = self.position(id)?;
        self.tasks[index].text = trimmed.to_string();

        let updated = self.tasks[index].clone();
        self.persist();

        Ok(updated)
    }

    pub fn delete(&mut self, id: &str) -> Result<Task, AppError> {
        let index = self.position(id)?;

        self.reminders
            .cancel(self.tasks[index].reminder_handle.as_ref());
        let removed = self.tasks.remove(index);
        self.persist();

        Ok(removed)
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Result<&Task, AppError> {
        let index = self.position(id)?;
        Ok(&self.tasks[index])
    }

    pub fn stats(&self) -> Statistics {
        Statistics::project(&self.tasks)
    }

    /// The last write failure, if the store is behind the in-memory state.
    pub fn persistence_error(&self) -> Option<&AppError> {
        self.persistence_error.as_ref()
    }

    /// Writes the current collection again, reporting any failure.
    pub fn flush(&mut self) -> Result<(), AppError> {
        self.persist();
        match &self.persistence_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn reminders(&self) -> &ReminderCoordinator<N> {
        &self.reminders
    }

    fn position(&self, id: &str) -> Result<usize, AppError> {
        let trimmed_id = id.trim();
        self.tasks
            .iter()
            .position(|task| task.id == trimmed_id)
            .ok_or_else(|| AppError::not_found(format!("task {trimmed_id} not found")))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.tasks.iter().any(|task| task.id == id) {
                return id;
            }
        }
    }

    fn persist(&mut self) {
        let written = snapshot::encode(&self.tasks)
            .and_then(|blob| self.store.set(TASKS_KEY, &blob));

        match written {
            Ok(()) => self.persistence_error = None,
            Err(err) => {
                log::error!("failed to save {} tasks: {}", self.tasks.len(), err);
                self.persistence_error = Some(err);
            }
        }
    }
}
