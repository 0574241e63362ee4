use crate::error::AppError;
use crate::notify::{Notifier, ReminderContent};
use notify_rust::Notification;

pub struct LinuxNotifier;

impl Notifier for LinuxNotifier {
    fn notify(&self, content: &ReminderContent) -> Result<(), AppError> {
        Notification::new()
            .appname("tasklist")
            .summary(&content.title)
            .body(&content.body)
            .show()
            .map_err(|err| AppError::notification(err.to_string()))?;
        Ok(())
    }
}
