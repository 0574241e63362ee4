use crate::error::AppError;
use crate::notify::{Notifier, ReminderContent};
use tauri_winrt_notification::Toast;

pub struct WindowsNotifier;

impl Notifier for WindowsNotifier {
    fn notify(&self, content: &ReminderContent) -> Result<(), AppError> {
        Toast::new(Toast::POWERSHELL_APP_ID)
            .title(&content.title)
            .text1(&content.body)
            .show()
            .map_err(|err| AppError::notification(err.to_string()))?;
        Ok(())
    }
}
