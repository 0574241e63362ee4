use crate::config::Config;
use crate::error::AppError;
use crate::model::ReminderHandle;
use std::time::Duration;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::LinuxNotifier;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WindowsNotifier;

mod scheduler;
pub use scheduler::DesktopNotificationService;

const DISABLE_ENV_VAR: &str = "TASKLIST_DISABLE_NOTIFICATIONS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Schedules one-shot delayed local notifications.
pub trait NotificationService {
    fn request_permission(&self) -> Permission;

    fn schedule_one_shot(
        &self,
        delay: Duration,
        title: &str,
        body: &str,
    ) -> Result<ReminderHandle, AppError>;

    fn cancel(&self, handle: &ReminderHandle) -> Result<(), AppError>;
}

impl<T: NotificationService + ?Sized> NotificationService for Box<T> {
    fn request_permission(&self) -> Permission {
        (**self).request_permission()
    }

    fn schedule_one_shot(
        &self,
        delay: Duration,
        title: &str,
        body: &str,
    ) -> Result<ReminderHandle, AppError> {
        (**self).schedule_one_shot(delay, title, body)
    }

    fn cancel(&self, handle: &ReminderHandle) -> Result<(), AppError> {
        (**self).cancel(handle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderContent {
    pub title: String,
    pub body: String,
}

/// Displays a notification immediately.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, content: &ReminderContent) -> Result<(), AppError>;
}

/// Service used when reminders are unavailable: permission is always denied.
pub struct DeniedNotifications;

impl NotificationService for DeniedNotifications {
    fn request_permission(&self) -> Permission {
        Permission::Denied
    }

    fn schedule_one_shot(
        &self,
        _delay: Duration,
        _title: &str,
        _body: &str,
    ) -> Result<ReminderHandle, AppError> {
        Err(AppError::notification("notifications are disabled"))
    }

    fn cancel(&self, _handle: &ReminderHandle) -> Result<(), AppError> {
        Err(AppError::notification("notifications are disabled"))
    }
}

pub fn notifications_disabled_by_env() -> bool {
    std::env::var(DISABLE_ENV_VAR).is_ok()
}

pub fn notification_service(config: &Config) -> Box<dyn NotificationService> {
    if notifications_disabled_by_env() || !config.notifications_enabled() {
        log::info!("reminders disabled by configuration");
        return Box::new(DeniedNotifications);
    }

    match platform_notification_service() {
        Ok(service) => service,
        Err(err) => {
            log::info!("reminders unavailable: {}", err);
            Box::new(DeniedNotifications)
        }
    }
}

#[cfg(target_os = "linux")]
pub fn platform_notification_service() -> Result<Box<dyn NotificationService>, AppError> {
    Ok(Box::new(DesktopNotificationService::new(LinuxNotifier)))
}

#[cfg(windows)]
pub fn platform_notification_service() -> Result<Box<dyn NotificationService>, AppError> {
    Ok(Box::new(DesktopNotificationService::new(WindowsNotifier)))
}

#[cfg(not(any(target_os = "linux", windows)))]
pub fn platform_notification_service() -> Result<Box<dyn NotificationService>, AppError> {
    Err(AppError::invalid_data(
        "notifications are not supported on this platform",
    ))
}
