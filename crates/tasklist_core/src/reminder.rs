use crate::error::AppError;
use crate::model::ReminderHandle;
use crate::notify::{NotificationService, Permission};
use std::time::Duration;

pub const REMINDER_DELAY: Duration = Duration::from_secs(60);
pub const REMINDER_TITLE: &str = "Task Reminder";

/// Outcome of a call whose failure must not affect the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestEffort<T> {
    Applied(T),
    Skipped,
    Failed(AppError),
}

impl<T> BestEffort<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Skipped | Self::Failed(_) => None,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

pub fn reminder_body(task_text: &str) -> String {
    format!("Time to complete: {task_text}")
}

/// Ties reminders to the task lifecycle. Every failure degrades to
/// "no reminder"; nothing here is returned as an error.
pub struct ReminderCoordinator<N: NotificationService> {
    service: N,
    permission: Permission,
}

impl<N: NotificationService> ReminderCoordinator<N> {
    pub fn new(service: N) -> Self {
        let permission = service.request_permission();
        if permission == Permission::Denied {
            log::info!("notification permission denied; tasks will have no reminders");
        }
        Self {
            service,
            permission,
        }
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn service(&self) -> &N {
        &self.service
    }

    pub fn schedule(&self, task_text: &str) -> BestEffort<ReminderHandle> {
        if self.permission == Permission::Denied {
            return BestEffort::Skipped;
        }

        match self.service.schedule_one_shot(
            REMINDER_DELAY,
            REMINDER_TITLE,
            &reminder_body(task_text),
        ) {
            Ok(handle) => {
                log::debug!("scheduled reminder {}", handle);
                BestEffort::Applied(handle)
            }
            Err(err) => {
                log::warn!("failed to schedule reminder: {}", err);
                BestEffort::Failed(err)
            }
        }
    }

    /// Without permission nothing can be pending here, so stored handles
    /// are dropped without asking the service.
    pub fn cancel(&self, handle: Option<&ReminderHandle>) -> BestEffort<()> {
        let Some(handle) = handle else {
            return BestEffort::Skipped;
        };
        if self.permission == Permission::Denied {
            return BestEffort::Skipped;
        }

        match self.service.cancel(handle) {
            Ok(()) => {
                log::debug!("cancelled reminder {}", handle);
                BestEffort::Applied(())
            }
            Err(err) => {
                log::warn!("failed to cancel reminder {}: {}", handle, err);
                BestEffort::Failed(err)
            }
        }
    }
}
