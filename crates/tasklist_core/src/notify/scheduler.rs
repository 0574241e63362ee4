use crate::error::AppError;
use crate::model::ReminderHandle;
use crate::notify::{NotificationService, Notifier, Permission, ReminderContent};
use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

type PendingReminders = Arc<Mutex<HashMap<ReminderHandle, Sender<()>>>>;

/// Delivers each reminder from its own timer thread once the delay elapses.
///
/// A reminder is pending until either its timer fires or it is cancelled;
/// whichever removes it from the pending table first wins. Dropping the
/// service discards every pending reminder.
pub struct DesktopNotificationService<N: Notifier> {
    notifier: Arc<N>,
    pending: PendingReminders,
}

impl<N: Notifier> DesktopNotificationService<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            notifier: Arc::new(notifier),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn pending_count(&self) -> usize {
        lock_pending(&self.pending).map(|map| map.len()).unwrap_or(0)
    }
}

fn lock_pending(
    pending: &PendingReminders,
) -> Result<MutexGuard<'_, HashMap<ReminderHandle, Sender<()>>>, AppError> {
    pending
        .lock()
        .map_err(|_| AppError::notification("pending reminder table is poisoned"))
}

impl<N: Notifier> NotificationService for DesktopNotificationService<N> {
    fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn schedule_one_shot(
        &self,
        delay: Duration,
        title: &str,
        body: &str,
    ) -> Result<ReminderHandle, AppError> {
        let handle = ReminderHandle::new(format!("reminder-{}", Uuid::new_v4()));
        let (sender, receiver) = mpsc::channel::<()>();
        lock_pending(&self.pending)?.insert(handle.clone(), sender);

        let notifier = Arc::clone(&self.notifier);
        let pending = Arc::clone(&self.pending);
        let timer_handle = handle.clone();
        let content = ReminderContent {
            title: title.to_string(),
            body: body.to_string(),
        };

        let spawned = std::thread::Builder::new()
            .name("tasklist-reminder".to_string())
            .spawn(move || {
                if let Err(RecvTimeoutError::Timeout) = receiver.recv_timeout(delay) {
                    let due = lock_pending(&pending)
                        .map(|mut map| map.remove(&timer_handle).is_some())
                        .unwrap_or(false);
                    if !due {
                        return;
                    }
                    match notifier.notify(&content) {
                        Ok(()) => log::debug!("delivered reminder {}", timer_handle),
                        Err(err) => log::warn!("reminder {} not delivered: {}", timer_handle, err),
                    }
                }
            });

        if let Err(err) = spawned {
            lock_pending(&self.pending)?.remove(&handle);
            return Err(AppError::notification(err.to_string()));
        }

        Ok(handle)
    }

    fn cancel(&self, handle: &ReminderHandle) -> Result<(), AppError> {
        let sender = lock_pending(&self.pending)?
            .remove(handle)
            .ok_or_else(|| AppError::notification(format!("reminder {handle} is not pending")))?;
        // The timer may already be exiting; a closed channel is fine.
        let _ = sender.send(());
        Ok(())
    }
}

impl<N: Notifier> Drop for DesktopNotificationService<N> {
    fn drop(&mut self) {
        if let Ok(mut map) = self.pending.lock() {
            map.clear();
        }
    }
}
