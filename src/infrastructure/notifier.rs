use crate::application::notifications::{Notification, NotificationLevel, Notifier};
use std::sync::Mutex;
use tracing::{info, warn};

/// Keeps toasts until the presentation layer picks them up. Every toast is
/// also written to the log as it arrives.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Mutex<Vec<Notification>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all pending toasts, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.lock().unwrap())
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, notification: Notification) {
        log_notification(&notification);
        self.pending.lock().unwrap().push(notification);
    }
}

fn log_notification(notification: &Notification) {
    match notification.level {
        NotificationLevel::Success => {
            info!(title = %notification.title, body = %notification.body, "Notification")
        }
        NotificationLevel::Error => {
            warn!(title = %notification.title, body = %notification.body, "Notification")
        }
    }
}
