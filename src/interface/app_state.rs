use crate::application::role_screen::RoleScreenController;
use crate::infrastructure::NotificationQueue;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared state of the console's HTTP surface.
///
/// One screen instance; the mutex serialises every action on it, so a
/// reload and a delete can never interleave their writes to the role list.
pub struct AppState {
    pub screen: Mutex<RoleScreenController>,
    pub notifications: Arc<NotificationQueue>,
}

impl AppState {
    pub fn new(screen: RoleScreenController, notifications: Arc<NotificationQueue>) -> Self {
        Self {
            screen: Mutex::new(screen),
            notifications,
        }
    }
}
