use crate::application::dialog::{RoleDialog, RoleEditor};
use crate::application::role_screen::RoleScreenController;
use crate::domain::{grant::Grant, role::Role, token::AuthToken};
use crate::infrastructure::{InMemoryRoleGateway, NotificationQueue};
use crate::interface::app_state::AppState;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub const TEST_TOKEN: &str = "test-auth-token";

type TestScreen = (
    RoleScreenController,
    Arc<InMemoryRoleGateway>,
    Arc<NotificationQueue>,
);

/// Creates `count` grants named `G0`, `G1`, ...
pub fn create_test_grants(count: usize) -> Vec<Grant> {
    (0..count).map(|i| Grant::new(format!("G{i}"))).collect()
}

/// Creates a test role with the given number of grants
pub fn create_test_role(name: &str, description: &str, grants: usize) -> Role {
    Role::new(name, description).with_grants(create_test_grants(grants))
}

/// Creates a role the backend sent without a grants field
pub fn create_role_without_grants(name: &str) -> Role {
    Role::new(name, format!("{name} without grants"))
}

/// Warehouse roles with 12, 3 and no grants
pub fn create_test_roles() -> Vec<Role> {
    vec![
        create_test_role("ROLE_ADMIN", "Administrators", 12),
        create_test_role("ROLE_OPERATOR", "Warehouse operators", 3),
        create_role_without_grants("ROLE_GUEST"),
    ]
}

/// Screen wired to an in-memory gateway and a notification queue
pub fn create_test_screen(roles: Vec<Role>) -> TestScreen {
    let gateway = Arc::new(InMemoryRoleGateway::new(roles));
    let notifications = Arc::new(NotificationQueue::new());
    let screen = RoleScreenController::new(
        gateway.clone(),
        notifications.clone(),
        AuthToken::new(TEST_TOKEN),
    );
    (screen, gateway, notifications)
}

/// Creates a test application state with an in-memory gateway
pub fn create_test_app_state(roles: Vec<Role>) -> (Arc<AppState>, Arc<InMemoryRoleGateway>) {
    let (screen, gateway, notifications) = create_test_screen(roles);
    (Arc::new(AppState::new(screen, notifications)), gateway)
}

/// Scripted edit dialog: confirms with a fixed outcome and remembers what
/// it was opened with.
pub struct ScriptedEditor {
    outcome: Option<Role>,
    pub opened: Mutex<Vec<RoleDialog>>,
}

impl ScriptedEditor {
    /// Confirms the dialog with the given role
    pub fn confirming(role: Role) -> Self {
        Self {
            outcome: Some(role),
            opened: Mutex::new(vec![]),
        }
    }

    /// Dismisses the dialog
    pub fn cancelling() -> Self {
        Self {
            outcome: None,
            opened: Mutex::new(vec![]),
        }
    }

    pub fn opened_dialogs(&self) -> Vec<RoleDialog> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoleEditor for ScriptedEditor {
    async fn open(&self, dialog: RoleDialog) -> Option<Role> {
        self.opened.lock().unwrap().push(dialog);
        self.outcome.clone()
    }
}
