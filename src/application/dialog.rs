use crate::domain::role::Role;
use async_trait::async_trait;

pub const CREATE_ROLE_TITLE: &str = "Create new Role";
pub const EDIT_ROLE_TITLE: &str = "Edit Role";

/// What the edit dialog is opened with.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleDialog {
    pub title: String,
    pub role: Role,
}

impl RoleDialog {
    pub fn create() -> Self {
        Self {
            title: CREATE_ROLE_TITLE.to_string(),
            role: Role::blank(),
        }
    }

    /// Opens on a copy; the screen's list is untouched until the save succeeds.
    pub fn edit(role: &Role) -> Self {
        Self {
            title: EDIT_ROLE_TITLE.to_string(),
            role: role.clone(),
        }
    }
}

/// The modal role editor. Resolves to the confirmed role, or `None` when the
/// user cancels.
#[async_trait]
pub trait RoleEditor: Send + Sync {
    async fn open(&self, dialog: RoleDialog) -> Option<Role>;
}
