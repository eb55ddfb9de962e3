use super::dialog::{RoleDialog, RoleEditor};
use super::notifications::{Notification, Notifier};
use crate::domain::pagination::{GrantsPaginator, PageWindow};
use crate::domain::role::Role;
use crate::domain::selection::SelectionTracker;
use crate::domain::token::AuthToken;
use crate::infrastructure::{GatewayError, RoleGateway};
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub const CHECKED_ROW_CLASS: &str = "glyphicon glyphicon-check";
pub const UNCHECKED_ROW_CLASS: &str = "glyphicon glyphicon-unchecked";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Empty,
    Loaded,
}

#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

pub type ScreenResult<T> = Result<T, ScreenError>;

/// Drives the "Roles Management" screen.
///
/// Owns the loaded role list, the checked rows and the grants pager of the
/// selected role. Backend failures are reported once through the notifier
/// and handed back as values; the screen keeps its previous state.
pub struct RoleScreenController {
    gateway: Arc<dyn RoleGateway>,
    notifier: Arc<dyn Notifier>,
    auth_token: AuthToken,
    state: ScreenState,
    roles: Vec<Role>,
    selected_role: Option<Role>,
    selection: SelectionTracker,
    paginator: GrantsPaginator,
}

impl RoleScreenController {
    pub fn new(
        gateway: Arc<dyn RoleGateway>,
        notifier: Arc<dyn Notifier>,
        auth_token: AuthToken,
    ) -> Self {
        Self {
            gateway,
            notifier,
            auth_token,
            state: ScreenState::Empty,
            roles: vec![],
            selected_role: None,
            selection: SelectionTracker::new(),
            paginator: GrantsPaginator::new(),
        }
    }

    /// Replaces the credential used for subsequent backend calls.
    pub fn set_auth_token(&mut self, auth_token: AuthToken) {
        self.auth_token = auth_token;
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn selected_role(&self) -> Option<&Role> {
        self.selected_role.as_ref()
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn window(&self) -> PageWindow {
        self.paginator.window()
    }

    /// Fetches all roles and replaces the list. Checked rows are dropped
    /// before the request goes out.
    #[instrument(skip(self))]
    pub async fn load_roles(&mut self) -> ScreenResult<()> {
        self.selection.clear();
        let roles = match self.gateway.load_all(&self.auth_token).await {
            Ok(roles) => roles,
            Err(e) => return Err(self.report(e)),
        };
        info!(count = roles.len(), "Roles loaded");
        self.roles = roles;
        self.selected_role = None;
        self.paginator.clear();
        self.state = ScreenState::Loaded;
        Ok(())
    }

    /// Opens the create dialog and appends the created role locally.
    #[instrument(skip(self, editor))]
    pub async fn add_role(&mut self, editor: &dyn RoleEditor) -> ScreenResult<()> {
        if self.roles.is_empty() {
            if let Err(e) = self.load_roles().await {
                debug!(error = %e, "Initial load before add failed");
            }
        }
        let Some(role) = editor.open(RoleDialog::create()).await else {
            debug!("Create dialog cancelled");
            return Ok(());
        };
        let created = match self.gateway.create(&self.auth_token, &role).await {
            Ok(created) => created,
            Err(e) => return Err(self.report(e)),
        };
        info!(role = %created.name, "Role added");
        self.roles.push(created);
        self.state = ScreenState::Loaded;
        Ok(())
    }

    /// Opens the edit dialog on a copy of the role and reloads after saving.
    #[instrument(skip(self, editor))]
    pub async fn edit_role(&mut self, name: &str, editor: &dyn RoleEditor) -> ScreenResult<()> {
        let dialog = RoleDialog::edit(self.find_role(name)?);
        let Some(role) = editor.open(dialog).await else {
            debug!("Edit dialog cancelled");
            return Ok(());
        };
        if let Err(e) = self.gateway.update(&self.auth_token, &role).await {
            return Err(self.report(e));
        }
        info!(role = %role.name, "Role saved");
        self.notifier
            .notify(Notification::success("OK", "Saved successfully."));
        self.load_roles().await
    }

    /// Deletes every checked role in one request, then reloads.
    #[instrument(skip(self))]
    pub async fn delete_role(&mut self) -> ScreenResult<()> {
        let names: Vec<String> = self
            .checked_roles()
            .into_iter()
            .map(|r| r.name.clone())
            .collect();
        if names.is_empty() {
            debug!("Nothing checked, delete skipped");
            return Ok(());
        }
        if let Err(e) = self.gateway.delete_many(&self.auth_token, &names).await {
            return Err(self.report(e));
        }
        info!(count = names.len(), "Roles deleted");
        self.notifier
            .notify(Notification::success("OK", "Deleted selected Roles."));
        self.load_roles().await
    }

    /// Makes the role active and starts paging over its grants.
    pub fn on_role_selected(&mut self, name: &str) -> ScreenResult<PageWindow> {
        let role = self.find_role(name)?.clone();
        let window = self.paginator.select_role(role.grants());
        self.selected_role = Some(role);
        Ok(window)
    }

    /// Toggles the row's checkbox; returns whether it is now checked.
    pub fn on_role_checked(&mut self, name: &str) -> bool {
        self.selection.toggle(name)
    }

    /// Roles of the current list whose rows are checked, in check order.
    pub fn checked_roles(&self) -> Vec<&Role> {
        self.selection
            .selected()
            .iter()
            .filter_map(|name| self.roles.iter().find(|r| &r.name == name))
            .collect()
    }

    pub fn role_style_class(&self, name: &str) -> &'static str {
        if self.selection.is_selected(name) {
            CHECKED_ROW_CLASS
        } else {
            UNCHECKED_ROW_CLASS
        }
    }

    pub fn next_grants_page(&mut self) -> PageWindow {
        self.paginator.next()
    }

    pub fn previous_grants_page(&mut self) -> PageWindow {
        self.paginator.previous()
    }

    fn find_role(&self, name: &str) -> ScreenResult<&Role> {
        self.roles
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| ScreenError::UnknownRole(name.to_string()))
    }

    fn report(&self, error: GatewayError) -> ScreenError {
        tracing::error!(status = error.status(), error = %error, "Backend call failed");
        self.notifier.notify(Notification::from_gateway_error(&error));
        ScreenError::Gateway(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grant::Grant;
    use crate::infrastructure::{InMemoryRoleGateway, NotificationQueue};

    fn screen(roles: Vec<Role>) -> (RoleScreenController, Arc<InMemoryRoleGateway>) {
        let gateway = Arc::new(InMemoryRoleGateway::new(roles));
        let screen = RoleScreenController::new(
            gateway.clone(),
            Arc::new(NotificationQueue::new()),
            AuthToken::new("t"),
        );
        (screen, gateway)
    }

    #[tokio::test]
    async fn test_starts_empty_and_loads() {
        let (mut screen, _) = screen(vec![Role::new("ROLE_A", "")]);
        assert_eq!(screen.state(), ScreenState::Empty);
        screen.load_roles().await.unwrap();
        assert_eq!(screen.state(), ScreenState::Loaded);
        assert_eq!(screen.roles().len(), 1);
    }

    #[tokio::test]
    async fn test_row_style_class_follows_checkbox() {
        let (mut screen, _) = screen(vec![Role::new("ROLE_A", "")]);
        screen.load_roles().await.unwrap();
        assert_eq!(screen.role_style_class("ROLE_A"), UNCHECKED_ROW_CLASS);
        assert!(screen.on_role_checked("ROLE_A"));
        assert_eq!(screen.role_style_class("ROLE_A"), CHECKED_ROW_CLASS);
    }

    #[tokio::test]
    async fn test_selecting_unknown_role_fails() {
        let (mut screen, _) = screen(vec![]);
        screen.load_roles().await.unwrap();
        assert!(matches!(
            screen.on_role_selected("ROLE_X"),
            Err(ScreenError::UnknownRole(_))
        ));
        assert!(screen.selected_role().is_none());
    }

    #[tokio::test]
    async fn test_selecting_role_pages_its_grants() {
        let grants: Vec<Grant> = (0..7).map(|i| Grant::new(format!("G{i}"))).collect();
        let (mut screen, _) = screen(vec![Role::new("ROLE_A", "").with_grants(grants)]);
        screen.load_roles().await.unwrap();
        let window = screen.on_role_selected("ROLE_A").unwrap();
        assert_eq!(window.visible.len(), 5);
        assert_eq!(screen.next_grants_page().visible.len(), 2);
        assert_eq!(screen.selected_role().unwrap().name, "ROLE_A");
    }
}
