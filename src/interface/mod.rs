// Interface layer: HTTP surface of the roles screen, DTOs

use crate::application::notifications::{Notification, NotificationLevel};
use crate::application::role_screen::{RoleScreenController, ScreenState};
use crate::domain::grant::Grant;
use crate::domain::pagination::ButtonState;
use crate::domain::role::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GrantDto {
    pub name: String,
    pub description: Option<String>,
}

/// Role as submitted from (or shown in) the edit dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoleDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub grants: Option<Vec<GrantDto>>,
}

impl RoleDto {
    /// Applies the submitted fields to the role the dialog was opened with,
    /// keeping backend bookkeeping the form does not show.
    pub fn apply_to(&self, mut role: Role) -> Role {
        role.name = self.name.clone();
        role.description = self.description.clone();
        if let Some(grants) = &self.grants {
            role.grants = Some(grants.iter().map(GrantDto::to_grant).collect());
        }
        role
    }
}

impl GrantDto {
    fn to_grant(&self) -> Grant {
        Grant {
            name: self.name.clone(),
            description: self.description.clone(),
            extra: Default::default(),
        }
    }
}

impl From<&Grant> for GrantDto {
    fn from(grant: &Grant) -> Self {
        Self {
            name: grant.name.clone(),
            description: grant.description.clone(),
        }
    }
}

impl From<&Role> for RoleDto {
    fn from(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            description: role.description.clone(),
            grants: role
                .grants()
                .map(|grants| grants.iter().map(GrantDto::from).collect()),
        }
    }
}

/// One row of the roles table, with its checkbox CSS class.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleRowDto {
    pub name: String,
    pub description: Option<String>,
    pub grant_count: usize,
    pub checked: bool,
    pub style_class: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ButtonDto {
    pub enabled: bool,
    pub hidden: bool,
}

impl From<ButtonState> for ButtonDto {
    fn from(state: ButtonState) -> Self {
        Self {
            enabled: state.enabled,
            hidden: state.hidden,
        }
    }
}

/// Everything the roles view renders.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScreenView {
    pub loaded: bool,
    pub role_entities: Vec<RoleRowDto>,
    pub selected_role: Option<RoleDto>,
    pub grants: Vec<GrantDto>,
    pub page: usize,
    pub next_button: ButtonDto,
    pub prev_button: ButtonDto,
}

impl From<&RoleScreenController> for ScreenView {
    fn from(screen: &RoleScreenController) -> Self {
        let window = screen.window();
        Self {
            loaded: screen.state() == ScreenState::Loaded,
            role_entities: screen
                .roles()
                .iter()
                .map(|role| RoleRowDto {
                    name: role.name.clone(),
                    description: role.description.clone(),
                    grant_count: role.grant_count(),
                    checked: screen.selection().is_selected(&role.name),
                    style_class: screen.role_style_class(&role.name).to_string(),
                })
                .collect(),
            selected_role: screen.selected_role().map(RoleDto::from),
            grants: window.visible.iter().map(GrantDto::from).collect(),
            page: window.page,
            next_button: window.next.into(),
            prev_button: window.prev.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub level: String,
    pub title: String,
    pub body: String,
    pub dismiss_after_ms: Option<u64>,
    pub raised_at: String,
}

impl From<Notification> for NotificationDto {
    fn from(notification: Notification) -> Self {
        let level = match notification.level {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
        };
        Self {
            level: level.to_string(),
            title: notification.title,
            body: notification.body,
            dismiss_after_ms: notification.dismiss_after_ms,
            raised_at: notification.raised_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
}

pub mod app_state;
pub mod http_handlers;
pub use app_state::AppState;
pub use http_handlers::routes;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_to_keeps_backend_fields() {
        let mut original = Role::new("ROLE_A", "old").with_grants(vec![Grant::new("G1")]);
        original.extra.insert("version".to_string(), json!(4));

        let submitted = RoleDto {
            name: "ROLE_A".to_string(),
            description: Some("new".to_string()),
            grants: None,
        };
        let role = submitted.apply_to(original);
        assert_eq!(role.description.as_deref(), Some("new"));
        assert_eq!(role.grant_count(), 1);
        assert_eq!(role.extra.get("version"), Some(&json!(4)));
    }

    #[test]
    fn test_apply_to_replaces_grants_when_given() {
        let submitted = RoleDto {
            name: "ROLE_B".to_string(),
            description: None,
            grants: Some(vec![GrantDto {
                name: "G9".to_string(),
                description: None,
            }]),
        };
        let role = submitted.apply_to(Role::blank());
        assert_eq!(role.name, "ROLE_B");
        assert_eq!(role.grants().unwrap()[0].name, "G9");
    }

    #[test]
    fn test_button_and_notification_dto() {
        let dto = ButtonDto::from(ButtonState::PARKED);
        assert!(dto.enabled && dto.hidden);

        let dto = NotificationDto::from(Notification::error(409, "Role exists"));
        assert_eq!(dto.level, "error");
        assert_eq!(dto.body, "[409] Role exists");
    }
}
