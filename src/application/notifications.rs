use crate::infrastructure::GatewayError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Display;

/// How long success toasts stay on screen.
pub const SUCCESS_DISMISS_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A user-facing toast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub body: String,
    pub dismiss_after_ms: Option<u64>,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    /// Error toast rendered as `[code] text`.
    pub fn error(code: impl Display, text: &str) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: "Server Error".to_string(),
            body: format!("[{code}] {text}"),
            dismiss_after_ms: None,
            raised_at: Utc::now(),
        }
    }

    pub fn success(code: impl Display, text: &str) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: "Success".to_string(),
            body: format!("[{code}] {text}"),
            dismiss_after_ms: Some(SUCCESS_DISMISS_MS),
            raised_at: Utc::now(),
        }
    }

    pub fn from_gateway_error(error: &GatewayError) -> Self {
        Self::error(error.status(), &error.message())
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Sink for toasts; the screen raises exactly one per failed backend call.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
