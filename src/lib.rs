pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod test_utils;

use application::role_screen::RoleScreenController;
use domain::token::AuthToken;
use infrastructure::{GatewayError, HttpRoleGateway, NotificationQueue, RoleGateway};
use interface::AppState;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

/// Console configuration read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub root_url: String,
    pub auth_token: String,
    pub http_host: String,
    pub http_port: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Creates a new AppConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let root_url = std::env::var("ROOT_URL")
            .map_err(|_| ConfigError::MissingRequired("ROOT_URL".to_string()))?;

        let auth_token = std::env::var("AUTH_TOKEN").unwrap_or_default();
        let http_host = std::env::var("HTTP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let http_port = std::env::var("HTTP_PORT").unwrap_or_else(|_| "8080".to_string());
        let request_timeout_secs = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => 30,
        };

        Ok(AppConfig {
            root_url,
            auth_token,
            http_host,
            http_port,
            request_timeout_secs,
        })
    }

    /// Creates an AppConfig with custom values (useful for testing)
    pub fn new(root_url: String, auth_token: String, http_host: String, http_port: String) -> Self {
        Self {
            root_url,
            auth_token,
            http_host,
            http_port,
            request_timeout_secs: 30,
        }
    }

    /// Creates the HTTP address string from host and port
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::Invalid(format!(
            "REQUEST_TIMEOUT_SECS must be a positive integer, got {raw:?}"
        ))),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingRequired(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// APPLICATION BUILDER
// ============================================================================

/// Builder for the console's application state
#[derive(Default)]
pub struct ConsoleBuilder {
    config: Option<AppConfig>,
    gateway: Option<Arc<dyn RoleGateway>>,
    notifications: Option<Arc<NotificationQueue>>,
}

impl ConsoleBuilder {
    /// Creates a new ConsoleBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the HTTP gateway (tests use an in-memory one)
    pub fn with_gateway(mut self, gateway: Arc<dyn RoleGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn with_notifications(mut self, notifications: Arc<NotificationQueue>) -> Self {
        self.notifications = Some(notifications);
        self
    }

    /// Builds the application state
    pub fn build(self) -> Result<Arc<AppState>, AppError> {
        let config = self.config.ok_or(AppError::MissingConfig)?;

        let gateway = match self.gateway {
            Some(gateway) => gateway,
            None => Arc::new(HttpRoleGateway::new(
                config.root_url.clone(),
                config.request_timeout(),
            )?) as Arc<dyn RoleGateway>,
        };
        let notifications = self.notifications.unwrap_or_default();

        let screen = RoleScreenController::new(
            gateway,
            notifications.clone(),
            AuthToken::new(config.auth_token.clone()),
        );

        Ok(Arc::new(AppState::new(screen, notifications)))
    }
}

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing configuration")]
    MissingConfig,
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

// ============================================================================
// TESTING UTILITIES
// ============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// Creates a test configuration
    pub fn create_test_config() -> AppConfig {
        AppConfig::new(
            "http://localhost:9090/wms".to_string(),
            "test-token".to_string(),
            "127.0.0.1".to_string(),
            "8080".to_string(),
        )
    }

    /// Sets up test environment variables
    pub fn setup_test_env() {
        unsafe {
            std::env::set_var("ROOT_URL", "http://localhost:9090/wms");
            std::env::set_var("AUTH_TOKEN", "env-token");
            std::env::set_var("HTTP_HOST", "0.0.0.0");
            std::env::set_var("HTTP_PORT", "9000");
            std::env::set_var("REQUEST_TIMEOUT_SECS", "5");
        }
    }

    /// Cleans up test environment variables
    pub fn cleanup_test_env() {
        unsafe {
            std::env::remove_var("ROOT_URL");
            std::env::remove_var("AUTH_TOKEN");
            std::env::remove_var("HTTP_HOST");
            std::env::remove_var("HTTP_PORT");
            std::env::remove_var("REQUEST_TIMEOUT_SECS");
        }
    }
}
