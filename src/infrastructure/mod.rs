use crate::domain::role::Role;
use crate::domain::token::AuthToken;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub type GatewayResult<T> = Result<T, GatewayError>;

// Infrastructure layer: backend REST gateway, notification sinks
pub mod envelope;
pub mod notifier;
pub mod role_gateway;
pub use notifier::NotificationQueue;
pub use role_gateway::HttpRoleGateway;

/// Failure of a gateway call.
///
/// Backend rejections (duplicates, missing roles, bad credentials) and
/// transport problems are all reduced to a status code plus a message.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("[{status}] {message}")]
    Backend { status: u16, message: String },
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    /// Status code shown to the user. Transport failures without a response
    /// count as 503, unreadable responses as 502.
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::Backend { status, .. } => *status,
            GatewayError::Transport(e) => e.status().map_or(503, |s| s.as_u16()),
            GatewayError::MalformedResponse(_) => 502,
            GatewayError::InvalidUrl(_) => 500,
        }
    }

    pub fn message(&self) -> String {
        match self {
            GatewayError::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// CRUD access to the backend's Role resources.
///
/// Every call takes the credential explicitly; implementations never keep
/// one of their own.
#[async_trait]
pub trait RoleGateway: Send + Sync {
    async fn create(&self, token: &AuthToken, role: &Role) -> GatewayResult<Role>;
    async fn update(&self, token: &AuthToken, role: &Role) -> GatewayResult<Role>;
    async fn delete_many(&self, token: &AuthToken, names: &[String]) -> GatewayResult<()>;
    async fn load_all(&self, token: &AuthToken) -> GatewayResult<Vec<Role>>;
}

/// Gateway double backed by a vector, with the backend's uniqueness and
/// existence rules.
pub struct InMemoryRoleGateway {
    pub roles: Mutex<Vec<Role>>,
    pub seen_tokens: Mutex<Vec<AuthToken>>,
    calls: AtomicUsize,
    failure: Mutex<Option<(u16, String)>>,
}

impl InMemoryRoleGateway {
    pub fn new(roles: Vec<Role>) -> Self {
        Self {
            roles: Mutex::new(roles),
            seen_tokens: Mutex::new(vec![]),
            calls: AtomicUsize::new(0),
            failure: Mutex::new(None),
        }
    }

    /// Makes the next call fail with the given status and message.
    pub fn fail_next(&self, status: u16, message: impl Into<String>) {
        *self.failure.lock().unwrap() = Some((status, message.into()));
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_token(&self) -> Option<AuthToken> {
        self.seen_tokens.lock().unwrap().last().cloned()
    }

    pub fn role_names(&self) -> Vec<String> {
        self.roles
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }

    fn record(&self, token: &AuthToken) -> GatewayResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_tokens.lock().unwrap().push(token.clone());
        match self.failure.lock().unwrap().take() {
            Some((status, message)) => Err(GatewayError::Backend { status, message }),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryRoleGateway {
    fn default() -> Self {
        Self::new(vec![])
    }
}

#[async_trait]
impl RoleGateway for InMemoryRoleGateway {
    async fn create(&self, token: &AuthToken, role: &Role) -> GatewayResult<Role> {
        self.record(token)?;
        let mut roles = self.roles.lock().unwrap();
        if roles.iter().any(|r| r.name == role.name) {
            return Err(GatewayError::Backend {
                status: 409,
                message: format!("Role with name {} already exists", role.name),
            });
        }
        roles.push(role.clone());
        Ok(role.clone())
    }

    async fn update(&self, token: &AuthToken, role: &Role) -> GatewayResult<Role> {
        self.record(token)?;
        let mut roles = self.roles.lock().unwrap();
        match roles.iter_mut().find(|r| r.name == role.name) {
            Some(existing) => {
                *existing = role.clone();
                Ok(role.clone())
            }
            None => Err(GatewayError::Backend {
                status: 404,
                message: format!("Role with name {} not found", role.name),
            }),
        }
    }

    async fn delete_many(&self, token: &AuthToken, names: &[String]) -> GatewayResult<()> {
        self.record(token)?;
        let mut roles = self.roles.lock().unwrap();
        if let Some(missing) = names.iter().find(|n| !roles.iter().any(|r| &r.name == *n)) {
            return Err(GatewayError::Backend {
                status: 404,
                message: format!("Role with name {missing} not found"),
            });
        }
        roles.retain(|r| !names.contains(&r.name));
        Ok(())
    }

    async fn load_all(&self, token: &AuthToken) -> GatewayResult<Vec<Role>> {
        self.record(token)?;
        Ok(self.roles.lock().unwrap().clone())
    }
}
