use crate::domain::role::Role;
use crate::domain::token::AuthToken;
use crate::infrastructure::envelope::Envelope;
use crate::infrastructure::{GatewayError, GatewayResult, RoleGateway};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Header carrying the caller's credential on every backend request.
pub const AUTH_TOKEN_HEADER: &str = "Auth-Token";

/// Role gateway talking to the backend's `/roles` REST resource.
#[derive(Debug, Clone)]
pub struct HttpRoleGateway {
    client: reqwest::Client,
    root_url: String,
}

impl HttpRoleGateway {
    pub fn new(root_url: impl Into<String>, timeout: Duration) -> GatewayResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, root_url))
    }

    pub fn with_client(client: reqwest::Client, root_url: impl Into<String>) -> Self {
        let root_url = root_url.into().trim_end_matches('/').to_string();
        Self { client, root_url }
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    fn roles_url(&self) -> String {
        format!("{}/roles", self.root_url)
    }

    /// `{root}/roles/{a,b,c}` with the joined names as one path segment.
    /// Names containing the separator are rejected.
    fn delete_url(&self, names: &[String]) -> GatewayResult<Url> {
        if let Some(name) = names.iter().find(|n| n.contains(',')) {
            return Err(GatewayError::InvalidUrl(format!(
                "role name {name:?} contains ','"
            )));
        }
        let mut url =
            Url::parse(&self.roles_url()).map_err(|e| GatewayError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.root_url.clone()))?
            .push(&names.join(","));
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, token: &AuthToken) -> GatewayResult<Response> {
        let response = request
            .header(AUTH_TOKEN_HEADER, token.as_str())
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(failure(response).await)
        }
    }
}

#[async_trait]
impl RoleGateway for HttpRoleGateway {
    #[instrument(skip(self, token, role), fields(role = %role.name))]
    async fn create(&self, token: &AuthToken, role: &Role) -> GatewayResult<Role> {
        let response = self
            .send(self.client.post(self.roles_url()).json(role), token)
            .await?;
        let created = decode::<Envelope<Role>>(response).await?.into_payload()?;
        debug!("Role created");
        Ok(created)
    }

    #[instrument(skip(self, token, role), fields(role = %role.name))]
    async fn update(&self, token: &AuthToken, role: &Role) -> GatewayResult<Role> {
        let response = self
            .send(self.client.put(self.roles_url()).json(role), token)
            .await?;
        // PUT answers with the bare role, not an envelope
        decode::<Role>(response).await
    }

    #[instrument(skip(self, token), fields(count = names.len()))]
    async fn delete_many(&self, token: &AuthToken, names: &[String]) -> GatewayResult<()> {
        let url = self.delete_url(names)?;
        self.send(self.client.delete(url), token).await?;
        debug!("Roles deleted");
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn load_all(&self, token: &AuthToken) -> GatewayResult<Vec<Role>> {
        let response = self.send(self.client.get(self.roles_url()), token).await?;
        let roles = decode::<Envelope<Vec<Role>>>(response)
            .await?
            .into_payload()?;
        debug!(count = roles.len(), "Roles loaded");
        Ok(roles)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| GatewayError::MalformedResponse(e.to_string()))
}

/// Turns a non-2xx response into a backend failure, preferring the status
/// and message of the error envelope over the raw HTTP status.
async fn failure(response: Response) -> GatewayError {
    let status = response.status();
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => return GatewayError::Transport(e),
    };
    if let Some(error) = serde_json::from_slice::<Envelope<serde_json::Value>>(&body)
        .ok()
        .and_then(|envelope| envelope.into_error(status.as_u16()))
    {
        warn!(status = error.status(), "Backend rejected request");
        return error;
    }
    warn!(status = status.as_u16(), "Backend failed without error envelope");
    GatewayError::Backend {
        status: status.as_u16(),
        message: fallback_message(status, &body),
    }
}

fn fallback_message(status: StatusCode, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        text
    }
}
