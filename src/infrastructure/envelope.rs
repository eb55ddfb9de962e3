//! Typed view of the backend's response envelope.
//!
//! Successful create/load responses wrap their payload as `items[0].obj[0]`;
//! failures carry `items[0].httpStatus` and `items[0].message`. Both shapes
//! are validated here so callers never index into raw JSON.

use crate::infrastructure::GatewayError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<ResponseItem<T>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseItem<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<Value>, // "409" or 409 depending on the backend version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "Vec::new")]
    pub obj: Vec<T>,
}

impl<T> Envelope<T> {
    /// Wraps a single payload the way the backend does.
    pub fn of(obj: T) -> Self {
        Self {
            items: vec![ResponseItem {
                http_status: None,
                message: None,
                obj: vec![obj],
            }],
        }
    }

    /// Takes `items[0].obj[0]`.
    pub fn into_payload(self) -> Result<T, GatewayError> {
        self.items
            .into_iter()
            .next()
            .and_then(|item| item.obj.into_iter().next())
            .ok_or_else(|| GatewayError::MalformedResponse("envelope carries no object".into()))
    }
}

impl Envelope<Value> {
    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            items: vec![ResponseItem {
                http_status: Some(Value::String(status.to_string())),
                message: Some(message.into()),
                obj: Vec::new(),
            }],
        }
    }

    /// Reads status and message of the first item, falling back to the
    /// transport status when the item has none.
    pub fn into_error(self, transport_status: u16) -> Option<GatewayError> {
        let item = self.items.into_iter().next()?;
        let status = item
            .http_status
            .as_ref()
            .and_then(parse_status)
            .unwrap_or(transport_status);
        Some(GatewayError::Backend {
            status,
            message: item.message.unwrap_or_default(),
        })
    }
}

fn parse_status(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
