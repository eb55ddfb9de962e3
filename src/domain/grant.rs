use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Grant value object: an individual permission item granted to a role.
///
/// The console only cares about a grant's position and count inside a role,
/// so fields it does not know about are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Grant {
    /// Creates a new Grant value object.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            extra: Map::new(),
        }
    }
}
