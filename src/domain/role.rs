use crate::domain::grant::Grant;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role entity: a named permission grouping, identified by its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grants: Option<Vec<Grant>>, // absent when the backend sends none
    #[serde(flatten)]
    pub extra: Map<String, Value>, // backend bookkeeping (version, pk, ...)
}

impl Role {
    /// Creates a role with a name and description and no grants.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            grants: None,
            extra: Map::new(),
        }
    }

    /// The empty role handed to the "create" dialog.
    pub fn blank() -> Self {
        Self::new("", "")
    }

    pub fn with_grants(mut self, grants: Vec<Grant>) -> Self {
        self.grants = Some(grants);
        self
    }

    /// Grants of this role, `None` when the backend did not send any.
    pub fn grants(&self) -> Option<&[Grant]> {
        self.grants.as_deref()
    }

    pub fn grant_count(&self) -> usize {
        self.grants.as_ref().map_or(0, Vec::len)
    }
}
