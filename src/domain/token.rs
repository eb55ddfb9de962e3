use std::fmt;

/// Opaque credential forwarded to the backend on every request.
///
/// Issuing and refreshing the token happens elsewhere; the console only
/// passes it along. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if no token has been issued yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("AuthToken(<none>)")
        } else {
            f.write_str("AuthToken(<redacted>)")
        }
    }
}
