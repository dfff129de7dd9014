//! Application claims carried inside access tokens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Scope granting read access to the gold codes resource.
pub const GOLD_CODES_READ: &str = "gold_codes:read";

/// Claims asserted about the authenticated principal.
///
/// `username` is always present. `scope` is a space-delimited capability list.
/// Any other application data travels in `extra` and is flattened into the
/// token payload alongside the named fields.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            scope: String::new(),
            extra: Map::new(),
        }
    }

    /// Add a scope to the space-delimited scope list (no duplicates).
    pub fn with_scope(mut self, scope: &str) -> Self {
        if !self.has_scope(scope) {
            if !self.scope.is_empty() {
                self.scope.push(' ');
            }
            self.scope.push_str(scope);
        }
        self
    }

    /// Attach an arbitrary application claim.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scope.split_whitespace().any(|s| s == scope)
    }
}

/// Full token payload: application claims plus registered time claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub claims: Claims,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
