use chrono::{DateTime, Utc};

/// Parameters of a token acquisition forwarded to the identity SDK.
///
/// `scopes` is the set of permission strings requested for the issued
/// token; `authority` is the identity-provider endpoint used for the
/// request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRequest {
    /// Permission strings requested for the issued token
    pub scopes: Vec<String>,
    /// Identity-provider endpoint URL
    pub authority: String,
}

/// Result of a completed token acquisition as reported by the SDK.
#[derive(Clone, Debug)]
pub struct AuthenticationResult {
    /// The issued access token
    pub access_token: String,
    /// Username of the account the token was issued for, when known
    pub username: Option<String>,
    /// Token expiry, when the SDK reports one
    pub expires_on: Option<DateTime<Utc>>,
}

/// A signed-in account as reported by the identity SDK.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    /// User principal name of the signed-in account
    pub username: String,
}

impl Account {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
