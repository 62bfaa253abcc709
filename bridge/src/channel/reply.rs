use crate::auth_bridge::{AuthError, AuthResponse};
use serde::Serialize;
use serde_json::{Value, json};

/// Marker returned by a successful `signOut`.
pub const SIGN_OUT_SUCCESS: &str = "SUCCESS";

/// A single-shot reply rendered back onto the method channel.
///
/// Success values per method: `null` for `init`, the access token string
/// for the token operations, the username or `null` for `loadAccount`, and
/// [`SIGN_OUT_SUCCESS`] for `signOut`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodReply {
    /// The operation succeeded; `result` carries the success value
    Success { result: Value },

    /// The operation failed with a branchable kind tag
    Error {
        kind: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },

    /// The requested method does not exist on this channel
    NotImplemented { method: String },
}

impl MethodReply {
    /// Encodes the reply as one line of channel output.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<AuthResponse> for MethodReply {
    fn from(response: AuthResponse) -> Self {
        match response {
            AuthResponse::Initialized => MethodReply::Success {
                result: Value::Null,
            },
            AuthResponse::TokenAcquired { access_token } => MethodReply::Success {
                result: json!(access_token),
            },
            AuthResponse::AccountLoaded { username } => MethodReply::Success {
                result: json!(username),
            },
            AuthResponse::SignedOut => MethodReply::Success {
                result: json!(SIGN_OUT_SUCCESS),
            },
            AuthResponse::Error { error } => MethodReply::from(&error),
        }
    }
}

impl From<&AuthError> for MethodReply {
    fn from(error: &AuthError) -> Self {
        MethodReply::Error {
            kind: error.kind().to_string(),
            message: error.to_string(),
            code: error.code().map(str::to_string),
        }
    }
}
