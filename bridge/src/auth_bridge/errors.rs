use crate::auth::client::SdkError;
use crate::auth::config::ConfigError;
use thiserror::Error;

/// Errors surfaced by the auth bridge.
///
/// Every failure converts to a stable kind string (see [`AuthError::kind`])
/// plus the SDK's message and optional error code, so the caller can branch
/// on the failure class, e.g. retry interactively after `UiRequiredError`.
/// Nothing propagates past the bridge as an uncaught fault.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// An operation ran before `init` completed
    #[error("account not initialized")]
    Uninitialized,

    /// Failure inside the identity SDK (misconfiguration, invalid state)
    #[error("client error: {message}")]
    Client {
        code: Option<String>,
        message: String,
    },

    /// Failure while communicating with the identity provider
    #[error("service error: {message}")]
    Service {
        code: Option<String>,
        message: String,
    },

    /// The silent flow needs an interactive retry
    #[error("interactive sign-in required: {message}")]
    UiRequired { message: String },

    /// The user dismissed the interactive sign-in flow
    #[error("user cancelled login")]
    Cancelled,

    /// Loading, validating, or staging the client configuration failed
    #[error("configuration load failed: {message}")]
    ConfigLoad { message: String },

    /// Any other SDK fault (account queries, sign-out)
    #[error("sdk error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AuthError {
    /// Stable kind tag surfaced to the channel layer.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::Uninitialized => "Uninitialized",
            AuthError::Client { .. } => "ClientError",
            AuthError::Service { .. } => "ServiceError",
            AuthError::UiRequired { .. } => "UiRequiredError",
            AuthError::Cancelled => "UserCancelled",
            AuthError::ConfigLoad { .. } => "ConfigLoadError",
            AuthError::Sdk { .. } => "SdkError",
        }
    }

    /// SDK error code, when one was reported.
    pub fn code(&self) -> Option<&str> {
        match self {
            AuthError::Client { code, .. }
            | AuthError::Service { code, .. }
            | AuthError::Sdk { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn client(message: impl Into<String>) -> Self {
        AuthError::Client {
            code: None,
            message: message.into(),
        }
    }
}

impl From<SdkError> for AuthError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::Client { code, message } => AuthError::Client {
                code: Some(code),
                message,
            },
            SdkError::Service { code, message } => AuthError::Service {
                code: Some(code),
                message,
            },
            SdkError::UiRequired { message } => AuthError::UiRequired { message },
            SdkError::Other { code, message } => AuthError::Sdk { code, message },
        }
    }
}

impl From<ConfigError> for AuthError {
    fn from(err: ConfigError) -> Self {
        AuthError::ConfigLoad {
            message: err.to_string(),
        }
    }
}

/// Result type alias for bridge operations.
pub type AuthResult<T> = Result<T, AuthError>;
