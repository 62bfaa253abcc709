use crate::auth_bridge::AuthCommand;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// A decoded method-channel call: a method name plus named JSON arguments.
#[derive(Clone, Debug, Deserialize)]
pub struct MethodCall {
    /// Name of the invoked method
    pub method: String,
    /// Named arguments; absent arguments decode as `null`
    #[serde(default)]
    pub arguments: Value,
}

/// Errors produced while decoding a call into a typed command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CallError {
    #[error("method `{method}` is not implemented")]
    NotImplemented { method: String },

    #[error("invalid arguments for `{method}`: {reason}")]
    InvalidArguments { method: String, reason: String },
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// Decodes one line of channel input.
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// Validates arguments and converts the call into a typed command.
    ///
    /// `configPath` is required for `init`; `scopes` (a non-empty string
    /// array) and `authority` are required for both token operations.
    pub fn into_command(self) -> Result<AuthCommand, CallError> {
        match self.method.as_str() {
            "init" => {
                let config_path = self.string_arg("configPath")?;
                Ok(AuthCommand::Init { config_path })
            }
            "acquireTokenInteractively" => {
                let scopes = self.scopes_arg()?;
                let authority = self.string_arg("authority")?;
                Ok(AuthCommand::AcquireTokenInteractively { scopes, authority })
            }
            "acquireTokenSilently" => {
                let scopes = self.scopes_arg()?;
                let authority = self.string_arg("authority")?;
                Ok(AuthCommand::AcquireTokenSilently { scopes, authority })
            }
            "loadAccount" => Ok(AuthCommand::LoadAccount),
            "signOut" => Ok(AuthCommand::SignOut),
            _ => Err(CallError::NotImplemented {
                method: self.method,
            }),
        }
    }

    fn string_arg(&self, name: &str) -> Result<String, CallError> {
        match self.arguments.get(name) {
            Some(Value::String(value)) if !value.is_empty() => Ok(value.clone()),
            Some(Value::String(_)) => Err(self.invalid(format!("`{name}` must not be empty"))),
            Some(_) => Err(self.invalid(format!("`{name}` must be a string"))),
            None => Err(self.invalid(format!("missing required argument `{name}`"))),
        }
    }

    fn scopes_arg(&self) -> Result<Vec<String>, CallError> {
        let values = match self.arguments.get("scopes") {
            Some(Value::Array(values)) => values,
            Some(_) => return Err(self.invalid("`scopes` must be an array of strings")),
            None => return Err(self.invalid("missing required argument `scopes`")),
        };
        if values.is_empty() {
            return Err(self.invalid("`scopes` must not be empty"));
        }
        values
            .iter()
            .map(|value| match value {
                Value::String(scope) => Ok(scope.clone()),
                _ => Err(self.invalid("`scopes` must be an array of strings")),
            })
            .collect()
    }

    fn invalid(&self, reason: impl Into<String>) -> CallError {
        CallError::InvalidArguments {
            method: self.method.clone(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};
    use serde_json::json;

    #[test]
    fn decodes_init_call() {
        let call = MethodCall::new("init", json!({ "configPath": "msal_config.json" }));
        let command = assert_ok!(call.into_command());
        assert_eq!(
            command,
            AuthCommand::Init {
                config_path: "msal_config.json".to_string()
            }
        );
    }

    #[test]
    fn decodes_token_call_arguments() {
        let call = MethodCall::new(
            "acquireTokenSilently",
            json!({
                "scopes": ["User.Read", "Mail.Read"],
                "authority": "https://login.microsoftonline.com/common"
            }),
        );
        let command = assert_ok!(call.into_command());
        assert_eq!(
            command,
            AuthCommand::AcquireTokenSilently {
                scopes: vec!["User.Read".to_string(), "Mail.Read".to_string()],
                authority: "https://login.microsoftonline.com/common".to_string(),
            }
        );
    }

    #[test]
    fn rejects_missing_scopes() {
        let call = MethodCall::new(
            "acquireTokenInteractively",
            json!({ "authority": "https://login.microsoftonline.com/common" }),
        );
        let err = assert_err!(call.into_command());
        assert!(matches!(err, CallError::InvalidArguments { .. }));
        assert!(err.to_string().contains("scopes"));
    }

    #[test]
    fn rejects_empty_scope_list() {
        let call = MethodCall::new(
            "acquireTokenInteractively",
            json!({ "scopes": [], "authority": "https://login.microsoftonline.com/common" }),
        );
        let err = assert_err!(call.into_command());
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn rejects_non_string_authority() {
        let call = MethodCall::new(
            "acquireTokenSilently",
            json!({ "scopes": ["User.Read"], "authority": 42 }),
        );
        let err = assert_err!(call.into_command());
        assert!(err.to_string().contains("authority"));
    }

    #[test]
    fn unknown_method_is_not_implemented() {
        let call = MethodCall::new("refreshToken", Value::Null);
        let err = assert_err!(call.into_command());
        assert_eq!(
            err,
            CallError::NotImplemented {
                method: "refreshToken".to_string()
            }
        );
    }

    #[test]
    fn parameterless_methods_ignore_arguments() {
        let call = MethodCall::new("loadAccount", Value::Null);
        assert_eq!(assert_ok!(call.into_command()), AuthCommand::LoadAccount);

        let call = MethodCall::new("signOut", json!({ "ignored": true }));
        assert_eq!(assert_ok!(call.into_command()), AuthCommand::SignOut);
    }
}
