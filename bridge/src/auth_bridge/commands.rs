/// Commands for auth bridge operations using the command pattern.
///
/// This enum defines the five operations that can be performed through the
/// [`AuthBridge`](super::AuthBridge). Each command encapsulates the
/// parameters needed for a specific operation, keeping the channel decoding
/// separate from execution.
///
/// # Examples
///
/// ```no_run
/// use bridge::auth_bridge::AuthCommand;
///
/// // Initialize the client from a bundled configuration resource
/// let command = AuthCommand::Init {
///     config_path: "msal_config.json".to_string(),
/// };
///
/// // Acquire a token without UI
/// let command = AuthCommand::AcquireTokenSilently {
///     scopes: vec!["User.Read".to_string()],
///     authority: "https://login.microsoftonline.com/common".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCommand {
    /// Load the bundled configuration, stage it to the cache, and construct
    /// the single-account client.
    Init {
        /// Bundle-relative path of the configuration resource
        config_path: String,
    },

    /// Launch the SDK's interactive sign-in UI and acquire a token.
    AcquireTokenInteractively {
        /// Permission strings requested for the issued token
        scopes: Vec<String>,
        /// Identity-provider endpoint URL
        authority: String,
    },

    /// Acquire a token without UI, reusing the cached session.
    AcquireTokenSilently {
        /// Permission strings requested for the issued token
        scopes: Vec<String>,
        /// Identity-provider endpoint URL
        authority: String,
    },

    /// Query the currently signed-in account.
    LoadAccount,

    /// Sign the current account out and clear its session.
    SignOut,
}

impl AuthCommand {
    /// Channel method name this command is dispatched under.
    pub fn method_name(&self) -> &'static str {
        match self {
            AuthCommand::Init { .. } => "init",
            AuthCommand::AcquireTokenInteractively { .. } => "acquireTokenInteractively",
            AuthCommand::AcquireTokenSilently { .. } => "acquireTokenSilently",
            AuthCommand::LoadAccount => "loadAccount",
            AuthCommand::SignOut => "signOut",
        }
    }
}
