use super::errors::AuthError;

/// Response types for auth bridge operations.
///
/// Each variant corresponds to the success value of one
/// [`AuthCommand`](super::AuthCommand); failures of any operation fold into
/// [`Error`](AuthResponse::Error) so callers always receive exactly one
/// terminal response per command.
///
/// # Examples
///
/// ```no_run
/// use bridge::auth_bridge::AuthResponse;
///
/// fn handle(response: AuthResponse) {
///     match response {
///         AuthResponse::TokenAcquired { access_token } => {
///             println!("token: {access_token}");
///         }
///         AuthResponse::Error { error } => {
///             eprintln!("operation failed ({}): {error}", error.kind());
///         }
///         _ => {}
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResponse {
    /// The client was constructed and the bridge is ready.
    Initialized,

    /// A token acquisition completed.
    TokenAcquired {
        /// The issued access token
        access_token: String,
    },

    /// The account query completed.
    AccountLoaded {
        /// Username of the active account, or `None` when no account is
        /// loaded or the account changed to none
        username: Option<String>,
    },

    /// Sign-out completed and the session was cleared.
    SignedOut,

    /// The operation failed.
    Error {
        /// The specific error that occurred
        error: AuthError,
    },
}
