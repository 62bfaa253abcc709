use super::types::{Account, AuthenticationResult, TokenRequest};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Error classification reported by the identity SDK at its callback
/// boundary.
///
/// The bridge converts these into tagged responses exactly once, at the
/// point where an SDK callback completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SdkError {
    /// Failure inside the SDK itself (misconfiguration, invalid state)
    Client { code: String, message: String },
    /// Failure while communicating with the identity provider
    Service { code: String, message: String },
    /// The silent flow needs an interactive fallback (session expired or absent)
    UiRequired { message: String },
    /// Any other SDK fault
    Other {
        code: Option<String>,
        message: String,
    },
}

impl fmt::Display for SdkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdkError::Client { code, message } => write!(f, "client error [{code}]: {message}"),
            SdkError::Service { code, message } => write!(f, "service error [{code}]: {message}"),
            SdkError::UiRequired { message } => {
                write!(f, "interactive sign-in required: {message}")
            }
            SdkError::Other { code, message } => match code {
                Some(code) => write!(f, "sdk error [{code}]: {message}"),
                None => write!(f, "sdk error: {message}"),
            },
        }
    }
}

impl std::error::Error for SdkError {}

/// Terminal outcome of a token acquisition.
///
/// Exactly one of these is delivered per request: success, failure, or a
/// user-driven cancel from the interactive UI flow.
#[derive(Clone, Debug)]
pub enum TokenOutcome {
    Success(AuthenticationResult),
    Failure(SdkError),
    Cancelled,
}

/// Terminal outcome of an account query.
#[derive(Clone, Debug)]
pub enum AccountOutcome {
    /// The currently bound account, or `None` when no account is loaded
    Loaded(Option<Account>),
    /// The signed-in account changed since the last query
    Changed {
        prior: Option<Account>,
        current: Option<Account>,
    },
    Failure(SdkError),
}

/// Terminal outcome of a sign-out request.
#[derive(Clone, Debug)]
pub enum SignOutOutcome {
    SignedOut,
    Failure(SdkError),
}

/// One-shot completion callback for token acquisitions. Invoked exactly once.
pub type TokenCallback = Box<dyn FnOnce(TokenOutcome) + Send + 'static>;

/// One-shot completion callback for account queries. Invoked exactly once.
pub type AccountCallback = Box<dyn FnOnce(AccountOutcome) + Send + 'static>;

/// One-shot completion callback for sign-out. Invoked exactly once.
pub type SignOutCallback = Box<dyn FnOnce(SignOutOutcome) + Send + 'static>;

/// One-shot completion callback for client construction. Invoked exactly once.
pub type CreatedCallback =
    Box<dyn FnOnce(Result<Arc<dyn SingleAccountClient>, SdkError>) + Send + 'static>;

/// Opaque foreground UI surface required by the interactive sign-in flow.
///
/// A real SDK binding downcasts this to its platform window type; the
/// bridge only threads it through.
pub trait ForegroundUi: Send + Sync + fmt::Debug {}

/// Supplies the host's foreground UI surface, queried once per
/// interactive request.
pub trait ForegroundProvider: Send + Sync {
    fn foreground(&self) -> Option<Arc<dyn ForegroundUi>>;
}

/// The single-account identity client surface wrapped by the bridge.
///
/// Every operation executes asynchronously inside the SDK and completes
/// through exactly one terminal callback. Implementations must invoke the
/// callback on every path; dropping it surfaces as an error on the
/// bridge side rather than a hang.
pub trait SingleAccountClient: Send + Sync {
    /// Launches the interactive sign-in UI and acquires a token for the
    /// requested scopes.
    fn acquire_token_interactive(
        &self,
        ui: Arc<dyn ForegroundUi>,
        request: TokenRequest,
        on_done: TokenCallback,
    );

    /// Acquires a token without UI, reusing the cached session when one
    /// exists.
    fn acquire_token_silent(&self, request: TokenRequest, on_done: TokenCallback);

    /// Queries the currently signed-in account, reporting account changes.
    fn current_account(&self, on_done: AccountCallback);

    /// Signs the current account out and clears its session.
    fn sign_out(&self, on_done: SignOutCallback);
}

/// Constructs single-account clients from a staged configuration file.
///
/// The SDK requires a filesystem path rather than a byte buffer, which is
/// why the bridge stages configuration into a cache file first.
pub trait ClientFactory: Send + Sync {
    fn create_single_account(&self, config_file: &Path, on_created: CreatedCallback);
}
