use super::commands::AuthCommand;
use super::errors::{AuthError, AuthResult};
use super::responses::AuthResponse;
use crate::auth::client::{
    AccountOutcome, ClientFactory, ForegroundProvider, SignOutOutcome, SingleAccountClient,
    TokenOutcome,
};
use crate::auth::config::{ClientConfig, ConfigCache, ResourceBundle};
use crate::auth::types::TokenRequest;
use std::sync::Arc;
use tokio::sync::{RwLock, oneshot};

/// The stateful adapter between the method channel and the identity SDK.
///
/// `AuthBridge` owns the single client handle, translates typed commands
/// into SDK calls, and adapts the SDK's one-shot callbacks into single
/// responses. Each callback maps onto exactly one oneshot channel; a
/// callback the SDK drops without invoking resolves to an error rather
/// than a hang.
///
/// # State
///
/// The bridge starts uninitialized. A successful [`AuthCommand::Init`]
/// stores the client handle; all token and account operations require the
/// handle and fail immediately with an `Uninitialized` error while it is
/// absent; requests are never queued behind an in-flight `init`. Calling
/// `init` again replaces the handle, so exactly one is active at any time.
///
/// # Thread Safety
///
/// The handle lives in an async `RwLock`: written once per `init`
/// completion, read by every other operation. The bridge is safe to share
/// across tasks behind an `Arc`.
pub struct AuthBridge {
    factory: Arc<dyn ClientFactory>,
    bundle: Arc<dyn ResourceBundle>,
    foreground: Arc<dyn ForegroundProvider>,
    config_cache: ConfigCache,
    client: RwLock<Option<Arc<dyn SingleAccountClient>>>,
}

impl AuthBridge {
    /// Creates a bridge wired to the given SDK factory, resource bundle,
    /// and foreground provider. The bridge starts uninitialized.
    pub fn new(
        factory: Arc<dyn ClientFactory>,
        bundle: Arc<dyn ResourceBundle>,
        foreground: Arc<dyn ForegroundProvider>,
        config_cache: ConfigCache,
    ) -> Self {
        Self {
            factory,
            bundle,
            foreground,
            config_cache,
            client: RwLock::new(None),
        }
    }

    /// Executes a bridge command and returns the response.
    ///
    /// This is the single entry point for all bridge operations. Errors are
    /// caught and converted to [`AuthResponse::Error`]; this method never
    /// panics and never fails to produce a response.
    pub async fn execute_command(&self, command: AuthCommand) -> AuthResponse {
        log::debug!("Executing command: {}", command.method_name());

        match self.handle_command(command).await {
            Ok(response) => response,
            Err(error) => {
                log::error!("Command execution failed: {error}");
                AuthResponse::Error { error }
            }
        }
    }

    async fn handle_command(&self, command: AuthCommand) -> AuthResult<AuthResponse> {
        match command {
            AuthCommand::Init { config_path } => self.handle_init(&config_path).await,
            AuthCommand::AcquireTokenInteractively { scopes, authority } => {
                self.handle_acquire_interactive(TokenRequest { scopes, authority })
                    .await
            }
            AuthCommand::AcquireTokenSilently { scopes, authority } => {
                self.handle_acquire_silent(TokenRequest { scopes, authority })
                    .await
            }
            AuthCommand::LoadAccount => self.handle_load_account().await,
            AuthCommand::SignOut => self.handle_sign_out().await,
        }
    }

    /// Loads and stages the configuration, then constructs the
    /// single-account client. Completion is reported to the caller; a
    /// repeated `init` replaces the previous handle.
    async fn handle_init(&self, config_path: &str) -> AuthResult<AuthResponse> {
        let bytes = self
            .bundle
            .read(config_path)
            .await
            .map_err(|err| AuthError::ConfigLoad {
                message: format!("could not open config resource `{config_path}`: {err}"),
            })?;
        let config = ClientConfig::from_slice(&bytes)?;
        log::debug!("Staging configuration for client {}", config.client_id);
        let staged = self.config_cache.stage(&bytes).await?;

        let (tx, rx) = oneshot::channel();
        self.factory.create_single_account(
            &staged,
            Box::new(move |created| {
                let _ = tx.send(created);
            }),
        );
        let client = await_callback(rx).await?.map_err(AuthError::from)?;

        *self.client.write().await = Some(client);
        log::info!("Single-account client initialized");
        Ok(AuthResponse::Initialized)
    }

    async fn handle_acquire_interactive(&self, request: TokenRequest) -> AuthResult<AuthResponse> {
        let client = self.client_handle().await?;
        let ui = self.foreground.foreground().ok_or_else(|| {
            AuthError::client("no foreground UI surface is available for interactive sign-in")
        })?;

        let (tx, rx) = oneshot::channel();
        client.acquire_token_interactive(
            ui,
            request,
            Box::new(move |outcome| {
                let _ = tx.send(outcome);
            }),
        );
        token_response(await_callback(rx).await?)
    }

    async fn handle_acquire_silent(&self, request: TokenRequest) -> AuthResult<AuthResponse> {
        let client = self.client_handle().await?;

        let (tx, rx) = oneshot::channel();
        client.acquire_token_silent(
            request,
            Box::new(move |outcome| {
                let _ = tx.send(outcome);
            }),
        );
        token_response(await_callback(rx).await?)
    }

    async fn handle_load_account(&self) -> AuthResult<AuthResponse> {
        let client = self.client_handle().await?;

        let (tx, rx) = oneshot::channel();
        client.current_account(Box::new(move |outcome| {
            let _ = tx.send(outcome);
        }));

        match await_callback(rx).await? {
            AccountOutcome::Loaded(account) => Ok(AuthResponse::AccountLoaded {
                username: account.map(|account| account.username),
            }),
            AccountOutcome::Changed { prior, current } => {
                log::debug!(
                    "Signed-in account changed: {:?} -> {:?}",
                    prior.as_ref().map(|a| a.username.as_str()),
                    current.as_ref().map(|a| a.username.as_str()),
                );
                Ok(AuthResponse::AccountLoaded {
                    username: current.map(|account| account.username),
                })
            }
            AccountOutcome::Failure(err) => Err(err.into()),
        }
    }

    async fn handle_sign_out(&self) -> AuthResult<AuthResponse> {
        let client = self.client_handle().await?;

        let (tx, rx) = oneshot::channel();
        client.sign_out(Box::new(move |outcome| {
            let _ = tx.send(outcome);
        }));

        match await_callback(rx).await? {
            SignOutOutcome::SignedOut => Ok(AuthResponse::SignedOut),
            SignOutOutcome::Failure(err) => Err(err.into()),
        }
    }

    /// Current client handle; fails fast while `init` has not completed.
    async fn client_handle(&self) -> AuthResult<Arc<dyn SingleAccountClient>> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(AuthError::Uninitialized)
    }
}

/// Awaits the single terminal callback of an SDK operation.
async fn await_callback<T>(rx: oneshot::Receiver<T>) -> AuthResult<T> {
    rx.await
        .map_err(|_| AuthError::client("the SDK dropped the completion callback"))
}

fn token_response(outcome: TokenOutcome) -> AuthResult<AuthResponse> {
    match outcome {
        TokenOutcome::Success(result) => {
            log::debug!("Successfully authenticated");
            Ok(AuthResponse::TokenAcquired {
                access_token: result.access_token,
            })
        }
        TokenOutcome::Failure(err) => Err(err.into()),
        TokenOutcome::Cancelled => {
            log::debug!("User cancelled login");
            Err(AuthError::Cancelled)
        }
    }
}
