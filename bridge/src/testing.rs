//! Simulated identity SDK for the integration tests and the dev host.
//!
//! [`StubClient`] is a scriptable in-memory single-account client:
//! successful sign-ins bind the account, sign-out clears it, and every SDK
//! entry point is recorded so tests can assert that an operation performed
//! no SDK call at all.

use crate::auth::client::{
    AccountCallback, AccountOutcome, ClientFactory, CreatedCallback, ForegroundProvider,
    ForegroundUi, SdkError, SignOutCallback, SignOutOutcome, SingleAccountClient, TokenCallback,
    TokenOutcome,
};
use crate::auth::config::ResourceBundle;
use crate::auth::types::{Account, AuthenticationResult, TokenRequest};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A single-account client configuration accepted by [`ClientConfig`]
/// validation, for tests that stage a bundled resource.
///
/// [`ClientConfig`]: crate::auth::config::ClientConfig
pub const VALID_CONFIG: &str = r#"{
    "client_id": "4b0db8c2-9f26-4417-8bde-3f0e3656f8e0",
    "redirect_uri": "msauth://com.example.app/callback",
    "authority": "https://login.microsoftonline.com/common",
    "account_mode": "SINGLE"
}"#;

/// Scripted terminal outcome for stubbed token acquisitions.
#[derive(Clone, Debug)]
pub enum Scripted {
    Succeed(AuthenticationResult),
    Fail(SdkError),
    Cancel,
}

impl Scripted {
    /// Successful acquisition issuing `access_token` for `username`.
    pub fn token(access_token: &str, username: &str) -> Self {
        Scripted::Succeed(AuthenticationResult {
            access_token: access_token.to_string(),
            username: Some(username.to_string()),
            expires_on: Some(Utc::now() + Duration::hours(1)),
        })
    }
}

struct StubState {
    account: Option<Account>,
    interactive: Scripted,
    silent: Scripted,
    account_failure: Option<SdkError>,
    sign_out_failure: Option<SdkError>,
    // Some(next) makes the next account query report a change to `next`
    pending_change: Option<Option<Account>>,
    calls: Vec<String>,
}

/// In-memory single-account client with scriptable outcomes.
pub struct StubClient {
    state: Mutex<StubState>,
}

impl StubClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(StubState {
                account: None,
                interactive: Scripted::token("stub-access-token", "user@contoso.com"),
                silent: Scripted::token("stub-access-token", "user@contoso.com"),
                account_failure: None,
                sign_out_failure: None,
                pending_change: None,
                calls: Vec::new(),
            }),
        })
    }

    pub fn script_interactive(&self, outcome: Scripted) {
        self.lock().interactive = outcome;
    }

    pub fn script_silent(&self, outcome: Scripted) {
        self.lock().silent = outcome;
    }

    pub fn script_account_failure(&self, err: SdkError) {
        self.lock().account_failure = Some(err);
    }

    pub fn script_sign_out_failure(&self, err: SdkError) {
        self.lock().sign_out_failure = Some(err);
    }

    /// Makes the next account query report a change to `current`.
    pub fn script_account_change(&self, current: Option<Account>) {
        self.lock().pending_change = Some(current);
    }

    /// Binds an account directly, as if a prior session existed.
    pub fn bind_account(&self, username: &str) {
        self.lock().account = Some(Account::new(username));
    }

    /// Names of the SDK entry points invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StubState> {
        self.state.lock().expect("stub state lock poisoned")
    }

    fn finish_token(&self, entry: &str, scripted: Scripted, on_done: TokenCallback) {
        let outcome = {
            let mut state = self.lock();
            state.calls.push(entry.to_string());
            match scripted {
                Scripted::Succeed(result) => {
                    state.account = result.username.clone().map(Account::new);
                    TokenOutcome::Success(result)
                }
                Scripted::Fail(err) => TokenOutcome::Failure(err),
                Scripted::Cancel => TokenOutcome::Cancelled,
            }
        };
        on_done(outcome);
    }
}

impl SingleAccountClient for StubClient {
    fn acquire_token_interactive(
        &self,
        _ui: Arc<dyn ForegroundUi>,
        _request: TokenRequest,
        on_done: TokenCallback,
    ) {
        let scripted = self.lock().interactive.clone();
        self.finish_token("acquireTokenInteractively", scripted, on_done);
    }

    fn acquire_token_silent(&self, _request: TokenRequest, on_done: TokenCallback) {
        let scripted = self.lock().silent.clone();
        self.finish_token("acquireTokenSilently", scripted, on_done);
    }

    fn current_account(&self, on_done: AccountCallback) {
        let outcome = {
            let mut state = self.lock();
            state.calls.push("loadAccount".to_string());
            if let Some(err) = state.account_failure.clone() {
                AccountOutcome::Failure(err)
            } else if let Some(current) = state.pending_change.take() {
                let prior = state.account.clone();
                state.account = current.clone();
                AccountOutcome::Changed { prior, current }
            } else {
                AccountOutcome::Loaded(state.account.clone())
            }
        };
        on_done(outcome);
    }

    fn sign_out(&self, on_done: SignOutCallback) {
        let outcome = {
            let mut state = self.lock();
            state.calls.push("signOut".to_string());
            if let Some(err) = state.sign_out_failure.clone() {
                SignOutOutcome::Failure(err)
            } else {
                state.account = None;
                SignOutOutcome::SignedOut
            }
        };
        on_done(outcome);
    }
}

/// Scriptable client factory counting constructions.
pub struct StubFactory {
    client: Mutex<Arc<StubClient>>,
    failure: Mutex<Option<SdkError>>,
    created: AtomicUsize,
}

impl StubFactory {
    pub fn new(client: Arc<StubClient>) -> Arc<Self> {
        Arc::new(Self {
            client: Mutex::new(client),
            failure: Mutex::new(None),
            created: AtomicUsize::new(0),
        })
    }

    /// Makes the next construction fail with `err`.
    pub fn script_failure(&self, err: SdkError) {
        *self.failure.lock().expect("factory failure lock poisoned") = Some(err);
    }

    /// Swaps the client handed out by subsequent constructions.
    pub fn set_client(&self, client: Arc<StubClient>) {
        *self.client.lock().expect("factory client lock poisoned") = client;
    }

    /// Number of clients constructed so far.
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ClientFactory for StubFactory {
    fn create_single_account(&self, _config_file: &Path, on_created: CreatedCallback) {
        let scripted_failure = self
            .failure
            .lock()
            .expect("factory failure lock poisoned")
            .take();
        if let Some(err) = scripted_failure {
            on_created(Err(err));
            return;
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        let client = self.client.lock().expect("factory client lock poisoned").clone();
        on_created(Ok(client as Arc<dyn SingleAccountClient>));
    }
}

/// In-memory resource bundle.
pub struct MemoryBundle {
    resources: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBundle {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            resources: Mutex::new(HashMap::new()),
        })
    }

    pub fn insert(&self, path: &str, bytes: impl Into<Vec<u8>>) {
        self.resources
            .lock()
            .expect("bundle lock poisoned")
            .insert(path.to_string(), bytes.into());
    }
}

#[async_trait]
impl ResourceBundle for MemoryBundle {
    async fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.resources
            .lock()
            .expect("bundle lock poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no bundled resource `{path}`"))
            })
    }
}

/// Trivial foreground UI surface.
#[derive(Debug)]
pub struct StubUi;

impl ForegroundUi for StubUi {}

/// Foreground provider that always has a surface available.
pub struct NoopForeground;

impl ForegroundProvider for NoopForeground {
    fn foreground(&self) -> Option<Arc<dyn ForegroundUi>> {
        Some(Arc::new(StubUi))
    }
}

/// Foreground provider for hosts without any UI surface.
pub struct HeadlessForeground;

impl ForegroundProvider for HeadlessForeground {
    fn foreground(&self) -> Option<Arc<dyn ForegroundUi>> {
        None
    }
}
