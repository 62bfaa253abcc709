pub mod client;
pub mod config;
pub mod types;

pub use client::{
    AccountOutcome, ClientFactory, ForegroundProvider, ForegroundUi, SdkError, SignOutOutcome,
    SingleAccountClient, TokenOutcome,
};
pub use config::{AccountMode, ClientConfig, ConfigCache, ConfigError, DirBundle, ResourceBundle};
pub use types::{Account, AuthenticationResult, TokenRequest};
