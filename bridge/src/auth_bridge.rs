//! # Auth Bridge Module
//!
//! This module holds the stateful adapter between the method channel and
//! the single-account identity SDK.
//!
//! ## Core Components
//!
//! - [`AuthBridge`] - Main entry point dispatching the five bridge operations
//! - [`AuthCommand`] / [`AuthResponse`] - Command/response pattern for operations
//! - [`AuthError`] - Tagged error taxonomy surfaced to the caller
//!
//! ## Usage
//!
//! ```no_run
//! use bridge::auth_bridge::{AuthBridge, AuthCommand, AuthResponse};
//!
//! async fn example(bridge: &AuthBridge) {
//!     let response = bridge
//!         .execute_command(AuthCommand::Init {
//!             config_path: "msal_config.json".to_string(),
//!         })
//!         .await;
//!     assert!(matches!(response, AuthResponse::Initialized));
//! }
//! ```

pub use self::bridge::AuthBridge;
pub use self::commands::AuthCommand;
pub use self::errors::{AuthError, AuthResult};
pub use self::responses::AuthResponse;

/// Main auth bridge implementation
pub mod bridge;
/// Command definitions for bridge operations
pub mod commands;
/// Error types and handling for bridge operations
pub mod errors;
/// Response types for bridge operations
pub mod responses;
