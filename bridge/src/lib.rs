//! # Msauth Bridge Library
//!
//! Core library exposing a single-account Microsoft identity client to a
//! method-channel host. The bridge marshals five named operations (`init`,
//! `acquireTokenInteractively`, `acquireTokenSilently`, `loadAccount`,
//! `signOut`) and adapts the identity SDK's one-shot callbacks into
//! single-shot responses.
//!
//! ## Modules
//!
//! - [`auth`] - Identity SDK seam, domain types, and configuration staging
//! - [`auth_bridge`] - Command dispatch and the bridge state machine
//! - [`channel`] - Method-call decoding and reply rendering
//! - [`testing`] - Simulated identity SDK for tests and the dev host

pub mod auth;
pub mod auth_bridge;
pub mod channel;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
