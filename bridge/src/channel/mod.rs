//! Method-channel marshaling for the auth bridge.
//!
//! Decodes named method calls with JSON arguments into typed
//! [`AuthCommand`](crate::auth_bridge::AuthCommand)s and renders
//! [`AuthResponse`](crate::auth_bridge::AuthResponse)s back into
//! single-shot replies.

pub mod call;
pub mod reply;

pub use call::{CallError, MethodCall};
pub use reply::{MethodReply, SIGN_OUT_SUCCESS};

use crate::auth_bridge::AuthBridge;

/// Dispatches one decoded method call against the bridge and renders the
/// reply.
///
/// Argument validation failures never reach the SDK: they are reported as
/// `ClientError` replies. Unknown methods map to a not-implemented reply.
pub async fn dispatch(bridge: &AuthBridge, call: MethodCall) -> MethodReply {
    match call.into_command() {
        Ok(command) => MethodReply::from(bridge.execute_command(command).await),
        Err(CallError::NotImplemented { method }) => {
            log::warn!("Unknown channel method: {method}");
            MethodReply::NotImplemented { method }
        }
        Err(err @ CallError::InvalidArguments { .. }) => MethodReply::Error {
            kind: "ClientError".to_string(),
            message: err.to_string(),
            code: None,
        },
    }
}
