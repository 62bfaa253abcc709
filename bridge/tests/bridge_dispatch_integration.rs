use bridge::auth::client::SdkError;
use bridge::auth::config::ConfigCache;
use bridge::auth_bridge::{AuthBridge, AuthCommand, AuthError, AuthResponse};
use bridge::auth::types::Account;
use bridge::testing::{
    HeadlessForeground, MemoryBundle, NoopForeground, Scripted, StubClient, StubFactory,
    VALID_CONFIG,
};
use std::sync::Arc;
use tempfile::TempDir;

// Helper module for bridge dispatch testing
mod harness {
    use super::*;
    use bridge::auth::client::ForegroundProvider;

    pub const CONFIG_PATH: &str = "msal_config.json";
    pub const AUTHORITY: &str = "https://login.microsoftonline.com/common";

    pub struct TestBridge {
        pub bridge: AuthBridge,
        pub client: Arc<StubClient>,
        pub factory: Arc<StubFactory>,
        pub bundle: Arc<MemoryBundle>,
        // Keeps the staging directory alive for the bridge's lifetime
        _cache_dir: TempDir,
    }

    pub fn test_bridge() -> TestBridge {
        bridge_with_foreground(Arc::new(NoopForeground))
    }

    pub fn headless_bridge() -> TestBridge {
        bridge_with_foreground(Arc::new(HeadlessForeground))
    }

    fn bridge_with_foreground(foreground: Arc<dyn ForegroundProvider>) -> TestBridge {
        let client = StubClient::new();
        let factory = StubFactory::new(client.clone());
        let bundle = MemoryBundle::new();
        bundle.insert(CONFIG_PATH, VALID_CONFIG);

        let cache_dir = tempfile::tempdir().expect("temp cache dir");
        let bridge = AuthBridge::new(
            factory.clone(),
            bundle.clone(),
            foreground,
            ConfigCache::with_dir(cache_dir.path().join("staged")),
        );

        TestBridge {
            bridge,
            client,
            factory,
            bundle,
            _cache_dir: cache_dir,
        }
    }

    pub async fn init(bridge: &AuthBridge) {
        let response = bridge
            .execute_command(AuthCommand::Init {
                config_path: CONFIG_PATH.to_string(),
            })
            .await;
        assert_eq!(response, AuthResponse::Initialized);
    }

    pub fn interactive_command() -> AuthCommand {
        AuthCommand::AcquireTokenInteractively {
            scopes: vec!["User.Read".to_string()],
            authority: AUTHORITY.to_string(),
        }
    }

    pub fn silent_command() -> AuthCommand {
        AuthCommand::AcquireTokenSilently {
            scopes: vec!["User.Read".to_string()],
            authority: AUTHORITY.to_string(),
        }
    }
}

use harness::*;

mod uninitialized {
    use super::*;

    #[tokio::test]
    async fn operations_fail_before_init_without_touching_the_sdk() {
        let t = test_bridge();
        let commands = [
            interactive_command(),
            silent_command(),
            AuthCommand::LoadAccount,
            AuthCommand::SignOut,
        ];

        for command in commands {
            let response = t.bridge.execute_command(command).await;
            assert_eq!(
                response,
                AuthResponse::Error {
                    error: AuthError::Uninitialized
                }
            );
        }

        assert!(t.client.calls().is_empty());
        assert_eq!(t.factory.created_count(), 0);
    }
}

mod initialization {
    use super::*;

    #[tokio::test]
    async fn init_reports_completion() {
        let t = test_bridge();
        init(&t.bridge).await;
        assert_eq!(t.factory.created_count(), 1);
    }

    #[tokio::test]
    async fn init_with_missing_resource_yields_config_load_error() {
        let t = test_bridge();
        let response = t
            .bridge
            .execute_command(AuthCommand::Init {
                config_path: "absent.json".to_string(),
            })
            .await;

        match response {
            AuthResponse::Error { error } => {
                assert_eq!(error.kind(), "ConfigLoadError");
                assert!(error.to_string().contains("absent.json"));
            }
            other => panic!("expected config load error, got {other:?}"),
        }
        assert_eq!(t.factory.created_count(), 0);
    }

    #[tokio::test]
    async fn init_rejects_multi_account_configuration() {
        let t = test_bridge();
        t.bundle
            .insert("multi.json", VALID_CONFIG.replace("SINGLE", "MULTIPLE"));

        let response = t
            .bridge
            .execute_command(AuthCommand::Init {
                config_path: "multi.json".to_string(),
            })
            .await;

        match response {
            AuthResponse::Error { error } => assert_eq!(error.kind(), "ConfigLoadError"),
            other => panic!("expected config load error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn init_surfaces_client_construction_failure() {
        let t = test_bridge();
        t.factory.script_failure(SdkError::Client {
            code: "invalid_config".to_string(),
            message: "redirect_uri not registered".to_string(),
        });

        let response = t
            .bridge
            .execute_command(AuthCommand::Init {
                config_path: CONFIG_PATH.to_string(),
            })
            .await;

        match response {
            AuthResponse::Error { error } => {
                assert_eq!(error.kind(), "ClientError");
                assert_eq!(error.code(), Some("invalid_config"));
            }
            other => panic!("expected client error, got {other:?}"),
        }

        // Construction failed, so the bridge must still be uninitialized
        let response = t.bridge.execute_command(silent_command()).await;
        assert_eq!(
            response,
            AuthResponse::Error {
                error: AuthError::Uninitialized
            }
        );
    }

    #[tokio::test]
    async fn repeated_init_replaces_the_client_handle() {
        let t = test_bridge();
        init(&t.bridge).await;
        t.bridge.execute_command(interactive_command()).await;
        let first_calls = t.client.calls().len();

        let replacement = StubClient::new();
        t.factory.set_client(replacement.clone());
        init(&t.bridge).await;

        let response = t.bridge.execute_command(silent_command()).await;
        assert!(matches!(response, AuthResponse::TokenAcquired { .. }));

        // Exactly one handle is active: traffic lands on the replacement
        assert_eq!(replacement.calls(), vec!["acquireTokenSilently"]);
        assert_eq!(t.client.calls().len(), first_calls);
        assert_eq!(t.factory.created_count(), 2);
    }
}

mod token_acquisition {
    use super::*;

    #[tokio::test]
    async fn interactive_sign_in_returns_a_token() {
        let t = test_bridge();
        init(&t.bridge).await;

        let response = t.bridge.execute_command(interactive_command()).await;
        match response {
            AuthResponse::TokenAcquired { access_token } => assert!(!access_token.is_empty()),
            other => panic!("expected token, got {other:?}"),
        }
        assert_eq!(t.client.calls(), vec!["acquireTokenInteractively"]);
    }

    #[tokio::test]
    async fn silent_acquisition_returns_a_token() {
        let t = test_bridge();
        init(&t.bridge).await;

        let response = t.bridge.execute_command(silent_command()).await;
        assert!(matches!(response, AuthResponse::TokenAcquired { .. }));
    }

    #[tokio::test]
    async fn expired_session_requires_interactive_retry() {
        let t = test_bridge();
        init(&t.bridge).await;
        t.client.script_silent(Scripted::Fail(SdkError::UiRequired {
            message: "the session has expired".to_string(),
        }));

        let response = t.bridge.execute_command(silent_command()).await;
        match response {
            AuthResponse::Error { error } => assert_eq!(error.kind(), "UiRequiredError"),
            other => panic!("expected ui-required error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn user_cancel_yields_no_token() {
        let t = test_bridge();
        init(&t.bridge).await;
        t.client.script_interactive(Scripted::Cancel);

        let response = t.bridge.execute_command(interactive_command()).await;
        assert_eq!(
            response,
            AuthResponse::Error {
                error: AuthError::Cancelled
            }
        );
    }

    #[tokio::test]
    async fn provider_communication_failure_yields_service_error() {
        let t = test_bridge();
        init(&t.bridge).await;
        t.client.script_interactive(Scripted::Fail(SdkError::Service {
            code: "AADSTS90002".to_string(),
            message: "tenant not found".to_string(),
        }));

        let response = t.bridge.execute_command(interactive_command()).await;
        match response {
            AuthResponse::Error { error } => {
                assert_eq!(error.kind(), "ServiceError");
                assert_eq!(error.code(), Some("AADSTS90002"));
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn headless_host_cannot_sign_in_interactively() {
        let t = headless_bridge();
        init(&t.bridge).await;

        let response = t.bridge.execute_command(interactive_command()).await;
        match response {
            AuthResponse::Error { error } => assert_eq!(error.kind(), "ClientError"),
            other => panic!("expected client error, got {other:?}"),
        }
        // The SDK was never reached
        assert!(t.client.calls().is_empty());
    }
}

mod account {
    use super::*;

    #[tokio::test]
    async fn load_account_without_session_returns_null() {
        let t = test_bridge();
        init(&t.bridge).await;

        let response = t.bridge.execute_command(AuthCommand::LoadAccount).await;
        assert_eq!(response, AuthResponse::AccountLoaded { username: None });
    }

    #[tokio::test]
    async fn load_account_after_sign_in_returns_username() {
        let t = test_bridge();
        init(&t.bridge).await;
        t.bridge.execute_command(interactive_command()).await;

        let response = t.bridge.execute_command(AuthCommand::LoadAccount).await;
        assert_eq!(
            response,
            AuthResponse::AccountLoaded {
                username: Some("user@contoso.com".to_string())
            }
        );
    }

    #[tokio::test]
    async fn account_change_to_none_returns_null() {
        let t = test_bridge();
        init(&t.bridge).await;
        t.client.bind_account("user@contoso.com");
        t.client.script_account_change(None);

        let response = t.bridge.execute_command(AuthCommand::LoadAccount).await;
        assert_eq!(response, AuthResponse::AccountLoaded { username: None });
    }

    #[tokio::test]
    async fn account_change_to_new_account_returns_current_username() {
        let t = test_bridge();
        init(&t.bridge).await;
        t.client.bind_account("user@contoso.com");
        t.client
            .script_account_change(Some(Account::new("other@contoso.com")));

        let response = t.bridge.execute_command(AuthCommand::LoadAccount).await;
        assert_eq!(
            response,
            AuthResponse::AccountLoaded {
                username: Some("other@contoso.com".to_string())
            }
        );
    }

    #[tokio::test]
    async fn load_account_failure_surfaces_the_sdk_message() {
        let t = test_bridge();
        init(&t.bridge).await;
        t.client.script_account_failure(SdkError::Other {
            code: None,
            message: "broker unavailable".to_string(),
        });

        let response = t.bridge.execute_command(AuthCommand::LoadAccount).await;
        match response {
            AuthResponse::Error { error } => {
                assert!(error.to_string().contains("broker unavailable"));
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sign_out_clears_the_session() {
        let t = test_bridge();
        init(&t.bridge).await;
        t.bridge.execute_command(interactive_command()).await;

        let response = t.bridge.execute_command(AuthCommand::SignOut).await;
        assert_eq!(response, AuthResponse::SignedOut);

        let response = t.bridge.execute_command(AuthCommand::LoadAccount).await;
        assert_eq!(response, AuthResponse::AccountLoaded { username: None });
    }

    #[tokio::test]
    async fn sign_out_failure_carries_the_sdk_code() {
        let t = test_bridge();
        init(&t.bridge).await;
        t.client.script_sign_out_failure(SdkError::Other {
            code: Some("no_current_account".to_string()),
            message: "no account is signed in".to_string(),
        });

        let response = t.bridge.execute_command(AuthCommand::SignOut).await;
        match response {
            AuthResponse::Error { error } => {
                assert_eq!(error.code(), Some("no_current_account"));
            }
            other => panic!("expected error, got {other:?}"),
        }
    }
}
