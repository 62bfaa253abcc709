use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Account mode declared in the client configuration.
///
/// This bridge only supports `SINGLE`; a `MULTIPLE` configuration is
/// rejected during `init`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountMode {
    Single,
    Multiple,
}

/// Identity-application configuration consumed by the SDK.
///
/// Parsed from the bundled JSON resource before staging so that malformed
/// configurations fail `init` instead of surfacing later as opaque SDK
/// construction errors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Application (client) ID registered with the identity provider
    pub client_id: String,
    /// Redirect URI registered for the application
    pub redirect_uri: String,
    /// Default authority endpoint, when pinned by the configuration
    #[serde(default)]
    pub authority: Option<String>,
    /// Account mode; must be [`AccountMode::Single`]
    pub account_mode: AccountMode,
}

impl ClientConfig {
    /// Parses and validates configuration bytes read from the resource
    /// bundle.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.trim().is_empty() {
            return Err(ConfigError::MissingField("client_id"));
        }
        if self.redirect_uri.trim().is_empty() {
            return Err(ConfigError::MissingField("redirect_uri"));
        }
        if self.account_mode != AccountMode::Single {
            return Err(ConfigError::UnsupportedAccountMode);
        }
        Ok(())
    }
}

/// Errors raised while loading, validating, or staging configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("configuration field `{0}` is missing or empty")]
    MissingField(&'static str),

    #[error("this bridge requires \"account_mode\": \"SINGLE\"")]
    UnsupportedAccountMode,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Read access to the host's bundled resources.
///
/// The bridge never assumes resources live on a plain filesystem; hosts
/// that embed their assets provide their own implementation.
#[async_trait]
pub trait ResourceBundle: Send + Sync {
    async fn read(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// Resource bundle backed by a directory on disk.
pub struct DirBundle {
    root: PathBuf,
}

impl DirBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResourceBundle for DirBundle {
    async fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(self.root.join(path)).await
    }
}

/// Stages configuration bytes into a process-local cache file.
///
/// The SDK consumes a filesystem path, so every `init` writes the bundled
/// bytes into the cache directory. Staging goes through a temporary file
/// followed by a rename so the target is either the previous or the new
/// configuration, never a partial write, and the temporary file is removed
/// on every failure path.
pub struct ConfigCache {
    dir: PathBuf,
}

impl ConfigCache {
    /// File name of the staged configuration inside the cache directory.
    pub const FILE_NAME: &'static str = "config.json";

    /// Cache rooted at the platform cache directory.
    pub fn new() -> Result<Self, ConfigError> {
        let base = dirs::cache_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no cache directory available")
        })?;
        Ok(Self {
            dir: base.join("msauth-bridge"),
        })
    }

    /// Cache rooted at an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the staged configuration is written to.
    pub fn path(&self) -> PathBuf {
        self.dir.join(Self::FILE_NAME)
    }

    /// Writes `bytes` to the cache file, overwriting any previous staging.
    pub async fn stage(&self, bytes: &[u8]) -> Result<PathBuf, ConfigError> {
        fs::create_dir_all(&self.dir).await?;

        let target = self.path();
        let staging = self.dir.join(format!("{}.tmp", Self::FILE_NAME));
        if let Err(err) = fs::write(&staging, bytes).await {
            let _ = fs::remove_file(&staging).await;
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&staging, &target).await {
            let _ = fs::remove_file(&staging).await;
            return Err(err.into());
        }
        Ok(target)
    }
}
