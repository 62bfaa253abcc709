use anyhow::Context;
use bridge::auth::config::{ConfigCache, DirBundle};
use bridge::auth_bridge::AuthBridge;
use bridge::channel::{self, MethodCall, MethodReply};
use bridge::testing::{NoopForeground, StubClient, StubFactory};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Development host for the msauth bridge.
///
/// Reads one JSON method call per stdin line and answers with one JSON
/// reply per stdout line, backed by the simulated identity SDK.
#[derive(Debug, Parser)]
#[command(name = "msauth-host")]
struct Args {
    /// Directory served as the configuration resource bundle
    #[arg(long, default_value = "assets")]
    bundle_dir: PathBuf,

    /// Override for the configuration cache directory
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cache = match args.cache_dir {
        Some(dir) => ConfigCache::with_dir(dir),
        None => ConfigCache::new().context("no usable cache directory")?,
    };
    let client = StubClient::new();
    let bridge = AuthBridge::new(
        StubFactory::new(client),
        Arc::new(DirBundle::new(args.bundle_dir)),
        Arc::new(NoopForeground),
        cache,
    );

    log::info!("msauth host listening on stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await.context("read method call")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match MethodCall::from_json(line) {
            Ok(call) => channel::dispatch(&bridge, call).await,
            Err(err) => MethodReply::Error {
                kind: "ClientError".to_string(),
                message: format!("malformed method call: {err}"),
                code: None,
            },
        };

        let mut encoded = reply.to_json().context("encode reply")?;
        encoded.push('\n');
        stdout.write_all(encoded.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}
