//! credstream agent — keeps the latest read-only InfluxDB credential in memory.

use anyhow::Context;
use clap::Parser;
use credstream_models::AccessType;
use credstream_sdk::{CredentialClient, CredentialStreamHandler, StreamEnd};
use tracing::{info, warn};

mod config;

/// Subscribe to the InfluxDB token response topic and cache read-only tokens.
#[derive(Parser, Debug)]
#[command(name = "credstream-agent", about = "InfluxDB credential stream agent")]
struct Args {
    /// Subject namespace (overrides CREDSTREAM_NAMESPACE).
    #[arg(long)]
    namespace: Option<String>,

    /// Do not publish a token request on startup; wait for the provider.
    #[arg(long)]
    no_request: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (controlled via RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut cfg = config::AgentConfig::from_env();
    if let Some(namespace) = args.namespace {
        cfg.namespace = namespace;
    }

    let mut client = CredentialClient::connect(&cfg.nats_url, cfg.credentials, &cfg.namespace)
        .await
        .with_context(|| format!("connecting to {}", cfg.nats_url))?;

    let handler = CredentialStreamHandler::new();
    let mut reader = handler.reader();
    tokio::spawn(async move {
        while let Ok(Some(credential)) = reader.changed().await {
            let server = credential.payload.server_url();
            info!(
                topic = %credential.topic,
                received_at = %credential.received_at,
                server = server.as_deref().unwrap_or("unknown"),
                "read-only InfluxDB credential updated"
            );
        }
    });

    if !args.no_request {
        client
            .request_token(AccessType::ReadOnly)
            .await
            .context("requesting read-only token")?;
    }

    match client.run_stream(&handler).await? {
        StreamEnd::Closed | StreamEnd::ClosedByHandler => {
            info!("credential stream ended");
            Ok(())
        }
        StreamEnd::Fatal(e) => {
            warn!(error = %e, "credential stream stopped on a malformed message");
            Err(e.into())
        }
    }
}
