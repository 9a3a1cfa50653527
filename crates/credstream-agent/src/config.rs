//! Agent configuration.
//!
//! Built from environment variables at startup; command-line flags override
//! individual values in `main`.

use credstream_sdk::{NatsCredentials, DEFAULT_NAMESPACE};

/// Everything the agent needs to reach the credential stream.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// NATS server URL.
    pub nats_url: String,
    /// Subject namespace for the token request/response topics.
    pub namespace: String,
    /// JWT + seed for authenticated servers, `None` for anonymous access.
    pub credentials: Option<NatsCredentials>,
}

impl AgentConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable               | Default                 | Description                          |
    /// |------------------------|-------------------------|--------------------------------------|
    /// | `NATS_URL`             | `nats://localhost:4222` | NATS server                          |
    /// | `CREDSTREAM_NAMESPACE` | `greengrass`            | Subject namespace                    |
    /// | `NATS_JWT`             | unset                   | User JWT (requires `NATS_SEED`)      |
    /// | `NATS_SEED`            | unset                   | NKey seed (requires `NATS_JWT`)      |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let nats_url = lookup("NATS_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "nats://localhost:4222".to_string());
        let namespace = lookup("CREDSTREAM_NAMESPACE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        // Both halves are needed; one alone means anonymous.
        let credentials = match (lookup("NATS_JWT"), lookup("NATS_SEED")) {
            (Some(jwt), Some(seed)) => Some(NatsCredentials { jwt, seed }),
            _ => None,
        };

        Self {
            nats_url,
            namespace,
            credentials,
        }
    }
}
