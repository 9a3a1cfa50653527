//! # credstream SDK
//!
//! Receives InfluxDB credentials over the local NATS bus and keeps the most
//! recent read-only one in memory for the rest of the agent.
//!
//! The SDK provides:
//!
//! * [`CredentialStreamHandler`] — validates each credential message and
//!   caches read-only tokens; malformed messages are fatal.
//! * [`CredentialReader`] — cloneable read handle on the cached credential.
//! * [`CredentialClient`] — NATS connection that publishes token requests
//!   and drives a [`StreamHandler`] from the response subscription.
//! * [`TokenTopics`] — canonical subject names for the exchange.
//! * [`ShutdownHook`] — how fatal errors terminate the hosting process.
//! * [`SdkError`] / [`StreamError`] — error types.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use credstream_models::AccessType;
//! use credstream_sdk::{CredentialClient, CredentialStreamHandler};
//!
//! # async fn run() -> Result<(), credstream_sdk::SdkError> {
//! let mut client = CredentialClient::connect("nats://localhost:4222", None, "greengrass").await?;
//! let handler = CredentialStreamHandler::new();
//!
//! client.request_token(AccessType::ReadOnly).await?;
//! client.run_stream(&handler).await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod credentials;
pub mod error;
pub mod handler;
pub mod shutdown;
pub mod subjects;

pub use cache::{CachedCredential, CredentialCache, CredentialReader};
pub use client::{CredentialClient, StreamEnd};
pub use credentials::NatsCredentials;
pub use error::{SdkError, StreamError};
pub use handler::{CredentialStreamHandler, MessageOutcome, StreamHandler};
pub use shutdown::{ProcessExit, ShutdownHook, FATAL_EXIT_CODE};
pub use subjects::{TokenTopics, DEFAULT_NAMESPACE};

// Re-export model types for ergonomic usage.
pub use credstream_models::{AccessType, CredentialPayload, SubscriptionEvent, TokenRequest};
