//! Callbacks invoked by the subscription driver.
//!
//! [`StreamHandler`] is the seam between a transport and the code reacting to
//! a subscription. [`CredentialStreamHandler`] is the implementation for the
//! token response topic: it keeps the latest read-only credential and treats
//! any malformed message as fatal.

use credstream_models::{AccessType, PayloadError, SubscriptionEvent};
use tracing::{debug, error, info, warn};

use crate::cache::{CachedCredential, CredentialCache, CredentialReader};
use crate::error::StreamError;
use crate::shutdown::{ProcessExit, ShutdownHook, FATAL_EXIT_CODE};

/// What a handler did with a delivered message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageOutcome {
    /// The credential replaced the cached one.
    Accepted,
    /// The credential had the wrong access level and was dropped.
    Discarded(AccessType),
    /// The message could not be parsed; process exit was requested.
    Fatal(PayloadError),
}

/// Callbacks a subscription driver invokes, one at a time.
pub trait StreamHandler: Send + Sync {
    /// A message arrived on the subscription.
    fn on_message(&self, event: &SubscriptionEvent) -> MessageOutcome;

    /// The transport reported a delivery error.
    ///
    /// Return `true` to close the stream, `false` to keep it open.
    fn on_error(&self, error: &StreamError) -> bool;

    /// The subscription stream closed.
    fn on_closed(&self);
}

/// Keeps the most recent read-only InfluxDB credential.
///
/// Rejects tokens with any other access level and requests process exit
/// through its [`ShutdownHook`] on a malformed message.
///
/// # Examples
///
/// ```
/// use credstream_models::SubscriptionEvent;
/// use credstream_sdk::{CredentialStreamHandler, MessageOutcome, StreamHandler};
/// use serde_json::json;
///
/// let handler = CredentialStreamHandler::new();
/// let reader = handler.reader();
///
/// let event = SubscriptionEvent::new(
///     "greengrass.influxdb.token.response",
///     json!({"InfluxDBTokenAccessType": "RO", "token": "abc"}),
/// );
/// assert_eq!(handler.on_message(&event), MessageOutcome::Accepted);
/// assert!(reader.has_credential());
/// ```
#[derive(Debug)]
pub struct CredentialStreamHandler<S = ProcessExit> {
    cache: CredentialCache,
    shutdown: S,
}

impl Default for CredentialStreamHandler<ProcessExit> {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStreamHandler<ProcessExit> {
    /// A handler that exits the process on a malformed message.
    pub fn new() -> Self {
        Self::with_shutdown_hook(ProcessExit)
    }
}

impl<S: ShutdownHook> CredentialStreamHandler<S> {
    /// A handler reporting fatal errors to `shutdown`.
    pub fn with_shutdown_hook(shutdown: S) -> Self {
        Self {
            cache: CredentialCache::new(),
            shutdown,
        }
    }

    /// A read handle on the cached credential.
    pub fn reader(&self) -> CredentialReader {
        self.cache.reader()
    }

    /// Snapshot of the cached credential.
    pub fn current(&self) -> Option<CachedCredential> {
        self.cache.current()
    }
}

impl<S: ShutdownHook> StreamHandler for CredentialStreamHandler<S> {
    fn on_message(&self, event: &SubscriptionEvent) -> MessageOutcome {
        let payload = match event.credential_payload() {
            Ok(payload) => payload,
            Err(e) => {
                error!(
                    topic = %event.topic,
                    received_at = %event.received_at,
                    error = %e,
                    detail = ?e,
                    "failed to load credential message"
                );
                self.shutdown.request_exit(FATAL_EXIT_CODE);
                return MessageOutcome::Fatal(e);
            }
        };

        if !payload.access_type().is_read_only() {
            warn!(
                topic = %event.topic,
                access_type = %payload.access_type(),
                "discarding retrieved token with incorrect access level {}",
                payload.access_type()
            );
            return MessageOutcome::Discarded(payload.access_type().clone());
        }

        debug!(topic = %event.topic, fields = payload.extra().len(), "caching read-only credential");
        self.cache.store(CachedCredential {
            payload,
            topic: event.topic.clone(),
            received_at: event.received_at,
        });
        MessageOutcome::Accepted
    }

    fn on_error(&self, error: &StreamError) -> bool {
        error!(error = %error, detail = ?error, "received a stream error");
        false
    }

    fn on_closed(&self) {
        info!("subscription to token response topic closed");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
