//! NATS client for the credential exchange.
//!
//! [`CredentialClient`] connects to the local NATS bus, publishes token
//! requests, and drives a [`StreamHandler`] from the token response
//! subscription.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use credstream_models::AccessType;
//! use credstream_sdk::{CredentialClient, CredentialStreamHandler};
//!
//! # async fn run() -> Result<(), credstream_sdk::SdkError> {
//! let mut client = CredentialClient::connect("nats://localhost:4222", None, "greengrass").await?;
//! let handler = CredentialStreamHandler::new();
//! let reader = handler.reader();
//!
//! client.request_token(AccessType::ReadOnly).await?;
//! tokio::spawn(async move {
//!     let _ = client.run_stream(&handler).await;
//! });
//!
//! let credential = reader.clone().wait_for_credential().await?;
//! println!("token received on {}", credential.topic);
//! # Ok(())
//! # }
//! ```

use async_nats::{ConnectOptions, Event};
use credstream_models::{AccessType, PayloadError, SubscriptionEvent, TokenRequest};
use futures::StreamExt;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};

use crate::credentials::NatsCredentials;
use crate::error::{SdkError, StreamError};
use crate::handler::{MessageOutcome, StreamHandler};
use crate::subjects::TokenTopics;

/// Why [`CredentialClient::run_stream`] returned.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEnd {
    /// The transport ended the subscription.
    Closed,
    /// The handler asked to close the stream from `on_error`.
    ClosedByHandler,
    /// The handler hit a malformed message.
    Fatal(PayloadError),
}

/// Transport errors queued between polls of the subscription; extras are dropped.
const EVENT_QUEUE_CAPACITY: usize = 64;

/// A connection to the local NATS bus.
pub struct CredentialClient {
    nats_client: async_nats::Client,
    namespace: String,
    events: mpsc::Receiver<StreamError>,
}

impl CredentialClient {
    // ------------------------------------------------------------------
    // Connection
    // ------------------------------------------------------------------

    /// Connect to NATS, optionally authenticating with JWT + NKey challenge.
    ///
    /// Transport events reported after connecting are queued and handed to
    /// the handler by [`run_stream`](Self::run_stream).
    pub async fn connect(
        nats_url: &str,
        creds: Option<NatsCredentials>,
        namespace: &str,
    ) -> Result<Self, SdkError> {
        let options = match creds {
            Some(creds) => {
                // Sanity-check the seed
                let _ = creds.key_pair()?;

                let seed_for_sign = creds.seed.clone();
                ConnectOptions::with_jwt(creds.jwt, move |nonce| {
                    let seed = seed_for_sign.clone();
                    async move {
                        let kp = nkeys::KeyPair::from_seed(&seed)
                            .map_err(async_nats::AuthError::new)?;
                        kp.sign(&nonce).map_err(async_nats::AuthError::new)
                    }
                })
            }
            None => ConnectOptions::new(),
        };

        let (events_tx, events) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let options = options.event_callback(move |event| {
            let events_tx = events_tx.clone();
            async move { forward_event(&events_tx, event) }
        });

        let nats_client = async_nats::connect_with_options(nats_url, options).await?;
        info!(url = %nats_url, %namespace, "connected to NATS");

        Ok(Self {
            nats_client,
            namespace: namespace.to_string(),
            events,
        })
    }

    // ------------------------------------------------------------------
    // Publishing
    // ------------------------------------------------------------------

    /// Ask the token-provider for a token with the given access level.
    pub async fn request_token(&self, access_level: AccessType) -> Result<(), SdkError> {
        let subject = TokenTopics::request(&self.namespace);
        let request = TokenRequest::retrieve(access_level);
        let bytes = serde_json::to_vec(&request)?;
        self.nats_client
            .publish(subject.clone(), bytes.into())
            .await?;
        self.nats_client
            .flush()
            .await
            .map_err(|e| SdkError::Nats(e.to_string()))?;
        info!(%subject, access_level = %request.access_level, "token requested");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Subscribing
    // ------------------------------------------------------------------

    /// Subscribe to the token response subject and feed `handler` until the
    /// stream ends.
    ///
    /// Messages go to [`StreamHandler::on_message`], transport events to
    /// [`StreamHandler::on_error`], and [`StreamHandler::on_closed`] runs
    /// once the subscription is gone, whatever the reason.
    pub async fn run_stream<H: StreamHandler>(
        &mut self,
        handler: &H,
    ) -> Result<StreamEnd, SdkError> {
        let subject = TokenTopics::response(&self.namespace);
        let mut subscription = self.nats_client.subscribe(subject.clone()).await?;
        info!(%subject, "subscribed to token response topic");

        let end = loop {
            tokio::select! {
                maybe_message = subscription.next() => {
                    let Some(message) = maybe_message else {
                        break StreamEnd::Closed;
                    };
                    let event = SubscriptionEvent::from_bytes(message.subject.to_string(), &message.payload);
                    debug!(topic = %event.topic, bytes = message.payload.len(), "received message");
                    if let MessageOutcome::Fatal(e) = handler.on_message(&event) {
                        break StreamEnd::Fatal(e);
                    }
                }
                Some(error) = self.events.recv() => {
                    if handler.on_error(&error) {
                        break StreamEnd::ClosedByHandler;
                    }
                }
            }
        };

        if end != StreamEnd::Closed {
            if let Err(e) = subscription.unsubscribe().await {
                warn!(%subject, error = %e, "failed to unsubscribe");
            }
        }
        handler.on_closed();
        Ok(end)
    }
}

/// Queue the delivery error for `event`, if any, without waiting for room.
fn forward_event(events_tx: &mpsc::Sender<StreamError>, event: Event) {
    let Some(error) = stream_error_from_event(event) else {
        return;
    };
    match events_tx.try_send(error) {
        Ok(()) => {}
        Err(TrySendError::Full(error)) => {
            warn!(error = %error, "stream error queue full, dropping event");
        }
        // The receiver only goes away with the client.
        Err(TrySendError::Closed(_)) => {}
    }
}

/// Map a transport event to a delivery error, logging the benign ones.
fn stream_error_from_event(event: Event) -> Option<StreamError> {
    match event {
        Event::Disconnected => Some(StreamError::Disconnected),
        Event::ServerError(e) => Some(StreamError::Server(e.to_string())),
        Event::ClientError(e) => Some(StreamError::Client(e.to_string())),
        slow @ Event::SlowConsumer(_) => Some(StreamError::SlowConsumer(slow.to_string())),
        other => {
            info!(event = %other, "NATS connection event");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disconnect_is_a_stream_error() {
        assert_eq!(
            stream_error_from_event(Event::Disconnected),
            Some(StreamError::Disconnected)
        );
    }

    #[test]
    fn connect_and_lifecycle_events_are_not_errors() {
        assert_eq!(stream_error_from_event(Event::Connected), None);
        assert_eq!(stream_error_from_event(Event::LameDuckMode), None);
    }

    #[test]
    fn full_event_queue_drops_instead_of_growing() {
        let (tx, mut rx) = mpsc::channel(2);
        for _ in 0..5 {
            forward_event(&tx, Event::Disconnected);
        }
        forward_event(&tx, Event::Connected);

        assert_eq!(rx.try_recv().unwrap(), StreamError::Disconnected);
        assert_eq!(rx.try_recv().unwrap(), StreamError::Disconnected);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn forwarding_after_client_drop_is_silent() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        forward_event(&tx, Event::Disconnected);
    }

    #[test]
    fn slow_consumer_keeps_description() {
        let err = stream_error_from_event(Event::SlowConsumer(7)).unwrap();
        assert!(matches!(err, StreamError::SlowConsumer(ref msg) if !msg.is_empty()));
    }
}
