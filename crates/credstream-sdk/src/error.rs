//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK. [`StreamError`] describes delivery problems the
//! transport reports while a subscription is open; those are handed to the
//! stream handler rather than returned.

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing configuration (e.g. bad URL, bad NKey seed).
    #[error("configuration error: {0}")]
    Config(String),

    /// NATS transport error.
    #[error("NATS error: {0}")]
    Nats(String),

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The handler owning the credential cache was dropped.
    #[error("credential stream handler was dropped")]
    HandlerDropped,
}

impl From<async_nats::ConnectError> for SdkError {
    fn from(e: async_nats::ConnectError) -> Self {
        SdkError::Nats(e.to_string())
    }
}

impl From<async_nats::PublishError> for SdkError {
    fn from(e: async_nats::PublishError) -> Self {
        SdkError::Nats(e.to_string())
    }
}

impl From<async_nats::SubscribeError> for SdkError {
    fn from(e: async_nats::SubscribeError) -> Self {
        SdkError::Nats(e.to_string())
    }
}

/// A delivery error reported by the transport on an open subscription.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// The connection to the server was lost.
    #[error("disconnected from server")]
    Disconnected,

    /// The server reported an error.
    #[error("server error: {0}")]
    Server(String),

    /// The client library reported an error.
    #[error("client error: {0}")]
    Client(String),

    /// Messages were dropped because the subscriber fell behind.
    #[error("slow consumer: {0}")]
    SlowConsumer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_error_display() {
        assert_eq!(StreamError::Disconnected.to_string(), "disconnected from server");
        assert_eq!(
            StreamError::Server("authorization violation".into()).to_string(),
            "server error: authorization violation"
        );
    }

    #[test]
    fn sdk_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SdkError::from(json_err);
        assert!(err.to_string().starts_with("serialization error"));
    }
}
