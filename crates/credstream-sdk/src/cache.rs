//! In-memory cell holding the latest accepted credential.
//!
//! The stream handler is the only writer; any number of [`CredentialReader`]s
//! take snapshots or wait for updates. Writes always replace the whole value.

use chrono::{DateTime, Utc};
use credstream_models::CredentialPayload;
use tokio::sync::watch;

use crate::error::SdkError;

/// A credential accepted by the stream handler.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedCredential {
    /// The payload exactly as received.
    pub payload: CredentialPayload,
    /// Topic the payload arrived on.
    pub topic: String,
    /// When the payload was received.
    pub received_at: DateTime<Utc>,
}

/// Write side of the credential cell, owned by the stream handler.
#[derive(Debug)]
pub struct CredentialCache {
    tx: watch::Sender<Option<CachedCredential>>,
}

impl Default for CredentialCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialCache {
    /// An empty cache.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replace the cached credential.
    ///
    /// Callers must only store read-only credentials.
    pub(crate) fn store(&self, credential: CachedCredential) {
        debug_assert!(credential.payload.access_type().is_read_only());
        self.tx.send_replace(Some(credential));
    }

    /// Snapshot of the current credential.
    pub fn current(&self) -> Option<CachedCredential> {
        self.tx.borrow().clone()
    }

    /// A new read handle on this cache.
    pub fn reader(&self) -> CredentialReader {
        CredentialReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Cloneable read handle for components consuming the credential.
#[derive(Debug, Clone)]
pub struct CredentialReader {
    rx: watch::Receiver<Option<CachedCredential>>,
}

impl CredentialReader {
    /// Snapshot of the current credential.
    pub fn current(&self) -> Option<CachedCredential> {
        self.rx.borrow().clone()
    }

    /// Whether a credential has been accepted yet.
    pub fn has_credential(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait until a credential is available and return it.
    ///
    /// Returns immediately if one is already cached.
    pub async fn wait_for_credential(&mut self) -> Result<CachedCredential, SdkError> {
        let current = self
            .rx
            .wait_for(|c| c.is_some())
            .await
            .map_err(|_| SdkError::HandlerDropped)?;
        current.clone().ok_or(SdkError::HandlerDropped)
    }

    /// Wait for the next replacement and return the new credential.
    pub async fn changed(&mut self) -> Result<Option<CachedCredential>, SdkError> {
        self.rx
            .changed()
            .await
            .map_err(|_| SdkError::HandlerDropped)?;
        Ok(self.rx.borrow_and_update().clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use credstream_models::AccessType;
    use std::time::Duration;

    fn credential(token: &str) -> CachedCredential {
        CachedCredential {
            payload: CredentialPayload::new(AccessType::ReadOnly).with_field("token", token),
            topic: "greengrass.influxdb.token.response".into(),
            received_at: Utc::now(),
        }
    }

    #[test]
    fn starts_empty() {
        let cache = CredentialCache::new();
        assert!(cache.current().is_none());
        assert!(!cache.reader().has_credential());
    }

    #[test]
    fn store_overwrites() {
        let cache = CredentialCache::new();
        let reader = cache.reader();
        cache.store(credential("a"));
        let second = credential("b");
        cache.store(second.clone());
        assert_eq!(cache.current(), Some(second.clone()));
        assert_eq!(reader.current(), Some(second));
    }

    #[test]
    fn reader_created_after_store_sees_value() {
        let cache = CredentialCache::new();
        cache.store(credential("a"));
        assert!(cache.reader().has_credential());
    }

    #[tokio::test]
    async fn wait_for_credential_resolves_on_store() {
        let cache = CredentialCache::new();
        let mut reader = cache.reader();

        let waiter = tokio::spawn(async move { reader.wait_for_credential().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        cache.store(credential("late"));

        let got = waiter.await.unwrap().unwrap();
        assert_eq!(got.payload.field("token"), Some(&serde_json::json!("late")));
    }

    #[tokio::test]
    async fn wait_for_credential_returns_cached_immediately() {
        let cache = CredentialCache::new();
        cache.store(credential("early"));
        let mut reader = cache.reader();
        let got = reader.wait_for_credential().await.unwrap();
        assert_eq!(got.payload.field("token"), Some(&serde_json::json!("early")));
    }

    #[tokio::test]
    async fn changed_errors_once_cache_is_dropped() {
        let cache = CredentialCache::new();
        let mut reader = cache.reader();
        drop(cache);
        assert!(matches!(reader.changed().await, Err(SdkError::HandlerDropped)));
    }

    #[tokio::test]
    async fn changed_yields_replacement() {
        let cache = CredentialCache::new();
        let mut reader = cache.reader();
        cache.store(credential("next"));
        let got = reader.changed().await.unwrap().unwrap();
        assert_eq!(got.payload.field("token"), Some(&serde_json::json!("next")));
    }
}
