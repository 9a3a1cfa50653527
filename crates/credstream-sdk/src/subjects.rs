//! Canonical NATS subject definitions for the credential exchange.
//!
//! All subjects used to request and receive InfluxDB credentials **must** be
//! built through [`TokenTopics`], so the requesting component and the
//! token-provider agree on a single naming convention.
//!
//! # Subject layout
//!
//! ```text
//! {namespace}.influxdb.token.request    ← components PUBLISH token requests here
//! {namespace}.influxdb.token.response   ← components SUBSCRIBE here for credentials
//! ```

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "greengrass";

/// Central authority for the credential exchange subjects.
///
/// # Examples
///
/// ```
/// use credstream_sdk::TokenTopics;
///
/// assert_eq!(
///     TokenTopics::request("greengrass"),
///     "greengrass.influxdb.token.request",
/// );
/// assert_eq!(
///     TokenTopics::response("greengrass"),
///     "greengrass.influxdb.token.response",
/// );
/// ```
pub struct TokenTopics;

impl TokenTopics {
    /// Subject a component publishes a [`credstream_models::TokenRequest`] to.
    pub fn request(namespace: &str) -> String {
        format!("{namespace}.influxdb.token.request")
    }

    /// Subject the token-provider answers on with a credential payload.
    pub fn response(namespace: &str) -> String {
        format!("{namespace}.influxdb.token.response")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_namespace_subjects() {
        assert_eq!(
            TokenTopics::request(DEFAULT_NAMESPACE),
            "greengrass.influxdb.token.request",
        );
        assert_eq!(
            TokenTopics::response(DEFAULT_NAMESPACE),
            "greengrass.influxdb.token.response",
        );
    }

    #[test]
    fn subjects_vary_by_namespace() {
        assert_eq!(TokenTopics::response("site-7"), "site-7.influxdb.token.response");
    }
}
