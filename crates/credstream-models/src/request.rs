//! Token requests published to the token-provider.

use serde::{Deserialize, Serialize};

use crate::access::AccessType;

/// Action understood by the token-provider.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAction {
    /// Ask for a token to be published on the response topic.
    RetrieveToken,
}

/// Request for an InfluxDB token of a given access level.
///
/// # Examples
///
/// ```
/// use credstream_models::TokenRequest;
///
/// let json = serde_json::to_string(&TokenRequest::read_only()).unwrap();
/// assert_eq!(json, r#"{"action":"RetrieveToken","accessLevel":"RO"}"#);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    /// What the provider should do.
    pub action: TokenAction,
    /// Requested access level.
    pub access_level: AccessType,
}

impl TokenRequest {
    /// Request a token with the given access level.
    pub fn retrieve(access_level: AccessType) -> Self {
        Self {
            action: TokenAction::RetrieveToken,
            access_level,
        }
    }

    /// Request a read-only token.
    pub fn read_only() -> Self {
        Self::retrieve(AccessType::ReadOnly)
    }
}
