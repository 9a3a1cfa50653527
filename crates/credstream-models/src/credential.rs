//! The credential record delivered on the token response topic.
//!
//! A [`CredentialPayload`] is a typed view over the string-keyed mapping the
//! token-provider publishes. Only the access level is interpreted; every other
//! field is kept verbatim so the record serialises back to exactly what was
//! received.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::access::AccessType;
use crate::error::PayloadError;

/// Field holding the token access level.
pub const ACCESS_TYPE_FIELD: &str = "InfluxDBTokenAccessType";

/// Well-known connection parameter names sent by the token-provider.
pub mod fields {
    /// The InfluxDB API token.
    pub const TOKEN: &str = "InfluxDBToken";
    /// InfluxDB organisation.
    pub const ORG: &str = "InfluxDBOrg";
    /// InfluxDB bucket.
    pub const BUCKET: &str = "InfluxDBBucket";
    /// Port the server listens on.
    pub const PORT: &str = "InfluxDBPort";
    /// Host interface the server listens on.
    pub const INTERFACE: &str = "InfluxDBInterface";
    /// `http` or `https`.
    pub const SERVER_PROTOCOL: &str = "InfluxDBServerProtocol";
    /// Whether clients should skip TLS certificate verification.
    pub const SKIP_TLS_VERIFY: &str = "InfluxDBSkipTLSVerify";
    /// Name of the container running the server.
    pub const CONTAINER_NAME: &str = "InfluxDBContainerName";
}

/// Credential parameters for an InfluxDB instance.
///
/// Built from a JSON object with [`TryFrom<Map<String, Value>>`]; the
/// object must be non-empty and carry an `InfluxDBTokenAccessType`. A
/// label that is not a string becomes [`AccessType::Unknown`].
///
/// # Examples
///
/// ```
/// use credstream_models::{AccessType, CredentialPayload};
/// use serde_json::json;
///
/// let payload: CredentialPayload = serde_json::from_value(json!({
///     "InfluxDBTokenAccessType": "RO",
///     "token": "abc",
/// })).unwrap();
///
/// assert_eq!(payload.access_type(), &AccessType::ReadOnly);
/// assert_eq!(payload.field("token"), Some(&json!("abc")));
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct CredentialPayload {
    access_type: AccessType,
    extra: Map<String, Value>,
}

impl CredentialPayload {
    /// Create a payload with the given access level and no other fields.
    pub fn new(access_type: AccessType) -> Self {
        Self {
            access_type,
            extra: Map::new(),
        }
    }

    /// Builder-style helper to attach a pass-through field.
    ///
    /// Setting [`ACCESS_TYPE_FIELD`] here is ignored; use [`Self::new`].
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != ACCESS_TYPE_FIELD {
            self.extra.insert(key, value.into());
        }
        self
    }

    /// The token access level.
    pub fn access_type(&self) -> &AccessType {
        &self.access_type
    }

    /// Fields other than the access level, as received.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Look up a pass-through field by name.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Rebuild the full mapping, access level included.
    pub fn to_map(&self) -> Map<String, Value> {
        self.clone().into()
    }

    // ------------------------------------------------------------------
    // Connection parameters
    // ------------------------------------------------------------------

    /// The InfluxDB API token.
    pub fn token(&self) -> Option<&str> {
        self.str_field(fields::TOKEN)
    }

    /// InfluxDB organisation.
    pub fn org(&self) -> Option<&str> {
        self.str_field(fields::ORG)
    }

    /// InfluxDB bucket.
    pub fn bucket(&self) -> Option<&str> {
        self.str_field(fields::BUCKET)
    }

    /// Host interface of the server.
    pub fn interface(&self) -> Option<&str> {
        self.str_field(fields::INTERFACE)
    }

    /// Server protocol, usually `http` or `https`.
    pub fn server_protocol(&self) -> Option<&str> {
        self.str_field(fields::SERVER_PROTOCOL)
    }

    /// Name of the container running the server.
    pub fn container_name(&self) -> Option<&str> {
        self.str_field(fields::CONTAINER_NAME)
    }

    /// Server port. Accepts both `8086` and `"8086"`.
    pub fn port(&self) -> Option<u16> {
        match self.extra.get(fields::PORT)? {
            Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// TLS verification override. Accepts both `true` and `"true"`.
    pub fn skip_tls_verify(&self) -> Option<bool> {
        match self.extra.get(fields::SKIP_TLS_VERIFY)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s.trim().to_ascii_lowercase().parse().ok(),
            _ => None,
        }
    }

    /// `{protocol}://{interface}:{port}` when all three parameters are present.
    pub fn server_url(&self) -> Option<String> {
        let protocol = self.server_protocol()?;
        let interface = self.interface()?;
        let port = self.port()?;
        Some(format!("{protocol}://{interface}:{port}"))
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

impl TryFrom<Map<String, Value>> for CredentialPayload {
    type Error = PayloadError;

    fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
        if map.is_empty() {
            return Err(PayloadError::Empty);
        }

        let access_type = match map.remove(ACCESS_TYPE_FIELD) {
            Some(Value::String(s)) => AccessType::from(s),
            // Non-string labels are never read-only; keep them for the warning.
            Some(other) => AccessType::Unknown(other.to_string()),
            None => {
                return Err(PayloadError::MissingField {
                    field: ACCESS_TYPE_FIELD.to_string(),
                });
            }
        };

        Ok(Self {
            access_type,
            extra: map,
        })
    }
}

impl From<CredentialPayload> for Map<String, Value> {
    fn from(payload: CredentialPayload) -> Self {
        let mut map = payload.extra;
        map.insert(
            ACCESS_TYPE_FIELD.to_string(),
            Value::String(payload.access_type.into()),
        );
        map
    }
}

impl fmt::Debug for CredentialPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut extra = self.extra.clone();
        for (key, value) in &mut extra {
            if key.to_ascii_lowercase().ends_with("token") {
                *value = Value::String("<redacted>".to_string());
            }
        }
        f.debug_struct("CredentialPayload")
            .field("access_type", &self.access_type)
            .field("extra", &extra)
            .finish()
    }
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
