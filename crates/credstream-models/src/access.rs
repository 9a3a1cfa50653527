//! Token access levels.
//!
//! The token-provider labels every token it hands out with an access level.
//! Only [`AccessType::ReadOnly`] tokens are ever retained by consumers of the
//! credential stream; anything else is discarded on arrival.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Access level carried in the `InfluxDBTokenAccessType` field.
///
/// Parsing never fails: strings other than `"RO"` and `"RW"` are kept
/// verbatim in [`Unknown`](Self::Unknown) so they can be reported.
///
/// # Examples
///
/// ```
/// use credstream_models::AccessType;
///
/// let ro: AccessType = "RO".parse().unwrap();
/// assert_eq!(ro, AccessType::ReadOnly);
/// assert!(ro.is_read_only());
///
/// let admin = AccessType::from(String::from("Admin"));
/// assert_eq!(admin, AccessType::Unknown("Admin".into()));
/// assert_eq!(admin.to_string(), "Admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessType {
    /// Read-only token (`"RO"`).
    #[strum(serialize = "RO")]
    ReadOnly,
    /// Read-write token (`"RW"`).
    #[strum(serialize = "RW")]
    ReadWrite,
    /// Any other label, kept as received.
    #[strum(default)]
    Unknown(String),
}

impl AccessType {
    /// Wire representation of this access level.
    pub fn as_str(&self) -> &str {
        match self {
            Self::ReadOnly => "RO",
            Self::ReadWrite => "RW",
            Self::Unknown(other) => other,
        }
    }

    /// Whether this is the read-only level.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly)
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AccessType {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Self::Unknown(s))
    }
}

impl From<AccessType> for String {
    fn from(access: AccessType) -> Self {
        match access {
            AccessType::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
