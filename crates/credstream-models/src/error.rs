//! Error types for the `credstream-models` crate.
//!
//! Every failure to turn an inbound message into a [`crate::CredentialPayload`]
//! is reported as a variant of [`PayloadError`].

/// Errors produced when extracting a credential payload from a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    /// The message had no decoded JSON body (binary or malformed payload).
    #[error("message carries no decoded JSON body")]
    MissingBody,

    /// The decoded body was valid JSON but not an object.
    #[error("message body is a JSON {kind}, expected an object")]
    NotAnObject {
        /// JSON kind that was received (`array`, `string`, ...).
        kind: String,
    },

    /// The body was an object with no fields at all.
    #[error("retrieved credential parameters are empty")]
    Empty,

    /// A required field was absent.
    #[error("missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_empty() {
        assert_eq!(
            PayloadError::Empty.to_string(),
            "retrieved credential parameters are empty"
        );
    }

    #[test]
    fn error_display_not_an_object() {
        let err = PayloadError::NotAnObject {
            kind: "array".into(),
        };
        assert_eq!(err.to_string(), "message body is a JSON array, expected an object");
    }

    #[test]
    fn error_display_missing_field() {
        let err = PayloadError::MissingField {
            field: "InfluxDBTokenAccessType".into(),
        };
        assert_eq!(
            err.to_string(),
            "missing required field: InfluxDBTokenAccessType"
        );
    }
}
