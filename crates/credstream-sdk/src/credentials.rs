//! Credentials used to authenticate the NATS connection itself.

use nkeys::KeyPair;

use crate::error::SdkError;

/// User JWT and NKey seed for a decentralised-auth NATS server.
///
/// * `jwt`  – User JWT that authorises the connection with specific permissions.
/// * `seed` – NKey seed (private key) used to sign the server challenge.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct NatsCredentials {
    /// User JWT that encodes NATS permissions.
    pub jwt: String,
    /// NKey seed for NATS authentication.
    pub seed: String,
}

impl NatsCredentials {
    /// Check that the seed decodes to a key pair.
    pub fn key_pair(&self) -> Result<KeyPair, SdkError> {
        KeyPair::from_seed(&self.seed)
            .map_err(|e| SdkError::Config(format!("invalid NKey seed: {e}")))
    }
}

impl std::fmt::Debug for NatsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsCredentials")
            .field("jwt", &self.jwt)
            .field("seed", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_seed_is_accepted() {
        let kp = KeyPair::new(nkeys::KeyPairType::User);
        let creds = NatsCredentials {
            jwt: "jwt".into(),
            seed: kp.seed().unwrap(),
        };
        assert_eq!(creds.key_pair().unwrap().public_key(), kp.public_key());
    }

    #[test]
    fn garbage_seed_is_config_error() {
        let creds = NatsCredentials {
            jwt: "jwt".into(),
            seed: "not-a-seed".into(),
        };
        assert!(matches!(creds.key_pair(), Err(SdkError::Config(_))));
    }

    #[test]
    fn debug_hides_seed() {
        let creds = NatsCredentials {
            jwt: "jwt".into(),
            seed: "SUAsecret".into(),
        };
        assert!(!format!("{creds:?}").contains("SUAsecret"));
    }
}
