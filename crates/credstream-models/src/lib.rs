#![deny(missing_docs)]

//! # credstream Models
//!
//! Core data types for the InfluxDB credential stream of an edge agent.
//!
//! ## Message flow
//!
//! ```text
//! component ── TokenRequest ──▶ {ns}.influxdb.token.request
//!                                        │
//!                                  token-provider
//!                                        │
//! component ◀── SubscriptionEvent ── {ns}.influxdb.token.response
//!                └── CredentialPayload
//!                    ├── InfluxDBTokenAccessType (AccessType)
//!                    └── connection parameters (opaque, passed through)
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`access`] | Token access level (`AccessType`) |
//! | [`credential`] | The credential record (`CredentialPayload`) |
//! | [`event`] | Inbound subscription event (`SubscriptionEvent`) |
//! | [`request`] | Outbound token request (`TokenRequest`) |
//! | [`error`] | Payload extraction errors (`PayloadError`) |

pub mod access;
pub mod credential;
pub mod error;
pub mod event;
pub mod request;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `credstream_models::AccessType` directly.
pub use access::*;
pub use credential::*;
pub use error::*;
pub use event::*;
pub use request::*;
