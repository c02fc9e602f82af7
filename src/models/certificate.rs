// src/models/certificate.rs
//! Self-issued certificate data model.
//!
//! A certificate binds an identity's public key to its display name and
//! optional contact address. It carries no authority by itself — it is
//! submitted to the registration service inside a signed envelope, and the
//! enclosing signature (made with the matching private key) is what proves
//! possession.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A self-issued certificate for a client identity.
///
/// Immutable once constructed; always reconstructible from the identity
/// that issued it. Field declaration order is the canonical serialization
/// order and must not be rearranged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// Display name of the identity; the stable handle the server keys
    /// records by.
    pub name: String,

    /// Optional contact address for the identity holder.
    pub contact: Option<String>,

    /// PEM-encoded SPKI public key (`-----BEGIN PUBLIC KEY-----` framing).
    pub pubkey: String,

    /// ISO 8601 wall-clock time of construction.
    pub created: String,
}

impl Certificate {
    /// Builds a certificate stamped with the current wall-clock time.
    ///
    /// # Arguments
    /// * `name` - Display name of the identity
    /// * `contact` - Optional contact address
    /// * `pubkey` - PEM-encoded public key of the identity
    pub fn new(name: String, contact: Option<String>, pubkey: String) -> Self {
        Certificate {
            name,
            contact,
            pubkey,
            created: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
