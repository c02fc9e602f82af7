// src/models/envelope.rs
//! Signed-envelope and challenge-envelope data models.
//!
//! [`Signed`] pairs a payload with an ECDSA signature over the payload's
//! canonical serialization. [`By`] binds a payload to the user name and
//! one-time challenge token issued by the server; it is the `By`, not the
//! bare payload, that gets signed in the second round of the
//! challenge-response protocol.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::identity::SigningCapability;
use crate::utils::serialization::canonical_bytes;
use crate::utils::signature::encode_der;

/// A payload together with a signature over its canonical serialization.
///
/// `data` and `signature` are set together at construction and never
/// mutated afterwards; mutating either half independently would silently
/// invalidate the pair, so no mutable access is exposed.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Signed<T> {
    data: T,
    /// Base64 text of the DER-encoded ECDSA signature over `data`'s
    /// canonical bytes.
    signature: String,
}

impl<T: Serialize> Signed<T> {
    /// Signs `data` and wraps it in an envelope.
    ///
    /// # Process Flow
    /// 1. Serialize `data` to its canonical JSON bytes
    /// 2. Produce a raw ECDSA (P-256, SHA-256) signature over those bytes
    /// 3. Encode the raw signature as DER and base64 the result
    ///
    /// # Errors
    /// Returns [`AuthError::Signing`] if the payload cannot be serialized
    /// or the signing capability is unavailable.
    pub fn sign(signer: &SigningCapability, data: T) -> Result<Signed<T>, AuthError> {
        let payload = canonical_bytes(&data).map_err(|e| AuthError::Signing(e.to_string()))?;
        let raw = signer.sign_raw(&payload)?;
        let signature = base64::encode(encode_der(&raw));
        Ok(Signed { data, signature })
    }
}

impl<T> Signed<T> {
    /// The signed payload.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// The base64 DER signature text.
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// A payload bound to the user and challenge token it was authorized with.
///
/// Canonical field order: `user`, `challenge`, `data`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct By<T> {
    /// Name of the identity performing the signing. Must match the name the
    /// challenge was requested for; the server rejects mismatches.
    pub user: String,

    /// Opaque one-time challenge token issued by the server.
    pub challenge: String,

    /// The request payload being authorized.
    pub data: T,
}

impl<T> By<T> {
    /// Binds `data` to a user name and challenge token.
    pub fn new(user: String, challenge: String, data: T) -> Self {
        By {
            user,
            challenge,
            data,
        }
    }
}
