// src/identity/keys.rs
//! Key-pair ownership and signing capability for client identities.
//!
//! An [`Identity`] owns a P-256 ECDSA key pair and derives everything the
//! rest of the system needs from it: the SPKI PEM export, the self-issued
//! certificate, and an opaque [`SigningCapability`]. The secret key itself
//! never crosses this module's boundary — other components only ever see
//! the capability, which keeps the hazard of accidental private-key
//! serialization contained to one place.

use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use p256::pkcs8::EncodePublicKey;
use p256::{PublicKey, SecretKey};

use crate::error::AuthError;
use crate::models::Certificate;
use crate::utils::signature::RAW_SIGNATURE_LEN;

/// Opaque capability to produce signatures with one identity's private key.
///
/// Deliberately implements neither `Serialize` nor `Debug` output of key
/// material; the only operation it exposes is signing.
pub struct SigningCapability {
    /// Securely held private key (never exposed)
    secret_key: SecretKey,
}

impl SigningCapability {
    /// Signs a message with ECDSA (P-256) over a SHA-256 digest.
    ///
    /// # Arguments
    /// * `message` - Raw message bytes to sign
    ///
    /// # Returns
    /// 64-byte raw P1363 signature (`r` ‖ `s`), or [`AuthError::Signing`]
    /// if the signing primitive fails.
    ///
    /// # Security
    /// Uses deterministic ECDSA (RFC 6979); signing is read-only with
    /// respect to the key and safe to run concurrently.
    pub(crate) fn sign_raw(&self, message: &[u8]) -> Result<[u8; RAW_SIGNATURE_LEN], AuthError> {
        let signing_key = SigningKey::from(&self.secret_key);
        let signature: Signature = signing_key
            .try_sign(message)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        let mut raw = [0u8; RAW_SIGNATURE_LEN];
        raw.copy_from_slice(&signature.to_bytes());
        Ok(raw)
    }
}

/// A client identity: display name, optional contact, and a P-256 key pair.
///
/// The key pair is created atomically — the public half is always derived
/// from the secret half at construction, so an identity can never exist
/// with only one of the two.
pub struct Identity {
    name: String,
    contact: Option<String>,
    signer: SigningCapability,
    /// Derived public key for export and verification
    public_key: PublicKey,
}

impl core::fmt::Debug for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Identity")
            .field("name", &self.name)
            .field("contact", &self.contact)
            .field("signer", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

impl Identity {
    /// Generates an identity with a fresh random key pair.
    ///
    /// # Arguments
    /// * `name` - Display name; the stable handle used in challenge
    ///   requests and server records. Must be non-empty.
    /// * `contact` - Optional contact address
    ///
    /// # Errors
    /// Returns [`AuthError::KeyGeneration`] if `name` is empty.
    pub fn generate(name: &str, contact: Option<&str>) -> Result<Identity, AuthError> {
        let secret_key = SecretKey::random(&mut rand::thread_rng());
        Self::from_secret(name, contact, secret_key)
    }

    /// Restores an identity from previously stored secret-key material.
    ///
    /// The restored identity satisfies the same signing contract as a
    /// freshly generated one. Where and how the bytes were stored is the
    /// storage collaborator's concern.
    ///
    /// # Errors
    /// Returns [`AuthError::KeyGeneration`] if the bytes are not a valid
    /// P-256 secret scalar or `name` is empty.
    pub fn from_secret_bytes(
        name: &str,
        contact: Option<&str>,
        bytes: &[u8],
    ) -> Result<Identity, AuthError> {
        let secret_key =
            SecretKey::from_slice(bytes).map_err(|e| AuthError::KeyGeneration(e.to_string()))?;
        Self::from_secret(name, contact, secret_key)
    }

    fn from_secret(
        name: &str,
        contact: Option<&str>,
        secret_key: SecretKey,
    ) -> Result<Identity, AuthError> {
        if name.is_empty() {
            return Err(AuthError::KeyGeneration(
                "identity name must not be empty".into(),
            ));
        }
        let public_key = secret_key.public_key();
        Ok(Identity {
            name: name.to_string(),
            contact: contact.map(str::to_string),
            signer: SigningCapability { secret_key },
            public_key,
        })
    }

    /// The identity's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The identity's contact address, if any.
    pub fn contact(&self) -> Option<&str> {
        self.contact.as_deref()
    }

    /// The signing capability for this identity's private key.
    pub fn signer(&self) -> &SigningCapability {
        &self.signer
    }

    /// The identity's public key (public material, free to share).
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Exports the public key as a PEM-framed SPKI document.
    ///
    /// The base64 body is emitted as a single unwrapped line between the
    /// `BEGIN`/`END` markers, newline-terminated. Deterministic for a
    /// given key.
    pub fn public_key_pem(&self) -> String {
        let der = self
            .public_key
            .to_public_key_der()
            .expect("SPKI export of a valid P-256 public key cannot fail");
        format!(
            "-----BEGIN PUBLIC KEY-----\n{}\n-----END PUBLIC KEY-----\n",
            base64::encode(der.as_bytes())
        )
    }

    /// Builds the self-issued certificate for this identity, stamped with
    /// the current wall-clock time. Pure derivation; no signing happens
    /// here.
    pub fn certificate(&self) -> Certificate {
        Certificate::new(
            self.name.clone(),
            self.contact.clone(),
            self.public_key_pem(),
        )
    }

    /// Exports the secret-key bytes for the storage collaborator.
    ///
    /// This is the single deliberate exit point for private key material;
    /// callers own the handling of the returned bytes. Pair with
    /// [`Identity::from_secret_bytes`] to restore.
    pub fn export_secret_bytes(&self) -> Vec<u8> {
        self.signer.secret_key.to_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_rejects_empty_name() {
        let err = Identity::generate("", None).unwrap_err();
        assert!(matches!(err, AuthError::KeyGeneration(_)));
    }

    #[test]
    fn test_public_key_pem_is_deterministic() {
        let identity = Identity::generate("alice", None).unwrap();
        assert_eq!(identity.public_key_pem(), identity.public_key_pem());
    }

    #[test]
    fn test_public_key_pem_framing() {
        let identity = Identity::generate("alice", None).unwrap();
        let pem = identity.public_key_pem();
        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----\n"));
        assert!(pem.ends_with("\n-----END PUBLIC KEY-----\n"));

        // Single unwrapped base64 line between the markers.
        let body: Vec<&str> = pem.trim_end().lines().collect();
        assert_eq!(body.len(), 3);
        assert!(base64::decode(body[1]).is_ok());
    }

    #[test]
    fn test_certificate_carries_identity_fields() {
        let identity = Identity::generate("bob", Some("bob@example.org")).unwrap();
        let cert = identity.certificate();
        assert_eq!(cert.name, "bob");
        assert_eq!(cert.contact.as_deref(), Some("bob@example.org"));
        assert_eq!(cert.pubkey, identity.public_key_pem());
    }

    #[test]
    fn test_restore_round_trip_preserves_key() {
        let identity = Identity::generate("carol", None).unwrap();
        let bytes = identity.export_secret_bytes();
        let restored = Identity::from_secret_bytes("carol", None, &bytes).unwrap();
        assert_eq!(identity.public_key_pem(), restored.public_key_pem());
    }

    #[test]
    fn test_restore_rejects_garbage_material() {
        let err = Identity::from_secret_bytes("dave", None, &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, AuthError::KeyGeneration(_)));
    }
}
