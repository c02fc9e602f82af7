// src/error.rs
//! Error taxonomy for the identity and signed-request subsystem.
//!
//! Every failure mode of the core is a distinct, inspectable variant.
//! Nothing here is retried internally; retry policy belongs to the caller
//! or the transport layer.

use thiserror::Error;

/// Failures surfaced by identity, signing, and registration operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The cryptographic provider could not produce or restore a key pair,
    /// or the identity parameters were invalid (e.g. empty name).
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// The signing capability was unavailable at sign time, or the payload
    /// could not be canonically serialized.
    #[error("signing failed: {0}")]
    Signing(String),

    /// The challenge service could not be reached or returned a non-success
    /// status. Aborts the two-phase signing flow; a caller that retries must
    /// restart from the first round — challenge tokens are single use.
    #[error("challenge request failed: {0}")]
    ChallengeRequestFailed(String),

    /// The registration service declined the certificate. `detail` carries
    /// the server's response body (or the transport error when the service
    /// was unreachable). Local key material is unaffected.
    #[error("registration rejected: {detail}")]
    RegistrationRejected { detail: String },

    /// A signing operation was attempted with no identity logged in.
    /// Detected before any network call is made.
    #[error("not authenticated: no identity is logged in")]
    NotAuthenticated,
}
