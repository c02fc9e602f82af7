// src/utils/serialization.rs
//! Canonical serialization for signed payloads.
//!
//! A signature is only checkable if the verifier can reproduce the exact
//! bytes that were signed. Payloads are therefore serialized as JSON with
//! struct fields in declaration order — the stable ordering `serde_json`
//! guarantees for derived structs — and signed in that form.

use serde::Serialize;

/// Serializes a payload to the canonical byte form used for signing.
///
/// # Arguments
/// * `data` - The value to serialize (must implement `Serialize`)
///
/// # Returns
/// - `Ok(Vec<u8>)` with the canonical JSON bytes on success
/// - `Err(serde_json::Error)` if serialization fails
pub fn canonical_bytes<T: Serialize>(data: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(data)
}
