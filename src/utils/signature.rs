// src/utils/signature.rs
//! ECDSA signature encoding.
//!
//! Elliptic-curve signing primitives emit fixed-width IEEE P1363 signatures:
//! a 32-byte big-endian `r` followed by a 32-byte big-endian `s`. Standard
//! verification stacks expect ASN.1 DER instead — a SEQUENCE of two
//! INTEGERs. This module performs that conversion.
//!
//! DER INTEGERs are signed: when the high bit of a component's first byte is
//! set, a `0x00` pad byte must be prepended to keep the value non-negative.
//! Beyond that single pad decision no normalization is applied; interior
//! leading zero bytes of the 32-byte value are emitted verbatim, which is
//! sufficient for P-256 verifiers.

/// Length of a raw P1363 ECDSA signature over P-256 (r ‖ s).
pub const RAW_SIGNATURE_LEN: usize = 64;

/// Length of each signature component (curve order width).
const COMPONENT_LEN: usize = 32;

/// DER length when neither component needs a pad byte: a 2-byte SEQUENCE
/// header plus two 34-byte INTEGER TLVs.
const BASE_DER_LEN: usize = 70;

/// Encodes a raw P1363 ECDSA signature as a DER SEQUENCE of two INTEGERs.
///
/// # Arguments
/// * `raw` - 64-byte raw signature, `r` in the first half, `s` in the second
///
/// # Returns
/// DER bytes of length 70, 71, or 72 depending on how many components
/// required a pad byte. The buffer is sized exactly up front; encoding a
/// well-formed raw signature cannot fail (the fixed-size input type makes a
/// wrong-length signature unrepresentable).
pub fn encode_der(raw: &[u8; RAW_SIGNATURE_LEN]) -> Vec<u8> {
    let (r, s) = raw.split_at(COMPONENT_LEN);
    let pad_r = r[0] > 0x7F;
    let pad_s = s[0] > 0x7F;
    let len = BASE_DER_LEN + usize::from(pad_r) + usize::from(pad_s);

    let mut out = Vec::with_capacity(len);
    out.push(0x30); // SEQUENCE
    out.push((len - 2) as u8);
    push_integer(&mut out, r, pad_r);
    push_integer(&mut out, s, pad_s);
    debug_assert_eq!(out.len(), len);
    out
}

/// Appends one DER INTEGER TLV for a 32-byte unsigned component.
fn push_integer(out: &mut Vec<u8>, value: &[u8], pad: bool) {
    out.push(0x02); // INTEGER
    out.push(if pad { 33 } else { 32 });
    if pad {
        out.push(0x00);
    }
    out.extend_from_slice(value);
}

/// Parses the DER form produced by [`encode_der`] back into raw components.
/// Test-side inverse used to check round-trips and verifier compatibility.
#[cfg(test)]
pub(crate) fn decode_der(der: &[u8]) -> Option<[u8; RAW_SIGNATURE_LEN]> {
    if der.len() < 2 || der[0] != 0x30 || usize::from(der[1]) != der.len() - 2 {
        return None;
    }
    let mut raw = [0u8; RAW_SIGNATURE_LEN];
    let mut pos = 2;
    for component in 0..2 {
        if der.get(pos) != Some(&0x02) {
            return None;
        }
        let len = usize::from(*der.get(pos + 1)?);
        pos += 2;
        if len == 33 {
            if der.get(pos) != Some(&0x00) {
                return None;
            }
            pos += 1;
        } else if len != 32 {
            return None;
        }
        let value = der.get(pos..pos + COMPONENT_LEN)?;
        raw[component * COMPONENT_LEN..(component + 1) * COMPONENT_LEN].copy_from_slice(value);
        pos += COMPONENT_LEN;
    }
    (pos == der.len()).then_some(raw)
}
