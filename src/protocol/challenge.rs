// src/protocol/challenge.rs
//! Two-round challenge-response request signing.
//!
//! Round one signs a bare assertion of the identity's name and trades it
//! for a one-time challenge token. Round two signs a [`By`] envelope
//! binding that token and the same user name to the actual payload. The
//! two rounds run strictly in order with the same signing capability; the
//! token is never cached or reused across invocations.
//!
//! The resulting envelope is valid for one submission within a short,
//! server-defined window. Expiry is enforced server-side only — there is
//! no local timer.

use log::debug;
use serde::Serialize;

use crate::error::AuthError;
use crate::identity::{Identity, Session};
use crate::models::{By, Signed};
use crate::transport::ChallengeService;

/// Signs `payload` on behalf of the session's current identity.
///
/// Fails fast with [`AuthError::NotAuthenticated`] when no identity is
/// logged in; no network call is made in that case.
///
/// # Errors
/// - [`AuthError::NotAuthenticated`] — session is logged out
/// - [`AuthError::ChallengeRequestFailed`] — no token could be obtained;
///   retrying means restarting the whole two-round flow
/// - [`AuthError::Signing`] — either signing step failed
pub async fn sign_request<T, S>(
    session: &Session,
    service: &S,
    payload: T,
) -> Result<Signed<By<T>>, AuthError>
where
    T: Serialize,
    S: ChallengeService,
{
    let identity = session.current().ok_or(AuthError::NotAuthenticated)?;
    sign_request_as(&identity, service, payload).await
}

/// Signs `payload` on behalf of an explicit identity.
///
/// The challenge is requested for, and the final envelope bound to, this
/// identity's name; both signatures are made with the same capability, so
/// a mid-flow identity substitution cannot occur.
pub async fn sign_request_as<T, S>(
    identity: &Identity,
    service: &S,
    payload: T,
) -> Result<Signed<By<T>>, AuthError>
where
    T: Serialize,
    S: ChallengeService,
{
    // Round one: signed assertion of the name alone, traded for a token.
    let assertion = Signed::sign(identity.signer(), identity.name().to_string())?;
    let challenge = service.request_challenge(&assertion).await?;
    debug!("challenge obtained for '{}'", identity.name());

    // Round two: sign the payload bound to the token and the same name.
    let envelope = By::new(identity.name().to_string(), challenge, payload);
    Signed::sign(identity.signer(), envelope)
}
