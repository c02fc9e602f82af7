// src/protocol/registration.rs
//! One-shot identity registration.
//!
//! Generates a fresh identity, signs its self-issued certificate with its
//! own key, and submits the envelope to the registration service. Local
//! key material is never discarded here, whatever the server answers;
//! persisting the identity afterwards is the caller's job.

use log::{info, warn};

use crate::error::AuthError;
use crate::identity::Identity;
use crate::models::Signed;
use crate::transport::RegistrationService;

/// How a server-side registration rejection is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationPolicy {
    /// A rejection is returned as [`AuthError::RegistrationRejected`] and
    /// the generated identity is not yielded.
    #[default]
    Strict,
    /// A rejection is logged and the locally generated identity is yielded
    /// anyway, leaving the caller to decide what to do with it.
    Optimistic,
}

/// Registers a new identity with the backend.
///
/// # Arguments
/// * `service` - Registration service collaborator
/// * `policy` - Whether a server rejection fails the call or is tolerated
/// * `name` - Display name for the new identity (non-empty)
/// * `contact` - Optional contact address
///
/// # Returns
/// The generated identity. Under [`RegistrationPolicy::Strict`] this means
/// the server accepted the certificate; under
/// [`RegistrationPolicy::Optimistic`] the identity is returned even when
/// the server declined.
///
/// # Errors
/// - [`AuthError::KeyGeneration`] — invalid name or key-pair failure
/// - [`AuthError::Signing`] — certificate could not be signed
/// - [`AuthError::RegistrationRejected`] — server declined (strict policy)
pub async fn register<S>(
    service: &S,
    policy: RegistrationPolicy,
    name: &str,
    contact: Option<&str>,
) -> Result<Identity, AuthError>
where
    S: RegistrationService,
{
    let identity = Identity::generate(name, contact)?;
    let envelope = Signed::sign(identity.signer(), identity.certificate())?;

    match service.submit_certificate(&envelope).await {
        Ok(()) => {
            info!("registered identity '{}'", identity.name());
            Ok(identity)
        }
        Err(err @ AuthError::RegistrationRejected { .. }) => match policy {
            RegistrationPolicy::Strict => Err(err),
            RegistrationPolicy::Optimistic => {
                warn!("keeping local identity despite rejection: {err}");
                Ok(identity)
            }
        },
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Certificate;
    use std::sync::Mutex;

    /// Registration service double capturing the submitted envelope.
    #[derive(Default)]
    struct Accepting {
        seen: Mutex<Option<Signed<Certificate>>>,
    }

    impl RegistrationService for Accepting {
        async fn submit_certificate(
            &self,
            envelope: &Signed<Certificate>,
        ) -> Result<(), AuthError> {
            *self.seen.lock().unwrap() = Some(envelope.clone());
            Ok(())
        }
    }

    /// Registration service double that always declines.
    struct Declining;

    impl RegistrationService for Declining {
        async fn submit_certificate(
            &self,
            _envelope: &Signed<Certificate>,
        ) -> Result<(), AuthError> {
            Err(AuthError::RegistrationRejected {
                detail: "name already registered".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_register_submits_signed_certificate() {
        let service = Accepting::default();
        let identity = register(&service, RegistrationPolicy::Strict, "alice", None)
            .await
            .unwrap();

        let envelope = service.seen.lock().unwrap().take().expect("submitted");
        assert_eq!(envelope.data().name, "alice");
        assert_eq!(envelope.data().contact, None);
        assert_eq!(envelope.data().pubkey, identity.public_key_pem());

        let der = base64::decode(envelope.signature()).unwrap();
        assert!((70..=72).contains(&der.len()));
    }

    #[tokio::test]
    async fn test_strict_policy_surfaces_rejection() {
        let err = register(&Declining, RegistrationPolicy::Strict, "alice", None)
            .await
            .unwrap_err();
        match err {
            AuthError::RegistrationRejected { detail } => {
                assert_eq!(detail, "name already registered");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_optimistic_policy_keeps_identity() {
        let identity = register(&Declining, RegistrationPolicy::Optimistic, "alice", None)
            .await
            .unwrap();
        assert_eq!(identity.name(), "alice");
    }

    #[tokio::test]
    async fn test_invalid_name_fails_before_submission() {
        let service = Accepting::default();
        let err = register(&service, RegistrationPolicy::Strict, "", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::KeyGeneration(_)));
        assert!(service.seen.lock().unwrap().is_none());
    }
}
