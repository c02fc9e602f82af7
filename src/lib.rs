// src/lib.rs
//! # Identity & Signed-Request Client
//!
//! Client-side subsystem for establishing a durable cryptographic identity
//! and authenticating individual requests against a backend.
//!
//! ## Architecture Overview
//! 1. **Identity Layer**: P-256 key-pair ownership, PEM export, session state
//! 2. **Models Layer**: certificates and signed/challenge envelopes
//! 3. **Protocol Layer**: registration and two-round challenge signing
//! 4. **Transport Layer**: HTTP gateway to the backend auth endpoints
//!
//! ## Flow
//! Registration: `Identity` → `Certificate` → `Signed<Certificate>` →
//! `POST /auth/register`. Authenticated request: signed name assertion →
//! `POST /auth/challenge` → token → `Signed<By<payload>>`.

// Module declarations (organized by functional domain)
pub mod error; // Failure taxonomy
pub mod identity; // Cryptographic key operations and session state
pub mod models; // Wire data structures
pub mod protocol; // Registration and challenge-response flows
pub mod transport; // Backend service gateway
pub mod utils; // Signature encoding and canonical serialization

pub use error::AuthError;
pub use identity::{Identity, Session, SigningCapability};
pub use models::{By, Certificate, Signed};
pub use protocol::{register, sign_request, sign_request_as, RegistrationPolicy};
pub use transport::{ChallengeService, HttpGateway, RegistrationService};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory backend double covering both auth endpoints.
    struct FakeBackend {
        challenge_calls: AtomicUsize,
        register_calls: AtomicUsize,
    }

    impl FakeBackend {
        fn new() -> Self {
            FakeBackend {
                challenge_calls: AtomicUsize::new(0),
                register_calls: AtomicUsize::new(0),
            }
        }
    }

    impl ChallengeService for FakeBackend {
        async fn request_challenge(&self, request: &Signed<String>) -> Result<String, AuthError> {
            self.challenge_calls.fetch_add(1, Ordering::SeqCst);
            // The round-one assertion carries the bare identity name.
            assert_eq!(request.data(), "alice");
            Ok("xyz123".to_string())
        }
    }

    impl RegistrationService for FakeBackend {
        async fn submit_certificate(&self, _envelope: &Signed<Certificate>) -> Result<(), AuthError> {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_end_to_end_register_then_sign() {
        let backend = FakeBackend::new();

        // Register "alice" with no contact and log her in.
        let identity = register(&backend, RegistrationPolicy::Strict, "alice", None)
            .await
            .unwrap();
        let session = Session::new();
        session.login(identity);

        // Sign a request payload through the challenge flow.
        let signed = sign_request(&session, &backend, "apples".to_string())
            .await
            .unwrap();

        assert_eq!(signed.data().user, "alice");
        assert_eq!(signed.data().challenge, "xyz123");
        assert_eq!(signed.data().data, "apples");

        let der = base64::decode(signed.signature()).unwrap();
        assert!((70..=72).contains(&der.len()));

        assert_eq!(backend.register_calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend.challenge_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_logout_blocks_signing_without_network() {
        let backend = FakeBackend::new();
        let session = Session::new();
        session.login(Identity::generate("alice", None).unwrap());
        session.logout();

        let err = sign_request(&session, &backend, "apples".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NotAuthenticated));
        assert_eq!(backend.challenge_calls.load(Ordering::SeqCst), 0);
    }
}
