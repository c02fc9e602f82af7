// src/transport/mod.rs
//! Transport seam to the backend auth services.
//!
//! The signing and registration flows talk to the outside world only
//! through the [`ChallengeService`] and [`RegistrationService`] traits, so
//! tests can substitute counting doubles and the HTTP stack stays out of
//! the core. [`HttpGateway`] is the production implementation over
//! `reqwest`.

use once_cell::sync::Lazy;
use reqwest::StatusCode;

use crate::error::AuthError;
use crate::models::{Certificate, Signed};

/// Issues one-time challenge tokens bound to an asserted identity name.
#[allow(async_fn_in_trait)]
pub trait ChallengeService {
    /// Submits a signed identity-name assertion and returns the opaque
    /// challenge token the server issued for it.
    ///
    /// # Errors
    /// [`AuthError::ChallengeRequestFailed`] on transport failure or a
    /// non-success status.
    async fn request_challenge(&self, request: &Signed<String>) -> Result<String, AuthError>;
}

/// Accepts signed certificates for identity registration.
#[allow(async_fn_in_trait)]
pub trait RegistrationService {
    /// Submits a signed certificate envelope.
    ///
    /// # Errors
    /// [`AuthError::RegistrationRejected`] when the server answers with
    /// anything other than its "created" status, carrying the response
    /// body as detail.
    async fn submit_certificate(&self, envelope: &Signed<Certificate>) -> Result<(), AuthError>;
}

/// Shared HTTP client, initialized at most once and reused by every
/// gateway instance.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// HTTP implementation of the auth service endpoints.
///
/// Endpoints, relative to the configured base URL:
/// - `POST /auth/challenge` — body: `Signed<String>`, response: challenge
///   token (plain text or JSON string scalar)
/// - `POST /auth/register` — body: `Signed<Certificate>`, success: 201
#[derive(Clone, Debug)]
pub struct HttpGateway {
    base_url: String,
}

impl HttpGateway {
    /// Creates a gateway for the given backend base URL.
    ///
    /// # Arguments
    /// * `base_url` - e.g. `https://backend.example.org` (trailing slash
    ///   tolerated)
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        HttpGateway { base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ChallengeService for HttpGateway {
    async fn request_challenge(&self, request: &Signed<String>) -> Result<String, AuthError> {
        let response = HTTP_CLIENT
            .post(self.endpoint("/auth/challenge"))
            .json(request)
            .send()
            .await
            .map_err(|e| AuthError::ChallengeRequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::ChallengeRequestFailed(format!(
                "challenge endpoint answered {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AuthError::ChallengeRequestFailed(e.to_string()))?;

        // The token arrives either as a bare text body or a JSON string
        // scalar; normalize both to the inner token.
        let token = serde_json::from_str::<String>(&body).unwrap_or(body);
        log::debug!("obtained challenge token ({} chars)", token.len());
        Ok(token)
    }
}

impl RegistrationService for HttpGateway {
    async fn submit_certificate(&self, envelope: &Signed<Certificate>) -> Result<(), AuthError> {
        let response = HTTP_CLIENT
            .post(self.endpoint("/auth/register"))
            .json(envelope)
            .send()
            .await
            .map_err(|e| AuthError::RegistrationRejected {
                detail: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::CREATED {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(AuthError::RegistrationRejected {
            detail: if body.is_empty() {
                status.to_string()
            } else {
                body
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;

    fn signed_name(identity: &Identity) -> Signed<String> {
        Signed::sign(identity.signer(), identity.name().to_string()).unwrap()
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let gateway = HttpGateway::new("http://localhost:8080/");
        assert_eq!(
            gateway.endpoint("/auth/challenge"),
            "http://localhost:8080/auth/challenge"
        );
    }

    #[tokio::test]
    async fn test_request_challenge_normalizes_json_scalar() {
        let mock = mockito::mock("POST", "/auth/challenge")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body("\"tok-1\"")
            .create();

        let identity = Identity::generate("alice", None).unwrap();
        let gateway = HttpGateway::new(mockito::server_url());
        let token = gateway
            .request_challenge(&signed_name(&identity))
            .await
            .unwrap();

        assert_eq!(token, "tok-1");
        mock.assert();
    }

    #[tokio::test]
    async fn test_submit_certificate_maps_statuses() {
        let identity = Identity::generate("bob", None).unwrap();
        let envelope = Signed::sign(identity.signer(), identity.certificate()).unwrap();
        let gateway = HttpGateway::new(mockito::server_url());

        let created = mockito::mock("POST", "/auth/register")
            .with_status(201)
            .create();
        gateway.submit_certificate(&envelope).await.unwrap();
        created.assert();
        drop(created);

        let rejected = mockito::mock("POST", "/auth/register")
            .with_status(409)
            .with_body("name already registered")
            .create();
        let err = gateway.submit_certificate(&envelope).await.unwrap_err();
        match err {
            AuthError::RegistrationRejected { detail } => {
                assert_eq!(detail, "name already registered");
            }
            other => panic!("unexpected error: {other}"),
        }
        rejected.assert();
    }
}
