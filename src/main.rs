// src/main.rs
//! # Identity & Signed-Request Client - Demo Entry Point
//!
//! Small end-to-end driver for the library: registers a fresh identity
//! with the configured backend, logs it into a session, then sends one
//! challenge-signed request through the same gateway.
//!
//! ## Environment Variables
//! - `BACKEND_URL`: Base URL of the auth backend (default: http://localhost:8080)
//! - `IDENTITY_NAME`: Display name to register (default: alice)
//! - `IDENTITY_CONTACT`: (Optional) contact address for the certificate
//! - `RUST_LOG`: env_logger filter (e.g. `signet_auth=debug`)

use anyhow::Context;
use dotenv::dotenv;

use signet_auth::{register, sign_request, HttpGateway, RegistrationPolicy, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();
    env_logger::init();

    let backend_url =
        std::env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let name = std::env::var("IDENTITY_NAME").unwrap_or_else(|_| "alice".to_string());
    let contact = std::env::var("IDENTITY_CONTACT").ok();

    let gateway = HttpGateway::new(backend_url);

    // Register a fresh identity and install it as the session identity.
    let identity = register(&gateway, RegistrationPolicy::Strict, &name, contact.as_deref())
        .await
        .context("registration failed")?;
    println!("registered '{}'", identity.name());
    println!("{}", identity.public_key_pem());

    let session = Session::new();
    session.login(identity);

    // Send one challenge-signed request end to end.
    let signed = sign_request(&session, &gateway, "apples".to_string())
        .await
        .context("challenge-signed request failed")?;
    println!(
        "signed request as '{}' with challenge '{}'",
        signed.data().user,
        signed.data().challenge
    );
    println!("signature: {}", signed.signature());

    Ok(())
}
