// src/protocol/mod.rs
//! Client-side auth protocol flows: registration and challenge-response
//! request signing.

pub mod challenge;
pub mod registration;

pub use challenge::{sign_request, sign_request_as};
pub use registration::{register, RegistrationPolicy};
