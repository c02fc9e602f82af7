// src/identity/mod.rs
//! Identity ownership: key pairs, signing capability, session state.

pub mod keys;
pub mod session;

pub use keys::{Identity, SigningCapability};
pub use session::Session;
