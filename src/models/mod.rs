// src/models/mod.rs
//! Wire data structures exchanged with the backend.

pub mod certificate;
pub mod envelope;

pub use certificate::Certificate;
pub use envelope::{By, Signed};
