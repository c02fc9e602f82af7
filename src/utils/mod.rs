// src/utils/mod.rs
//! Helper modules: signature encoding and canonical serialization.

pub mod serialization;
pub mod signature;
