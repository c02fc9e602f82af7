// src/identity/session.rs
//! Process-wide current-identity session state.
//!
//! Signing operations read the current identity from an explicit
//! [`Session`] handle injected by the caller, not from ambient global
//! state. `login` installs an identity, `logout` clears it; concurrent
//! signing operations share the identity read-only through an `Arc`.

use std::sync::{Arc, RwLock};

use crate::identity::Identity;

/// Shared handle to the process's current identity, if any.
///
/// Cloning the session clones the handle, not the identity; all clones
/// observe the same login state.
#[derive(Clone, Default)]
pub struct Session {
    current: Arc<RwLock<Option<Arc<Identity>>>>,
}

impl Session {
    /// Creates a session with no identity logged in.
    pub fn new() -> Self {
        Session::default()
    }

    /// Installs `identity` as the current identity, replacing any previous
    /// one.
    pub fn login(&self, identity: Identity) {
        *self.current.write().unwrap() = Some(Arc::new(identity));
    }

    /// Clears the current identity. In-flight signing operations holding an
    /// `Arc` from [`Session::current`] complete with the identity they
    /// started with; new operations observe the logged-out state.
    pub fn logout(&self) {
        *self.current.write().unwrap() = None;
    }

    /// The current identity, or `None` when logged out.
    pub fn current(&self) -> Option<Arc<Identity>> {
        self.current.read().unwrap().clone()
    }

    /// Whether an identity is currently logged in.
    pub fn is_authenticated(&self) -> bool {
        self.current.read().unwrap().is_some()
    }
}
