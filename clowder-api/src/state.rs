//! Application state shared across handlers

use axum::http::{header, HeaderMap};
use clowder_auth::{resolve, Identity};
use clowder_storage::{CatStorage, Storage, UserStorage};
use std::sync::Arc;

use crate::auth::TokenVerifier;

/// Shared application state
pub struct AppState {
    pub cat_storage: Arc<dyn CatStorage>,
    pub user_storage: Arc<dyn UserStorage>,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    /// Create with a storage backend and token verifier
    pub fn with_storage(storage: Arc<dyn Storage>, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            cat_storage: storage.clone(),
            user_storage: storage,
            verifier,
        }
    }

    /// Resolve the caller's identity from the request headers.
    ///
    /// Anything short of a verifiable bearer token with a well-formed
    /// subject is an anonymous caller; per-operation handling of anonymity
    /// is the policy engine's job.
    pub fn identity(&self, headers: &HeaderMap) -> Option<Identity> {
        let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let token = header.strip_prefix("Bearer ")?;
        let claims = self.verifier.verify(token)?;
        resolve(&claims)
    }
}
