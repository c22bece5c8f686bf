//! Caller identity resolution
//!
//! Every upload key embeds the id of the user it belongs to. Authentication is
//! not implemented yet, so the default resolver attributes every request to a
//! single placeholder user. A real resolver (JWT, session cookie) plugs in
//! behind [`IdentityResolver`] without touching key construction.

use async_trait::async_trait;
use axum::http::HeaderMap;
use thiserror::Error;

/// User id every request is attributed to until authentication exists
pub const PLACEHOLDER_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Errors raised while identifying the caller
#[derive(Error, Debug)]
pub enum IdentityError {
    /// The request carried no usable credentials
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),
}

/// Resolves the user a request acts on behalf of
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Returns the user id for the request with the given headers
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if the caller cannot be identified
    async fn resolve(&self, headers: &HeaderMap) -> Result<String, IdentityError>;
}

/// Resolver that returns the same user id for every request
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user_id: String,
}

impl StaticIdentity {
    /// Creates a resolver answering with `user_id`
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl Default for StaticIdentity {
    fn default() -> Self {
        Self::new(PLACEHOLDER_USER_ID)
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentity {
    async fn resolve(&self, _headers: &HeaderMap) -> Result<String, IdentityError> {
        Ok(self.user_id.clone())
    }
}
