//! Identity seam between the session layer and the lifecycle core.
//!
//! The core never assumes a credential format. Anything that can turn an
//! opaque credential into an [`Identity`] (signed token, server-side session
//! table) satisfies it.

use async_trait::async_trait;
use serde::Serialize;

use crate::types::DbId;
use crate::vendor::VendorType;

/// The authenticated vendor behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: DbId,
    pub name: String,
    pub vendor_type: VendorType,
}

/// Resolve a session credential into an [`Identity`].
///
/// Returns `None` for any credential that does not resolve (malformed,
/// expired, forged, revoked); callers treat all of them as unauthenticated.
#[async_trait]
pub trait IdentityCheck: Send + Sync {
    async fn resolve(&self, credential: &str) -> Option<Identity>;
}
