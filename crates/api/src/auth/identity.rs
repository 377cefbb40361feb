//! Token-backed [`IdentityCheck`].

use async_trait::async_trait;
use contractly_core::identity::{Identity, IdentityCheck};
use contractly_core::vendor::VendorType;

use crate::auth::jwt::{validate_token, JwtConfig};

/// Resolves identities from signed session tokens alone.
pub struct JwtIdentityCheck {
    config: JwtConfig,
}

impl JwtIdentityCheck {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl IdentityCheck for JwtIdentityCheck {
    async fn resolve(&self, credential: &str) -> Option<Identity> {
        let claims = match validate_token(credential, &self.config) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                return None;
            }
        };
        let vendor_type = VendorType::parse(&claims.vendor_type)?;
        Some(Identity {
            user_id: claims.sub,
            name: claims.name,
            vendor_type,
        })
    }
}
