//! User (vendor) entity model and DTOs.

use contractly_core::error::CoreError;
use contractly_core::identity::Identity;
use contractly_core::types::{DbId, Timestamp};
use contractly_core::vendor::VendorType;
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub vendor_type: String,
    pub created_at: Timestamp,
}

impl User {
    pub fn vendor_type(&self) -> Result<VendorType, CoreError> {
        VendorType::parse(&self.vendor_type).ok_or_else(|| {
            CoreError::Internal(format!(
                "User {} has unknown vendor type '{}'",
                self.id, self.vendor_type
            ))
        })
    }

    pub fn identity(&self) -> Result<Identity, CoreError> {
        Ok(Identity {
            user_id: self.id,
            name: self.name.clone(),
            vendor_type: self.vendor_type()?,
        })
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub vendor_type: VendorType,
}

impl TryFrom<&User> for UserResponse {
    type Error = CoreError;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            vendor_type: user.vendor_type()?,
        })
    }
}

/// DTO for provisioning a user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub vendor_type: VendorType,
}
