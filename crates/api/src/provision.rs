//! Demo vendor provisioning.
//!
//! Inserts the fixed demo accounts, skipping any email that already exists.
//! Safe to run repeatedly; never invoked from a request path.

use contractly_core::vendor::VendorType;
use contractly_db::models::user::CreateUser;
use contractly_db::repositories::UserRepo;
use sqlx::PgPool;

use crate::auth::password::hash_password;

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "password123";

/// `(email, display name, vendor type)` for each demo vendor.
pub const DEMO_VENDORS: &[(&str, &str, VendorType)] = &[
    ("photographer@test.com", "John Smith", VendorType::Photographer),
    ("caterer@test.com", "Sarah Johnson", VendorType::Caterer),
    ("florist@test.com", "Mike Davis", VendorType::Florist),
];

/// Errors raised while provisioning.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Outcome of a provisioning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Insert any demo vendors that are not present yet.
pub async fn provision_demo_vendors(pool: &PgPool) -> Result<ProvisionReport, ProvisionError> {
    let mut report = ProvisionReport::default();

    for &(email, name, vendor_type) in DEMO_VENDORS {
        let password_hash =
            hash_password(DEMO_PASSWORD).map_err(|e| ProvisionError::Hash(e.to_string()))?;
        let input = CreateUser {
            email: email.to_string(),
            password_hash,
            name: name.to_string(),
            vendor_type,
        };

        if UserRepo::insert_if_absent(pool, &input).await? {
            tracing::info!(email, vendor_type = %vendor_type, "Provisioned demo vendor");
            report.inserted += 1;
        } else {
            tracing::debug!(email, "Demo vendor already present");
            report.skipped += 1;
        }
    }

    Ok(report)
}
