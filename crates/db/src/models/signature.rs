//! Signature entity model.

use contractly_core::error::CoreError;
use contractly_core::signature::SignatureMode;
use contractly_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `signatures` table.
#[derive(Debug, Clone, FromRow)]
pub struct Signature {
    pub id: DbId,
    pub contract_id: DbId,
    pub mode: String,
    pub data: String,
    pub captured_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignatureResponse {
    pub id: DbId,
    pub contract_id: DbId,
    pub mode: SignatureMode,
    pub data: String,
    pub captured_at: Timestamp,
}

impl TryFrom<Signature> for SignatureResponse {
    type Error = CoreError;

    fn try_from(row: Signature) -> Result<Self, Self::Error> {
        let mode = SignatureMode::parse(&row.mode).ok_or_else(|| {
            CoreError::Internal(format!(
                "Signature {} has unknown mode '{}'",
                row.id, row.mode
            ))
        })?;
        Ok(Self {
            id: row.id,
            contract_id: row.contract_id,
            mode,
            data: row.data,
            captured_at: row.captured_at,
        })
    }
}
