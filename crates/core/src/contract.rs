//! Contract lifecycle rules.
//!
//! Status moves strictly forward: `draft -> final -> signed`. Business fields
//! are only writable in `draft`. This module holds the pure rules; the engine
//! in the API crate applies them against the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amount::{Amount, AmountInput};
use crate::content::sanitize_html;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Status ID type matching SMALLINT in the `contract_statuses` lookup table.
pub type StatusId = i16;

/// Contract lifecycle status. Discriminants match the seed order of
/// `contract_statuses`.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Draft = 1,
    Final = 2,
    Signed = 3,
}

impl ContractStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Map a stored status ID back to the enum.
    pub fn from_id(id: StatusId) -> Result<Self, CoreError> {
        match id {
            1 => Ok(Self::Draft),
            2 => Ok(Self::Final),
            3 => Ok(Self::Signed),
            other => Err(CoreError::Internal(format!(
                "Unknown contract status id {other}"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Final => "final",
            Self::Signed => "signed",
        }
    }

    /// Statuses reachable from `self` in one step.
    ///
    /// - `draft`  -> `final`
    /// - `final`  -> `signed`
    /// - `signed` -> (none)
    pub fn valid_transitions(self) -> &'static [ContractStatus] {
        match self {
            Self::Draft => &[Self::Final],
            Self::Final => &[Self::Signed],
            Self::Signed => &[],
        }
    }

    /// Business fields may only change while the contract is a draft.
    pub fn ensure_editable(self) -> Result<(), CoreError> {
        match self {
            Self::Draft => Ok(()),
            _ => Err(CoreError::InvalidState(
                "Contract can only be edited while in draft".to_string(),
            )),
        }
    }

    /// Finalize is the sole `draft -> final` transition.
    pub fn ensure_can_finalize(self) -> Result<(), CoreError> {
        validate_transition(self, Self::Final).map_err(|_| {
            CoreError::InvalidState("Contract is already finalized".to_string())
        })
    }

    /// Sign is the sole `final -> signed` transition.
    ///
    /// An already-signed contract (or one with a signature row) reports
    /// [`CoreError::AlreadyExists`]; a draft reports
    /// [`CoreError::InvalidState`].
    pub fn ensure_can_sign(self, has_signature: bool) -> Result<(), CoreError> {
        if has_signature || self == Self::Signed {
            return Err(CoreError::AlreadyExists(
                "Contract is already signed".to_string(),
            ));
        }
        validate_transition(self, Self::Signed).map_err(|_| {
            CoreError::InvalidState("Contract must be finalized before signing".to_string())
        })
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate that a status transition from `current` to `next` is allowed.
pub fn validate_transition(current: ContractStatus, next: ContractStatus) -> Result<(), CoreError> {
    if current.valid_transitions().contains(&next) {
        Ok(())
    } else {
        Err(CoreError::InvalidState(format!(
            "Cannot move contract from '{current}' to '{next}'"
        )))
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

pub const MAX_CLIENT_NAME_LENGTH: usize = 200;
pub const MAX_VENUE_LENGTH: usize = 300;
pub const MAX_SERVICE_PACKAGE_LENGTH: usize = 500;
pub const MAX_CONTENT_LENGTH: usize = 200_000;

/// Event dates travel as ISO calendar dates.
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Contract fields as received on the wire. Everything is optional so that
/// missing fields can be reported together.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractInput {
    #[serde(default, alias = "clientName")]
    pub client_name: Option<String>,
    #[serde(default, alias = "eventDate")]
    pub event_date: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default, alias = "servicePackage")]
    pub service_package: Option<String>,
    #[serde(default)]
    pub amount: Option<AmountInput>,
    #[serde(default)]
    pub content: Option<String>,
    /// Create directly in `final` instead of `draft`. Ignored by update.
    #[serde(default)]
    pub finalize: bool,
}

/// Validated, normalised contract fields ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractFields {
    pub client_name: String,
    pub event_date: NaiveDate,
    pub venue: String,
    pub service_package: String,
    pub amount: Amount,
    pub content: String,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|s| s.trim().is_empty())
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters"
        )));
    }
    Ok(())
}

impl ContractInput {
    /// Names of required fields that are absent or blank, in wire order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.client_name) {
            missing.push("client_name");
        }
        if is_blank(&self.event_date) {
            missing.push("event_date");
        }
        if is_blank(&self.service_package) {
            missing.push("service_package");
        }
        if self.amount.as_ref().is_none_or(AmountInput::is_blank) {
            missing.push("amount");
        }
        missing
    }

    /// Validate required fields and normalise the rest.
    ///
    /// Venue and content default to empty strings. Content is sanitized here
    /// so every write path stores the same cleaned markup.
    pub fn validate(&self) -> Result<ContractFields, CoreError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Missing required contract details: {}",
                missing.join(", ")
            )));
        }

        let client_name = self.client_name.as_deref().unwrap_or_default().trim();
        let service_package = self.service_package.as_deref().unwrap_or_default().trim();
        let venue = self.venue.as_deref().unwrap_or_default().trim();
        let content = self.content.as_deref().unwrap_or_default();

        check_length("client_name", client_name, MAX_CLIENT_NAME_LENGTH)?;
        check_length("service_package", service_package, MAX_SERVICE_PACKAGE_LENGTH)?;
        check_length("venue", venue, MAX_VENUE_LENGTH)?;
        check_length("content", content, MAX_CONTENT_LENGTH)?;

        let raw_date = self.event_date.as_deref().unwrap_or_default().trim();
        let event_date = NaiveDate::parse_from_str(raw_date, EVENT_DATE_FORMAT).map_err(|_| {
            CoreError::Validation(format!(
                "event_date '{raw_date}' must be a valid date (YYYY-MM-DD)"
            ))
        })?;

        let amount = match &self.amount {
            Some(input) => input.parse()?,
            None => return Err(CoreError::Validation("Amount is required".to_string())),
        };

        Ok(ContractFields {
            client_name: client_name.to_string(),
            event_date,
            venue: venue.to_string(),
            service_package: service_package.to_string(),
            amount,
            content: sanitize_html(content),
        })
    }

    /// Initial status for a newly created contract.
    pub fn initial_status(&self) -> ContractStatus {
        if self.finalize {
            ContractStatus::Final
        } else {
            ContractStatus::Draft
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
