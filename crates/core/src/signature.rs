//! Signature payloads and their validation.
//!
//! A payload is either a drawn raster (an image data URL) or a typed name.
//! [`crate::capture`] produces payloads; the lifecycle engine validates and
//! attaches them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const MODE_DRAWN: &str = "drawn";
pub const MODE_TYPED: &str = "typed";

/// Drawn payloads must be embedded images.
pub const DRAWN_DATA_PREFIX: &str = "data:image/";

/// Upper bound on an encoded drawn signature (bytes of the data URL).
pub const MAX_DRAWN_DATA_LENGTH: usize = 2 * 1024 * 1024;

/// Upper bound on a typed signature (characters).
pub const MAX_TYPED_DATA_LENGTH: usize = 200;

/// The user-facing message for every malformed payload.
pub const INVALID_SIGNATURE_MESSAGE: &str = "Invalid signature data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureMode {
    Drawn,
    Typed,
}

impl SignatureMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drawn => MODE_DRAWN,
            Self::Typed => MODE_TYPED,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            MODE_DRAWN => Some(Self::Drawn),
            MODE_TYPED => Some(Self::Typed),
            _ => None,
        }
    }
}

impl std::fmt::Display for SignatureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A captured signature ready to be attached to a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignaturePayload {
    pub mode: SignatureMode,
    pub data: String,
}

impl SignaturePayload {
    /// Check the payload shape for its mode.
    pub fn validate(&self) -> Result<(), CoreError> {
        let invalid = || CoreError::Validation(INVALID_SIGNATURE_MESSAGE.to_string());
        if self.data.trim().is_empty() {
            return Err(invalid());
        }
        match self.mode {
            SignatureMode::Drawn => {
                if !self.data.starts_with(DRAWN_DATA_PREFIX)
                    || self.data.len() > MAX_DRAWN_DATA_LENGTH
                {
                    return Err(invalid());
                }
            }
            SignatureMode::Typed => {
                if self.data.chars().count() > MAX_TYPED_DATA_LENGTH {
                    return Err(invalid());
                }
            }
        }
        Ok(())
    }
}

/// Signature as received on the wire.
///
/// `type` is accepted as an alias of `mode` for older clients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignatureInput {
    #[serde(default, alias = "type")]
    pub mode: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

impl SignatureInput {
    /// Parse and validate into a [`SignaturePayload`].
    pub fn into_payload(self) -> Result<SignaturePayload, CoreError> {
        let mode = self
            .mode
            .as_deref()
            .and_then(SignatureMode::parse)
            .ok_or_else(|| CoreError::Validation(INVALID_SIGNATURE_MESSAGE.to_string()))?;
        let payload = SignaturePayload {
            mode,
            data: self.data.unwrap_or_default(),
        };
        payload.validate()?;
        Ok(payload)
    }
}
