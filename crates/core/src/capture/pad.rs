//! Draw/type signature pad.

use super::surface::{SignatureSurface, SurfaceSize};
use super::CaptureError;
use crate::signature::{SignatureMode, SignaturePayload};

/// Shown in the typed preview while nothing has been typed.
pub const TYPED_PLACEHOLDER: &str = "Your Signature";

/// Font family used to render typed signatures.
pub const TYPED_FONT_FAMILY: &str = "cursive";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Draw,
    Type,
}

/// How a typed signature should be rendered. Presentation only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedPreview {
    pub text: String,
    pub font_family: &'static str,
    pub is_placeholder: bool,
}

/// A signature pad with exactly one active capture mode.
#[derive(Debug, Clone)]
pub struct SignaturePad {
    mode: CaptureMode,
    surface: SignatureSurface,
    typed: String,
}

impl SignaturePad {
    /// New pad in draw mode with a surface for the given container.
    pub fn new(size: SurfaceSize) -> Result<Self, CaptureError> {
        Ok(Self {
            mode: CaptureMode::Draw,
            surface: SignatureSurface::new(size)?,
            typed: String::new(),
        })
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Switch modes. Input held by the mode being left is discarded.
    pub fn select_mode(&mut self, mode: CaptureMode) {
        if mode == self.mode {
            return;
        }
        match self.mode {
            CaptureMode::Draw => self.surface.clear(),
            CaptureMode::Type => self.typed.clear(),
        }
        self.mode = mode;
    }

    pub fn surface(&self) -> &SignatureSurface {
        &self.surface
    }

    /// The drawing surface, only while in draw mode.
    pub fn surface_mut(&mut self) -> Option<&mut SignatureSurface> {
        match self.mode {
            CaptureMode::Draw => Some(&mut self.surface),
            CaptureMode::Type => None,
        }
    }

    /// Replace the typed text. Ignored outside type mode.
    pub fn type_name(&mut self, text: impl Into<String>) {
        if self.mode == CaptureMode::Type {
            self.typed = text.into();
        }
    }

    pub fn typed_text(&self) -> &str {
        &self.typed
    }

    pub fn preview(&self) -> TypedPreview {
        let is_placeholder = self.typed.is_empty();
        TypedPreview {
            text: if is_placeholder {
                TYPED_PLACEHOLDER.to_string()
            } else {
                self.typed.clone()
            },
            font_family: TYPED_FONT_FAMILY,
            is_placeholder,
        }
    }

    /// Clear the active mode's input.
    pub fn clear(&mut self) {
        match self.mode {
            CaptureMode::Draw => self.surface.clear(),
            CaptureMode::Type => self.typed.clear(),
        }
    }

    /// Produce the payload for the active mode.
    pub fn save(&self) -> Result<SignaturePayload, CaptureError> {
        match self.mode {
            CaptureMode::Draw => {
                if self.surface.is_blank() {
                    return Err(CaptureError::EmptyDrawing);
                }
                Ok(SignaturePayload {
                    mode: SignatureMode::Drawn,
                    data: self.surface.to_data_url()?,
                })
            }
            CaptureMode::Type => {
                if self.typed.trim().is_empty() {
                    return Err(CaptureError::EmptyTypedName);
                }
                Ok(SignaturePayload {
                    mode: SignatureMode::Typed,
                    data: self.typed.clone(),
                })
            }
        }
    }
}
