//! Signature capture.
//!
//! - [`surface`] -- RGBA raster that accumulates freehand strokes.
//! - [`pad`] -- Draw/type mode selection and the save step that emits a
//!   [`crate::signature::SignaturePayload`].
//!
//! Capture never touches storage; the caller hands the payload to the
//! lifecycle engine's sign operation.

pub mod pad;
pub mod surface;

pub use pad::{CaptureMode, SignaturePad, TypedPreview};
pub use surface::{Point, SignatureSurface, SurfaceSize};

/// Reasons a capture cannot produce a payload.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Please provide a signature before saving.")]
    EmptyDrawing,

    #[error("Please type your name to create a signature.")]
    EmptyTypedName,

    #[error("Surface of {css_width}x{css_height} CSS px is not drawable")]
    InvalidSize { css_width: f32, css_height: f32 },

    #[error("Failed to encode signature image: {0}")]
    Encode(#[from] image::ImageError),
}
