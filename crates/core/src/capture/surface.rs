//! Freehand drawing surface.
//!
//! The raster is sized to the container's CSS size times the device pixel
//! ratio. Pointer coordinates arrive in CSS pixels and are scaled, so a
//! stroke covers the same visual width at any density.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, Rgba, RgbaImage};

use super::CaptureError;

/// Stroke width in CSS pixels.
pub const STROKE_WIDTH: f32 = 3.0;

/// Prefix of every encoded drawn signature.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Largest raster edge accepted, in device pixels.
pub const MAX_RASTER_EDGE: u32 = 4096;

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Container size in CSS pixels plus the display's pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub css_width: f32,
    pub css_height: f32,
    pub device_pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn new(css_width: f32, css_height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            css_width,
            css_height,
            device_pixel_ratio,
        }
    }

    /// Effective pixel ratio; unusable ratios fall back to 1.
    pub fn scale(&self) -> f32 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        }
    }

    fn raster_dimensions(&self) -> Result<(u32, u32), CaptureError> {
        let scale = self.scale();
        let width = (self.css_width * scale).round();
        let height = (self.css_height * scale).round();
        let edge = MAX_RASTER_EDGE as f32;
        if !(width >= 1.0 && height >= 1.0 && width <= edge && height <= edge) {
            return Err(CaptureError::InvalidSize {
                css_width: self.css_width,
                css_height: self.css_height,
            });
        }
        Ok((width as u32, height as u32))
    }
}

/// A point in CSS pixels relative to the surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Raster surface that records pointer strokes.
///
/// `pointer_down -> pointer_move* -> pointer_up` is one stroke; strokes are
/// painted in call order.
#[derive(Debug, Clone)]
pub struct SignatureSurface {
    raster: RgbaImage,
    size: SurfaceSize,
    /// Last stroke point in device pixels while a stroke is active.
    pen: Option<Point>,
}

impl SignatureSurface {
    pub fn new(size: SurfaceSize) -> Result<Self, CaptureError> {
        let (width, height) = size.raster_dimensions()?;
        Ok(Self {
            raster: RgbaImage::new(width, height),
            size,
            pen: None,
        })
    }

    /// Re-prepare for a new container size. The drawing is discarded.
    pub fn resize(&mut self, size: SurfaceSize) -> Result<(), CaptureError> {
        *self = Self::new(size)?;
        Ok(())
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Raster dimensions in device pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.raster.dimensions()
    }

    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    pub fn is_drawing(&self) -> bool {
        self.pen.is_some()
    }

    pub fn pointer_down(&mut self, at: Point) {
        self.pen = Some(self.to_device(at));
    }

    /// Extend the active stroke. Ignored when no stroke is active.
    pub fn pointer_move(&mut self, at: Point) {
        let Some(from) = self.pen else {
            return;
        };
        let to = self.to_device(at);
        self.paint_segment(from, to);
        self.pen = Some(to);
    }

    /// End the active stroke (pointer released or left the surface).
    pub fn pointer_up(&mut self) {
        self.pen = None;
    }

    /// Wipe the raster back to fully transparent.
    pub fn clear(&mut self) {
        let (width, height) = self.raster.dimensions();
        self.raster = RgbaImage::new(width, height);
        self.pen = None;
    }

    /// Whether the raster is pixel-identical to a freshly cleared one.
    pub fn is_blank(&self) -> bool {
        let (width, height) = self.raster.dimensions();
        let blank = RgbaImage::new(width, height);
        self.raster.as_raw() == blank.as_raw()
    }

    /// Encode the raster as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, CaptureError> {
        let mut bytes = Vec::new();
        self.raster
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Encode the raster as a `data:image/png;base64,...` URL.
    pub fn to_data_url(&self) -> Result<String, CaptureError> {
        let png = self.encode_png()?;
        Ok(format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png)))
    }

    fn to_device(&self, at: Point) -> Point {
        let scale = self.size.scale();
        Point::new(at.x * scale, at.y * scale)
    }

    /// Paint a round-capped segment: every pixel whose centre lies within
    /// half the stroke width of the segment is inked.
    fn paint_segment(&mut self, from: Point, to: Point) {
        let radius = STROKE_WIDTH * self.size.scale() / 2.0;
        let (width, height) = self.raster.dimensions();

        let min_x = (from.x.min(to.x) - radius).floor().max(0.0) as i64;
        let min_y = (from.y.min(to.y) - radius).floor().max(0.0) as i64;
        let max_x = ((from.x.max(to.x) + radius).ceil() as i64).min(i64::from(width) - 1);
        let max_y = ((from.y.max(to.y) + radius).ceil() as i64).min(i64::from(height) - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let centre = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_to_segment(centre, from, to) <= radius {
                    self.raster.put_pixel(x as u32, y as u32, INK);
                }
            }
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}
