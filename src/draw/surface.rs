//! DPR-aware pixel buffer backed by a Cairo image surface.
//!
//! The surface has two sizes: the logical size in CSS pixels, which is the
//! coordinate space of every input event, and the physical size in device
//! pixels (`floor(logical * scale)`). Contexts handed out by [`Surface::context`]
//! are pre-scaled so callers always draw in logical coordinates.

use super::color::Color;
use cairo::{Context, Format, ImageSurface};
use std::io::Write;
use thiserror::Error;

/// Errors raised while creating or manipulating a [`Surface`].
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface size {width}x{height} does not fit a Cairo image")]
    InvalidSize { width: u32, height: u32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("pixel buffer is not exclusively owned: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error(
        "snapshot is {snapshot_width}x{snapshot_height} but the surface is {width}x{height}"
    )]
    SnapshotMismatch {
        snapshot_width: i32,
        snapshot_height: i32,
        width: i32,
        height: i32,
    },

    #[error("failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),
}

/// One pixel as stored by Cairo (premultiplied ARGB).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    fn from_argb32(value: u32) -> Self {
        Self {
            a: (value >> 24) as u8,
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Converts an opaque color to the byte values Cairo stores for it.
    pub fn from_color(color: Color) -> Self {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let a = color.a.clamp(0.0, 1.0);
        Self {
            r: byte(color.r * a),
            g: byte(color.g * a),
            b: byte(color.b * a),
            a: byte(a),
        }
    }
}

/// Immutable copy of the whole physical buffer.
///
/// Taken at the start of a shape gesture and restored before every preview.
#[derive(Clone)]
pub struct Snapshot {
    data: Box<[u8]>,
    width: i32,
    height: i32,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// The drawing surface owned by the controller.
pub struct Surface {
    image: ImageSurface,
    logical_width: u32,
    logical_height: u32,
    scale: f64,
    background: Color,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("logical", &self.logical_size())
            .field("physical", &self.physical_size())
            .field("scale", &self.scale)
            .finish()
    }
}

/// Replaces a non-finite or non-positive device pixel ratio with 1.
pub fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Physical buffer dimensions for a logical size at `scale`.
pub fn physical_dimensions(
    logical_width: u32,
    logical_height: u32,
    scale: f64,
) -> Result<(i32, i32), SurfaceError> {
    let scale = sanitize_scale(scale);
    let to_physical = |logical: u32| {
        let physical = (f64::from(logical) * scale).floor();
        if physical <= f64::from(i32::MAX) {
            Some(physical as i32)
        } else {
            None
        }
    };

    match (to_physical(logical_width), to_physical(logical_height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(SurfaceError::InvalidSize {
            width: logical_width,
            height: logical_height,
        }),
    }
}

impl Surface {
    /// Creates a surface and fills it with `background`.
    pub fn new(
        logical_width: u32,
        logical_height: u32,
        scale: f64,
        background: Color,
    ) -> Result<Self, SurfaceError> {
        let scale = sanitize_scale(scale);
        let (width, height) = physical_dimensions(logical_width, logical_height, scale)?;
        let image = ImageSurface::create(Format::ARgb32, width, height)?;

        let mut surface = Self {
            image,
            logical_width,
            logical_height,
            scale,
            background,
        };
        surface.fill_background()?;

        log::debug!(
            "Created surface {}x{} (physical {}x{}, scale {})",
            logical_width,
            logical_height,
            width,
            height,
            scale
        );
        Ok(surface)
    }

    pub fn logical_size(&self) -> (u32, u32) {
        (self.logical_width, self.logical_height)
    }

    pub fn physical_size(&self) -> (i32, i32) {
        (self.image.width(), self.image.height())
    }

    /// Device pixel ratio applied to every context.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Returns a drawing context scaled to logical coordinates.
    ///
    /// The context must be dropped before the pixel data is accessed again
    /// (snapshot, restore, pixel reads), otherwise those calls fail with
    /// [`SurfaceError::Borrow`].
    pub fn context(&self) -> Result<Context, SurfaceError> {
        let ctx = Context::new(&self.image)?;
        ctx.scale(self.scale, self.scale);
        Ok(ctx)
    }

    /// Wipes the buffer and refills it with the background color.
    pub fn fill_background(&mut self) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Source);
        self.background.apply_source(&ctx);
        ctx.paint()?;
        Ok(())
    }

    /// Copies the full physical buffer.
    pub fn snapshot(&mut self) -> Result<Snapshot, SurfaceError> {
        let width = self.image.width();
        let height = self.image.height();
        let data = self.image.data()?;
        Ok(Snapshot {
            data: data.to_vec().into_boxed_slice(),
            width,
            height,
        })
    }

    /// Overwrites the buffer with a snapshot taken from this surface.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SurfaceError> {
        let width = self.image.width();
        let height = self.image.height();
        if snapshot.width != width || snapshot.height != height {
            return Err(SurfaceError::SnapshotMismatch {
                snapshot_width: snapshot.width,
                snapshot_height: snapshot.height,
                width,
                height,
            });
        }

        let mut data = self.image.data()?;
        data.copy_from_slice(&snapshot.data);
        Ok(())
    }

    /// Reads one pixel in physical coordinates.
    pub fn pixel(&mut self, x: i32, y: i32) -> Option<Rgba> {
        if x < 0 || y < 0 || x >= self.image.width() || y >= self.image.height() {
            return None;
        }

        let stride = usize::try_from(self.image.stride()).ok()?;
        let offset = usize::try_from(y).ok()? * stride + usize::try_from(x).ok()? * 4;
        let data = self.image.data().ok()?;
        let bytes: [u8; 4] = data.get(offset..offset + 4)?.try_into().ok()?;
        Some(Rgba::from_argb32(u32::from_ne_bytes(bytes)))
    }

    /// Reads the physical pixel under a logical position.
    pub fn pixel_at_logical(&mut self, x: f64, y: f64) -> Option<Rgba> {
        let px = (x * self.scale).floor();
        let py = (y * self.scale).floor();
        if !px.is_finite() || !py.is_finite() {
            return None;
        }
        self.pixel(px as i32, py as i32)
    }

    /// Encodes the physical buffer as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> Result<(), SurfaceError> {
        self.image.write_to_png(writer)?;
        Ok(())
    }
}
