//! # Image Rasterizer
//!
//! The concrete [`Rasterizer`]: crop the source, resize, paste onto the page.
//!
//! ```text
//!  source (read-only)                page (mutable)
//! ┌──────────────────┐            ┌──────────────────────┐
//! │    ┌──────┐      │  crop_imm  │                      │
//! │    │ src  │──────┼──resize───►│   ┌──────────┐       │
//! │    └──────┘      │  overlay   │   │   dest   │       │
//! └──────────────────┘            │   └──────────┘       │
//!                                 └──────────────────────┘
//! ```
//!
//! Source rectangles are widened to whole pixels (floor/ceil) and clamped to
//! the bitmap. The destination grows by the same amount at the region's
//! scale, so every source pixel lands where the fractional mapping puts it,
//! and the result is clipped back to the rounded destination. Two tiles that
//! share a cut line therefore show the same content on both sides of it.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use poster_core::{Rasterizer, Rect};

use crate::error::RenderError;

/// Draws regions of `source` onto `page`.
pub struct ImageRasterizer<'a> {
    source: &'a RgbaImage,
    page: &'a mut RgbaImage,
}

impl<'a> ImageRasterizer<'a> {
    pub fn new(source: &'a RgbaImage, page: &'a mut RgbaImage) -> Self {
        Self { source, page }
    }
}

/// Source rectangle snapped outward to whole pixels, as (x, y, w, h).
fn pixel_source(source: &Rect, bounds: (u32, u32)) -> Option<(u32, u32, u32, u32)> {
    let x0 = source.x.floor().max(0.0) as u32;
    let y0 = source.y.floor().max(0.0) as u32;
    let x1 = (source.right().ceil().max(0.0) as u32).min(bounds.0);
    let y1 = (source.bottom().ceil().max(0.0) as u32).min(bounds.1);

    (x1 > x0 && y1 > y0).then(|| (x0, y0, x1 - x0, y1 - y0))
}

/// Destination rectangle with independently rounded edges, as (x, y, w, h).
fn pixel_dest(dest: &Rect) -> Option<(i64, i64, u32, u32)> {
    let x0 = dest.x.round() as i64;
    let y0 = dest.y.round() as i64;
    let x1 = dest.right().round() as i64;
    let y1 = dest.bottom().round() as i64;

    (x1 > x0 && y1 > y0).then(|| (x0, y0, (x1 - x0) as u32, (y1 - y0) as u32))
}

/// Destination of the snapped source, as (x0, y0, x1, y1) in page pixels.
///
/// Each edge moves outward by the amount the source edge was snapped,
/// multiplied by the region's scale on that axis.
fn grown_dest(
    source: &Rect,
    dest: &Rect,
    snapped: (u32, u32, u32, u32),
) -> (f64, f64, f64, f64) {
    let (sx, sy, sw, sh) = snapped;
    let kx = dest.width / source.width;
    let ky = dest.height / source.height;

    (
        dest.x - (source.x - sx as f64) * kx,
        dest.y - (source.y - sy as f64) * ky,
        dest.right() + ((sx + sw) as f64 - source.right()) * kx,
        dest.bottom() + ((sy + sh) as f64 - source.bottom()) * ky,
    )
}

impl Rasterizer for ImageRasterizer<'_> {
    type Error = RenderError;

    fn draw_region(&mut self, source: &Rect, dest: &Rect) -> Result<(), Self::Error> {
        let (Some(snapped), Some((dx, dy, dw, dh))) =
            (pixel_source(source, self.source.dimensions()), pixel_dest(dest))
        else {
            tracing::debug!(?source, ?dest, "Skipping sub-pixel region");
            return Ok(());
        };
        let (sx, sy, sw, sh) = snapped;

        let (gx0, gy0, gx1, gy1) = grown_dest(source, dest, snapped);
        let (gx0, gy0) = ((gx0.round() as i64).min(dx), (gy0.round() as i64).min(dy));
        let gw = (gx1.round() as i64).max(dx + dw as i64) - gx0;
        let gh = (gy1.round() as i64).max(dy + dh as i64) - gy0;

        let region = imageops::crop_imm(self.source, sx, sy, sw, sh).to_image();
        let scaled = if (sw as i64, sh as i64) == (gw, gh) {
            region
        } else {
            imageops::resize(&region, gw as u32, gh as u32, FilterType::Triangle)
        };

        let visible =
            imageops::crop_imm(&scaled, (dx - gx0) as u32, (dy - gy0) as u32, dw, dh).to_image();
        imageops::overlay(&mut *self.page, &visible, dx, dy);

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
