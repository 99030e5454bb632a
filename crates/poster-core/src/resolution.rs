//! # Resolution Check
//!
//! Does the uploaded image carry enough pixels to print the poster sharply?
//!
//! ```text
//! required_px = round(printable_mm × grid_count ÷ 25.4 × dpi)
//!
//!   3 × 2 grid of A4 at 6 mm margin:
//!     width  = 198 mm × 3 = 594 mm → 3508 px
//!     height = 285 mm × 2 = 570 mm → 3366 px
//! ```
//!
//! An image exactly at the required size is adequate.

use crate::types::{LayoutSettings, PageGeometry, ResolutionWarning};
use crate::units::MM_PER_INCH;

/// Compares the image against the pixel count the poster needs at the
/// page's DPI.
///
/// Returns `None` when the image is adequate, or when the margin leaves no
/// printable area (no meaningful requirement exists then).
pub fn compute_resolution_warning(
    settings: &LayoutSettings,
    page: &PageGeometry,
    image_width: u32,
    image_height: u32,
) -> Option<ResolutionWarning> {
    let margin_mm = settings.margin_mm();
    let printable_w = page.printable_width_mm(margin_mm);
    let printable_h = page.printable_height_mm(margin_mm);

    if !(printable_w > 0.0 && printable_h > 0.0) {
        tracing::debug!(margin_mm, "No printable area, skipping resolution check");
        return None;
    }

    let total_w_mm = printable_w * settings.grid_cols as f64;
    let total_h_mm = printable_h * settings.grid_rows as f64;

    let required_width = (total_w_mm / MM_PER_INCH * page.dpi).round() as u32;
    let required_height = (total_h_mm / MM_PER_INCH * page.dpi).round() as u32;

    if image_width < required_width || image_height < required_height {
        Some(ResolutionWarning {
            required_width,
            required_height,
            actual_width: image_width,
            actual_height: image_height,
        })
    } else {
        None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
