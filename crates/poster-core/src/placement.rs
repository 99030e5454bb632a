//! # Grid Placement
//!
//! Fits the image inside the combined printable area of the whole grid
//! ("contain": aspect ratio preserved, centred along the slack axis).
//!
//! ```text
//!  wide image in a square grid          tall image in a square grid
//! ┌────────────────────────┐          ┌──────┬──────────┬──────┐
//! │        slack           │          │      │          │      │
//! ├────────────────────────┤          │slack │  image   │slack │
//! │         image          │          │      │          │      │
//! ├────────────────────────┤          │      │          │      │
//! │        slack           │          │      │          │      │
//! └────────────────────────┘          └──────┴──────────┴──────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::{ImageDescriptor, PlacementRect};

/// Places an image of `image_width × image_height` pixels inside a
/// `total_width × total_height` pixel grid.
///
/// A zero-sized image has no aspect ratio and is rejected. A grid with no
/// printable area yields an all-zero placement.
///
/// ```rust
/// use poster_core::compute_grid_placement;
///
/// let p = compute_grid_placement(200, 100, 100.0, 100.0).unwrap();
/// assert_eq!((p.scaled_width, p.scaled_height), (100.0, 50.0));
/// assert_eq!((p.offset_x, p.offset_y), (0.0, 25.0));
/// ```
pub fn compute_grid_placement(
    image_width: u32,
    image_height: u32,
    total_width: f64,
    total_height: f64,
) -> CoreResult<PlacementRect> {
    if ImageDescriptor::new(image_width, image_height).is_degenerate() {
        return Err(CoreError::DegenerateImage {
            width: image_width,
            height: image_height,
        });
    }

    if !(total_width > 0.0 && total_height > 0.0) {
        tracing::debug!(total_width, total_height, "Grid has no printable area");
        return Ok(PlacementRect::default());
    }

    let image_aspect = image_width as f64 / image_height as f64;
    let total_aspect = total_width / total_height;

    let placement = if image_aspect > total_aspect {
        // Wider than the grid: fill the width, letterbox vertically
        let scaled_height = total_width / image_aspect;
        PlacementRect {
            scaled_width: total_width,
            scaled_height,
            offset_x: 0.0,
            offset_y: (total_height - scaled_height) / 2.0,
        }
    } else {
        let scaled_width = total_height * image_aspect;
        PlacementRect {
            scaled_width,
            scaled_height: total_height,
            offset_x: (total_width - scaled_width) / 2.0,
            offset_y: 0.0,
        }
    };

    Ok(placement)
}

// =============================================================================
// Unit Tests
// =============================================================================
