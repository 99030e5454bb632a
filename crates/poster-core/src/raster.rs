//! # Rasterizer Seam
//!
//! The core never touches pixels. A caller supplies something that can
//! "sample this source rectangle and draw it scaled into that destination
//! rectangle", and [`draw_tile`] drives it.
//!
//! ```text
//!   poster-core                         poster-render
//!  ┌──────────────┐  draw_region(src,dst)  ┌──────────────────┐
//!  │ TileDescriptor├──────────────────────►│ ImageRasterizer  │
//!  └──────────────┘                        └──────────────────┘
//! ```

use crate::types::{Rect, TileDescriptor};

/// Something that can copy a scaled region of the source image onto a page.
pub trait Rasterizer {
    type Error;

    /// Samples `source` (source-image pixels) and draws it scaled into
    /// `dest` (page pixels).
    fn draw_region(&mut self, source: &Rect, dest: &Rect) -> Result<(), Self::Error>;
}

/// Draws the image content of one tile.
///
/// Returns `Ok(false)` without calling the rasterizer when the tile is blank.
pub fn draw_tile<R: Rasterizer>(tile: &TileDescriptor, rasterizer: &mut R) -> Result<bool, R::Error> {
    match (&tile.source_rect, &tile.dest_rect) {
        (Some(source), Some(dest)) => {
            rasterizer.draw_region(source, dest)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::compute_tile_layout;
    use crate::types::{LayoutSettings, PageGeometry};

    #[derive(Default)]
    struct RecordingRasterizer {
        calls: Vec<(Rect, Rect)>,
    }

    impl Rasterizer for RecordingRasterizer {
        type Error = std::convert::Infallible;

        fn draw_region(&mut self, source: &Rect, dest: &Rect) -> Result<(), Self::Error> {
            self.calls.push((*source, *dest));
            Ok(())
        }
    }

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        type Error = String;

        fn draw_region(&mut self, _source: &Rect, _dest: &Rect) -> Result<(), Self::Error> {
            Err("surface lost".to_string())
        }
    }

    #[test]
    fn test_draw_tile_forwards_rects() {
        let tiles = compute_tile_layout(
            &LayoutSettings::default(),
            &PageGeometry::A4,
            3000,
            2000,
        )
        .unwrap();

        let mut raster = RecordingRasterizer::default();
        for tile in &tiles {
            assert!(draw_tile(tile, &mut raster).unwrap());
        }

        assert_eq!(raster.calls.len(), 6);
        assert_eq!(raster.calls[0].0, tiles[0].source_rect.unwrap());
        assert_eq!(raster.calls[0].1, tiles[0].dest_rect.unwrap());
    }

    #[test]
    fn test_blank_tile_skips_rasterizer() {
        let settings = LayoutSettings {
            grid_cols: 4,
            grid_rows: 1,
            ..LayoutSettings::default()
        };
        let tiles = compute_tile_layout(&settings, &PageGeometry::A4, 100, 1000).unwrap();

        let mut raster = FailingRasterizer;
        assert_eq!(draw_tile(&tiles[0], &mut raster), Ok(false));
        assert_eq!(
            draw_tile(&tiles[1], &mut raster),
            Err("surface lost".to_string())
        );
    }
}
