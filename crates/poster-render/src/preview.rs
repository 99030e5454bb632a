//! # Preview Compositing
//!
//! Pastes rendered pages side by side into one canvas, using the offsets
//! from [`poster_core::compute_preview_layout`].

use image::imageops::{self, FilterType};
use image::RgbaImage;
use poster_core::{compute_preview_layout, TileSize};

use crate::error::RenderResult;
use crate::PAGE_BACKGROUND;

/// Composites `pages` (row-major) into one `cols × rows` preview.
///
/// Pages that differ from the first page's size are resized to match.
pub fn compose_preview(pages: &[RgbaImage], cols: u32, rows: u32) -> RenderResult<RgbaImage> {
    let sizes: Vec<TileSize> = pages
        .iter()
        .map(|p| TileSize::new(p.width(), p.height()))
        .collect();
    let layout = compute_preview_layout(&sizes, cols, rows)?;

    let mut canvas =
        RgbaImage::from_pixel(layout.canvas_width, layout.canvas_height, PAGE_BACKGROUND);

    for placement in &layout.placements {
        let page = &pages[placement.index];
        let (x, y) = (placement.x as i64, placement.y as i64);

        if page.dimensions() == (layout.tile_width, layout.tile_height) {
            imageops::overlay(&mut canvas, page, x, y);
        } else {
            let fitted = imageops::resize(
                page,
                layout.tile_width,
                layout.tile_height,
                FilterType::Triangle,
            );
            imageops::overlay(&mut canvas, &fitted, x, y);
        }
    }

    tracing::debug!(
        width = layout.canvas_width,
        height = layout.canvas_height,
        "Composed preview"
    );

    Ok(canvas)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use image::Rgba;
    use poster_core::CoreError;

    fn solid(w: u32, h: u32, v: u8) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([v, v, v, 255]))
    }

    #[test]
    fn test_pages_laid_out_row_major() {
        let pages: Vec<RgbaImage> = (0..6).map(|i| solid(10, 20, i * 10)).collect();
        let preview = compose_preview(&pages, 3, 2).unwrap();

        assert_eq!(preview.dimensions(), (30, 40));
        assert_eq!(preview.get_pixel(0, 0)[0], 0);
        assert_eq!(preview.get_pixel(25, 5)[0], 20);
        assert_eq!(preview.get_pixel(15, 25)[0], 40);
        assert_eq!(preview.get_pixel(29, 39)[0], 50);
    }

    #[test]
    fn test_odd_sized_page_resized_to_first() {
        let pages = vec![solid(10, 10, 0), solid(20, 20, 200)];
        let preview = compose_preview(&pages, 2, 1).unwrap();
        assert_eq!(preview.dimensions(), (20, 10));
        assert_eq!(preview.get_pixel(15, 5)[0], 200);
    }

    #[test]
    fn test_unfinished_page_not_ready() {
        let pages = vec![solid(10, 10, 0), RgbaImage::new(0, 0)];
        let err = compose_preview(&pages, 2, 1).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Core(CoreError::TileNotReady { index: 1, .. })
        ));
    }
}
