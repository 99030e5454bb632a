//! # Page Rendering
//!
//! One white page per tile, painted in three passes:
//!
//! ```text
//!   1. image region      ImageRasterizer via poster_core::draw_tile
//!   2. glue-tab hatch    45° lines every `hatch_spacing_px`, stripes only
//!   3. crop marks        dashed, red at 70% over paper
//! ```

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use poster_core::decorations::CROP_MARK_RGBA;
use poster_core::{draw_tile, Decorations, PosterLayout, TileDescriptor};

use crate::error::{RenderError, RenderResult};
use crate::rasterizer::ImageRasterizer;
use crate::{HATCH_COLOR, PAGE_BACKGROUND};

/// Renders every tile of `layout`, in row-major order.
///
/// `source` must be the decoded image the layout was computed for.
pub fn render_pages(source: &RgbaImage, layout: &PosterLayout) -> RenderResult<Vec<RgbaImage>> {
    let (actual_width, actual_height) = source.dimensions();
    if (actual_width, actual_height) != (layout.image.width, layout.image.height) {
        return Err(RenderError::SourceMismatch {
            expected_width: layout.image.width,
            expected_height: layout.image.height,
            actual_width,
            actual_height,
        });
    }

    let page_size = (layout.page_width_px, layout.page_height_px);
    tracing::info!(
        pages = layout.tiles.len(),
        width = page_size.0,
        height = page_size.1,
        "Rendering pages"
    );

    layout
        .tiles
        .iter()
        .map(|tile| render_page(source, tile, page_size))
        .collect()
}

/// Renders a single tile onto a fresh `page_size` page.
pub fn render_page(
    source: &RgbaImage,
    tile: &TileDescriptor,
    page_size: (u32, u32),
) -> RenderResult<RgbaImage> {
    let (width, height) = page_size;
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyPage { width, height });
    }

    let mut page = RgbaImage::from_pixel(width, height, PAGE_BACKGROUND);

    let drawn = draw_tile(tile, &mut ImageRasterizer::new(source, &mut page))?;
    if !tile.decorations.is_empty() {
        paint_hatch(&mut page, &tile.decorations);
        paint_crop_lines(&mut page, &tile.decorations);
    }

    tracing::debug!(
        tile = %tile.label(),
        blank = !drawn,
        stripes = tile.decorations.stripes.len(),
        crop_lines = tile.decorations.crop_lines.len(),
        "Rendered page"
    );

    Ok(page)
}

/// Crop mark colour composited over white paper.
pub fn crop_mark_color() -> Rgba<u8> {
    let [r, g, b, a] = CROP_MARK_RGBA;
    let over_white = |c: u8| {
        let (c, a) = (c as u32, a as u32);
        ((c * a + 255 * (255 - a) + 127) / 255) as u8
    };
    Rgba([over_white(r), over_white(g), over_white(b), 255])
}

/// Diagonal hatch inside each stripe.
fn paint_hatch(page: &mut RgbaImage, decorations: &Decorations) {
    let spacing = decorations.hatch_spacing_px.round().max(2.0) as u32;
    let (width, height) = page.dimensions();

    for stripe in &decorations.stripes {
        let x0 = stripe.x.round().max(0.0) as u32;
        let y0 = stripe.y.round().max(0.0) as u32;
        let x1 = (stripe.right().round().max(0.0) as u32).min(width);
        let y1 = (stripe.bottom().round().max(0.0) as u32).min(height);

        for y in y0..y1 {
            for x in x0..x1 {
                if (x + y) % spacing == 0 {
                    page.put_pixel(x, y, HATCH_COLOR);
                }
            }
        }
    }
}

/// Dashed crop lines: `dash_px` on, `dash_px` off.
fn paint_crop_lines(page: &mut RgbaImage, decorations: &Decorations) {
    let color = crop_mark_color();
    let dash = decorations.dash_px.max(1.0);

    for line in &decorations.crop_lines {
        let length = line.length();
        if length <= 0.0 {
            continue;
        }
        let (ux, uy) = ((line.x2 - line.x1) / length, (line.y2 - line.y1) / length);
        let at = |t: f64| ((line.x1 + ux * t) as f32, (line.y1 + uy * t) as f32);

        let mut t = 0.0;
        while t < length {
            let end = (t + dash).min(length);
            draw_line_segment_mut(page, at(t), at(end), color);
            t += 2.0 * dash;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use poster_core::{compute_poster, ImageDescriptor, LayoutSettings, PageGeometry};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    /// 2 × 3 inch page, 300 × 450 px at 150 DPI
    const SMALL_PAGE: PageGeometry = PageGeometry {
        width_mm: 50.8,
        height_mm: 76.2,
        dpi: 150.0,
    };

    fn two_page_layout() -> PosterLayout {
        let settings = LayoutSettings {
            grid_cols: 2,
            grid_rows: 1,
            ..LayoutSettings::default()
        };
        compute_poster(&settings, &SMALL_PAGE, ImageDescriptor::new(200, 100)).unwrap()
    }

    #[test]
    fn test_crop_mark_color_over_white() {
        assert_eq!(crop_mark_color(), Rgba([244, 124, 124, 255]));
    }

    #[test]
    fn test_render_pages_draws_image_and_letterbox() {
        let layout = two_page_layout();
        let source = RgbaImage::from_pixel(200, 100, RED);
        let pages = render_pages(&source, &layout).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].dimensions(), (300, 450));
        assert_eq!(*pages[0].get_pixel(100, 225), RED);
        // Letterbox band above the image stays paper white
        assert_eq!(*pages[0].get_pixel(100, 60), PAGE_BACKGROUND);
    }

    #[test]
    fn test_glue_tab_hatched() {
        let layout = two_page_layout();
        let source = RgbaImage::from_pixel(200, 100, RED);
        let pages = render_pages(&source, &layout).unwrap();

        // (270 + 36) is a multiple of the 18 px hatch spacing
        assert_eq!(*pages[0].get_pixel(270, 36), HATCH_COLOR);
        // The last column has no tab
        assert_ne!(*pages[1].get_pixel(270, 36), HATCH_COLOR);
    }

    #[test]
    fn test_crop_marks_on_interior_edge_only() {
        let layout = two_page_layout();
        let source = RgbaImage::from_pixel(200, 100, RED);
        let pages = render_pages(&source, &layout).unwrap();

        // Left-edge corner tick on the second page
        assert_eq!(*pages[1].get_pixel(35, 5), crop_mark_color());
        assert_eq!(*pages[0].get_pixel(35, 5), PAGE_BACKGROUND);
    }

    #[test]
    fn test_source_mismatch_rejected() {
        let layout = two_page_layout();
        let wrong = RgbaImage::from_pixel(20, 10, RED);
        assert!(matches!(
            render_pages(&wrong, &layout),
            Err(RenderError::SourceMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_page_rejected() {
        let layout = two_page_layout();
        let source = RgbaImage::from_pixel(200, 100, RED);
        assert!(matches!(
            render_page(&source, &layout.tiles[0], (0, 450)),
            Err(RenderError::EmptyPage { .. })
        ));
    }
}
