//! # Tile Geometry
//!
//! Splits the placed image into one source/destination rectangle pair per
//! printed page.
//!
//! ## Grid Space vs Page Space
//! ```text
//!  grid space (whole poster)                 page space (tile 0,0)
//! ┌────────────┬────────────┬─────┐         ┌──────────────────────┐
//! │ tile 0,0   ░ tile 0,1   ░     │         │ margin               │
//! │            ░            ░     │         │  ┌─────────────┬──┐  │
//! │   ┌────────░────────────░───┐ │  ───►   │  │  dest rect  │░░│  │
//! │   │ image  ░            ░   │ │         │  │  (printable)│░░│  │
//! ├───┼────────┼────────────┼───┼─┤         │  └─────────────┴──┘  │
//! │   └────────────────────────-┘ │         │            ▲ glue tab│
//! └────────────┴────────────┴─────┘         └──────────────────────┘
//!      ░ = overlap strip, duplicated into the tile on its left
//! ```
//!
//! Each tile's box is extended into its **own** trailing margin by the
//! overlap width, then clipped to the placement. The clipped region maps
//! back to source pixels through one scale factor and is clamped to the
//! image bounds, so no tile ever samples outside the source.

use crate::decorations::compute_decorations;
use crate::error::CoreResult;
use crate::placement::compute_grid_placement;
use crate::types::{
    Decorations, LayoutSettings, PageGeometry, PlacementRect, Rect, TileDescriptor,
};
use crate::units::mm_to_px_at;

/// Pixel measurements shared by every tile of one layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub margin_px: f64,
    pub tile_width_px: f64,
    pub tile_height_px: f64,
    pub overlap_px: f64,
    pub page_width_px: f64,
    pub page_height_px: f64,
}

impl GridMetrics {
    /// Derives the per-tile pixel sizes from settings and page geometry.
    ///
    /// Printable sizes are clamped at zero when the margin eats the page.
    pub fn new(settings: &LayoutSettings, page: &PageGeometry) -> Self {
        let margin_mm = settings.margin_mm();
        let to_px = |mm: f64| mm_to_px_at(mm, page.dpi);

        Self {
            margin_px: to_px(margin_mm),
            tile_width_px: to_px(page.printable_width_mm(margin_mm).max(0.0)),
            tile_height_px: to_px(page.printable_height_mm(margin_mm).max(0.0)),
            overlap_px: to_px(settings.overlap_mm()),
            page_width_px: page.width_px(),
            page_height_px: page.height_px(),
        }
    }

    /// Size of the whole printable grid in pixels.
    pub fn total_size(&self, cols: u32, rows: u32) -> (f64, f64) {
        (
            self.tile_width_px * cols as f64,
            self.tile_height_px * rows as f64,
        )
    }
}

/// Computes one [`TileDescriptor`] per grid cell, in row-major order.
///
/// ## Caller Contract
/// `grid_cols` and `grid_rows` must be ≥ 1. Validation happens in
/// [`crate::validation`], not here.
///
/// ## Errors
/// [`crate::CoreError::DegenerateImage`] when either image dimension is zero.
pub fn compute_tile_layout(
    settings: &LayoutSettings,
    page: &PageGeometry,
    image_width: u32,
    image_height: u32,
) -> CoreResult<Vec<TileDescriptor>> {
    debug_assert!(settings.grid_cols >= 1, "grid_cols must be at least 1");
    debug_assert!(settings.grid_rows >= 1, "grid_rows must be at least 1");

    let metrics = GridMetrics::new(settings, page);
    let (total_w, total_h) = metrics.total_size(settings.grid_cols, settings.grid_rows);
    let placement = compute_grid_placement(image_width, image_height, total_w, total_h)?;

    let mut tiles = Vec::with_capacity(settings.tile_count());
    for row in 0..settings.grid_rows {
        for col in 0..settings.grid_cols {
            let mut tile = build_tile(
                settings,
                &metrics,
                &placement,
                (image_width, image_height),
                row,
                col,
            );
            tile.decorations = compute_decorations(&tile, settings, page);
            tiles.push(tile);
        }
    }

    tracing::debug!(
        cols = settings.grid_cols,
        rows = settings.grid_rows,
        blank = tiles.iter().filter(|t| t.is_blank()).count(),
        "Computed tile layout"
    );

    Ok(tiles)
}

/// Geometry of a single tile, without decorations.
fn build_tile(
    settings: &LayoutSettings,
    metrics: &GridMetrics,
    placement: &PlacementRect,
    image_size: (u32, u32),
    row: u32,
    col: u32,
) -> TileDescriptor {
    let has_right_tab = settings.add_overlap && col + 1 < settings.grid_cols;
    let has_bottom_tab = settings.add_overlap && row + 1 < settings.grid_rows;

    let tile_x = col as f64 * metrics.tile_width_px;
    let tile_y = row as f64 * metrics.tile_height_px;
    let extended = Rect::new(
        tile_x,
        tile_y,
        metrics.tile_width_px + if has_right_tab { metrics.overlap_px } else { 0.0 },
        metrics.tile_height_px + if has_bottom_tab { metrics.overlap_px } else { 0.0 },
    );

    let (source_rect, dest_rect) = match extended.intersect(&placement.as_rect()) {
        Some(visible) => {
            let source = map_to_source(&visible, placement, image_size);
            let dest = Rect::new(
                visible.x - tile_x + metrics.margin_px,
                visible.y - tile_y + metrics.margin_px,
                visible.width,
                visible.height,
            );
            (Some(source), Some(dest))
        }
        None => (None, None),
    };

    TileDescriptor {
        row,
        col,
        source_rect,
        dest_rect,
        printable_rect: Rect::new(
            metrics.margin_px,
            metrics.margin_px,
            metrics.tile_width_px,
            metrics.tile_height_px,
        ),
        has_right_tab,
        has_bottom_tab,
        overlap_px: if settings.add_overlap {
            metrics.overlap_px
        } else {
            0.0
        },
        page_width_px: metrics.page_width_px,
        page_height_px: metrics.page_height_px,
        decorations: Decorations::default(),
    }
}

/// Maps a grid-space region inside the placement back to source pixels.
fn map_to_source(visible: &Rect, placement: &PlacementRect, image_size: (u32, u32)) -> Rect {
    let (image_w, image_h) = (image_size.0 as f64, image_size.1 as f64);
    let scale = image_w / placement.scaled_width;

    let x0 = ((visible.x - placement.offset_x) * scale).clamp(0.0, image_w);
    let y0 = ((visible.y - placement.offset_y) * scale).clamp(0.0, image_h);
    let x1 = ((visible.right() - placement.offset_x) * scale).clamp(x0, image_w);
    let y1 = ((visible.bottom() - placement.offset_y) * scale).clamp(y0, image_h);

    Rect::new(x0, y0, x1 - x0, y1 - y0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::MarginUnit;

    const EPS: f64 = 1e-6;

    fn settings(cols: u32, rows: u32, margin_mm: f64, overlap: bool) -> LayoutSettings {
        LayoutSettings {
            grid_cols: cols,
            grid_rows: rows,
            printer_margin: margin_mm,
            margin_unit: MarginUnit::Mm,
            add_overlap: overlap,
            ..LayoutSettings::default()
        }
    }

    #[test]
    fn test_three_by_two_scenario() {
        let tiles =
            compute_tile_layout(&settings(3, 2, 6.0, true), &PageGeometry::A4, 3000, 2000)
                .unwrap();

        assert_eq!(tiles.len(), 6);
        let order: Vec<(u32, u32)> = tiles.iter().map(|t| (t.row, t.col)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);

        for tile in &tiles {
            assert_eq!(tile.has_right_tab, tile.col < 2);
            assert_eq!(tile.has_bottom_tab, tile.row == 0);
            let src = tile.source_rect.unwrap();
            assert!(src.x >= 0.0 && src.y >= 0.0);
            assert!(src.width > 0.0 && src.height > 0.0);
        }
    }

    #[test]
    fn test_overlap_width_is_capped() {
        let tiles =
            compute_tile_layout(&settings(2, 2, 15.0, true), &PageGeometry::A4, 2000, 2000)
                .unwrap();
        // min(15, 10) mm at 150 DPI
        let expected = 10.0 / 25.4 * 150.0;
        assert!((tiles[0].overlap_px - expected).abs() < EPS);
    }

    #[test]
    fn test_no_overlap_means_no_tabs() {
        let tiles =
            compute_tile_layout(&settings(3, 2, 6.0, false), &PageGeometry::A4, 3000, 2000)
                .unwrap();
        assert!(tiles.iter().all(|t| !t.has_right_tab && !t.has_bottom_tab));
        assert!(tiles.iter().all(|t| t.overlap_px == 0.0));
    }

    #[test]
    fn test_dest_includes_tab_strip() {
        // Same aspect as the grid, so the image covers every tile fully
        let s = settings(2, 1, 6.0, true);
        let metrics = GridMetrics::new(&s, &PageGeometry::A4);
        let (w, h) = metrics.total_size(2, 1);
        let tiles =
            compute_tile_layout(&s, &PageGeometry::A4, (w * 2.0) as u32, (h * 2.0) as u32)
                .unwrap();

        let left = tiles[0].dest_rect.unwrap();
        assert!((left.x - metrics.margin_px).abs() < EPS);
        assert!((left.width - (metrics.tile_width_px + metrics.overlap_px)).abs() < 1e-3);

        let right = tiles[1].dest_rect.unwrap();
        assert!((right.width - metrics.tile_width_px).abs() < 1e-3);
    }

    #[test]
    fn test_source_rects_stay_inside_image() {
        let tiles =
            compute_tile_layout(&settings(4, 3, 9.0, true), &PageGeometry::A4, 1234, 5678)
                .unwrap();
        let bounds = Rect::new(0.0, 0.0, 1234.0, 5678.0);
        for tile in tiles.iter().filter(|t| !t.is_blank()) {
            assert!(bounds.contains_rect(&tile.source_rect.unwrap(), EPS));
        }
    }

    #[test]
    fn test_pillarbox_produces_blank_edge_tiles() {
        // Very tall image in a wide 4 × 1 grid leaves the outer columns empty
        let tiles =
            compute_tile_layout(&settings(4, 1, 6.0, true), &PageGeometry::A4, 100, 1000)
                .unwrap();
        assert_eq!(tiles.len(), 4);
        assert!(tiles[0].is_blank());
        assert!(tiles[0].source_rect.is_none());
        assert!(tiles[3].is_blank());
        assert!(!tiles[1].is_blank());
    }

    #[test]
    fn test_single_tile_grid_is_valid() {
        let tiles =
            compute_tile_layout(&settings(1, 1, 6.0, true), &PageGeometry::A4, 800, 600)
                .unwrap();
        assert_eq!(tiles.len(), 1);
        assert!(!tiles[0].has_right_tab);
        assert!(!tiles[0].has_bottom_tab);
        assert!(tiles[0].decorations.crop_lines.is_empty());
    }

    #[test]
    fn test_oversized_margin_degrades_to_blank_tiles() {
        let tiles =
            compute_tile_layout(&settings(2, 2, 150.0, true), &PageGeometry::A4, 800, 600)
                .unwrap();
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|t| t.is_blank()));
        assert!(tiles.iter().all(|t| t.printable_rect.width == 0.0));
    }

    #[test]
    fn test_degenerate_image_emits_no_tiles() {
        let err =
            compute_tile_layout(&settings(2, 2, 6.0, true), &PageGeometry::A4, 0, 600).unwrap_err();
        assert!(matches!(err, CoreError::DegenerateImage { .. }));
    }

    #[test]
    fn test_tiles_carry_decorations() {
        let tiles =
            compute_tile_layout(&settings(2, 2, 6.0, true), &PageGeometry::A4, 2000, 2000)
                .unwrap();
        // Top-left tile: tabs but no crop marks
        assert!(!tiles[0].decorations.stripes.is_empty());
        assert!(tiles[0].decorations.crop_lines.is_empty());
        // Bottom-right tile: marks but no tabs
        assert!(tiles[3].decorations.stripes.is_empty());
        assert!(!tiles[3].decorations.crop_lines.is_empty());
    }
}
