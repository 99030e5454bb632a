//! # Decorations
//!
//! Overlays printed on each page around the image: glue-tab stripes, crop
//! marks and branding text anchors. Everything here is derived from the
//! tile's geometry and the settings; no pixels are sampled.
//!
//! ## Interior-Edge Crop Marks
//! ```text
//!   2 × 2 grid, marks only where a cut is needed
//!
//!   ┌─────────┐┌─────────┐
//!   │  0,0    ││  0,1    │        0,0 : none
//!   │         ││ ¦       │        0,1 : left edge
//!   └─────────┘└─────────┘        1,0 : top edge
//!   ┌─────────┐┌─────────┐        1,1 : top + left edges
//!   │ - - - - ││ -¦- - - │
//!   │  1,0    ││ ¦ 1,1   │   The outer poster boundary is never marked.
//!   └─────────┘└─────────┘
//! ```
//!
//! ## Corner Ticks
//! With [`CropMarkType::Corners`] each marked edge gets two short ticks at
//! its ends instead of a full-length line. Tick length is three quarters of
//! the margin, so ticks stay inside the unprinted border.

use crate::types::{
    CropMarkType, Decorations, LayoutSettings, PageGeometry, Rect, Segment, TextAnchor,
    TileDescriptor,
};
use crate::units::mm_to_px_at;

// =============================================================================
// Styling Constants
// =============================================================================

/// Dash and gap length of crop lines, in millimetres.
pub const CROP_DASH_MM: f64 = 2.0;

/// Crop mark colour, RGBA (red at 70% opacity).
pub const CROP_MARK_RGBA: [u8; 4] = [239, 68, 68, 179];

/// Corner tick length as a fraction of the margin.
pub const CORNER_TICK_RATIO: f64 = 0.75;

/// Distance between glue-tab hatch lines, in millimetres.
pub const HATCH_SPACING_MM: f64 = 3.0;

/// Branding baselines, measured up from the bottom page edge, in millimetres.
pub const BRANDING_BASELINES_MM: [f64; 2] = [3.0, 1.5];

pub const BRANDING_FONT_SIZE_PT: f64 = 6.0;

pub const BRANDING_GRAY: u8 = 150;

// =============================================================================
// Decoration Builder
// =============================================================================

/// Computes the overlays for one tile.
///
/// Millimetre styling constants are converted at `page.dpi`, the same
/// density the tile geometry was laid out at.
///
/// ```rust
/// use poster_core::{compute_tile_layout, compute_decorations, LayoutSettings, PageGeometry};
///
/// let settings = LayoutSettings::default();
/// let tiles = compute_tile_layout(&settings, &PageGeometry::A4, 3000, 2000).unwrap();
///
/// // Top-left tile: right and bottom tabs plus the corner square
/// let deco = compute_decorations(&tiles[0], &settings, &PageGeometry::A4);
/// assert_eq!(deco.stripes.len(), 3);
/// assert!(deco.crop_lines.is_empty());
/// ```
pub fn compute_decorations(
    tile: &TileDescriptor,
    settings: &LayoutSettings,
    page: &PageGeometry,
) -> Decorations {
    let to_px = |mm: f64| mm_to_px_at(mm, page.dpi);

    Decorations {
        stripes: glue_tab_stripes(tile),
        hatch_spacing_px: to_px(HATCH_SPACING_MM),
        crop_lines: crop_lines(tile, settings.crop_mark_type),
        dash_px: to_px(CROP_DASH_MM),
        branding: branding_anchors(tile, settings, to_px),
    }
}

/// Tab regions in the tile's trailing margins.
///
/// They start exactly at the printable edge, so they never cover the
/// printable image area.
fn glue_tab_stripes(tile: &TileDescriptor) -> Vec<Rect> {
    let overlap = tile.overlap_px;
    if overlap <= 0.0 {
        return Vec::new();
    }

    let printable = tile.printable_rect;
    let mut stripes = Vec::with_capacity(3);

    if tile.has_right_tab {
        stripes.push(Rect::new(
            printable.right(),
            printable.y,
            overlap,
            printable.height,
        ));
    }
    if tile.has_bottom_tab {
        stripes.push(Rect::new(
            printable.x,
            printable.bottom(),
            printable.width,
            overlap,
        ));
    }
    if tile.has_right_tab && tile.has_bottom_tab {
        stripes.push(Rect::new(
            printable.right(),
            printable.bottom(),
            overlap,
            overlap,
        ));
    }

    stripes.retain(|r| !r.is_empty());
    stripes
}

fn crop_lines(tile: &TileDescriptor, style: CropMarkType) -> Vec<Segment> {
    let top = tile.printable_rect.y;
    let left = tile.printable_rect.x;
    let (page_w, page_h) = (tile.page_width_px, tile.page_height_px);
    let mut lines = Vec::new();

    match style {
        CropMarkType::None => {}
        CropMarkType::Full => {
            if tile.row > 0 {
                lines.push(Segment::new(0.0, top, page_w, top));
            }
            if tile.col > 0 {
                lines.push(Segment::new(left, 0.0, left, page_h));
            }
        }
        CropMarkType::Corners => {
            let len = tile.margin_px() * CORNER_TICK_RATIO;
            if len <= 0.0 {
                return lines;
            }
            if tile.row > 0 {
                lines.push(Segment::new(0.0, top, len, top));
                lines.push(Segment::new(page_w - len, top, page_w, top));
            }
            if tile.col > 0 {
                lines.push(Segment::new(left, 0.0, left, len));
                lines.push(Segment::new(left, page_h - len, left, page_h));
            }
        }
    }

    lines
}

fn branding_anchors(
    tile: &TileDescriptor,
    settings: &LayoutSettings,
    to_px: impl Fn(f64) -> f64,
) -> Vec<TextAnchor> {
    let Some(branding) = &settings.branding else {
        return Vec::new();
    };

    [&branding.line1, &branding.line2]
        .into_iter()
        .zip(BRANDING_BASELINES_MM)
        .filter(|(text, _)| !text.trim().is_empty())
        .map(|(text, from_bottom_mm)| TextAnchor {
            text: text.clone(),
            x: tile.page_width_px / 2.0,
            y: tile.page_height_px - to_px(from_bottom_mm),
            font_size_pt: BRANDING_FONT_SIZE_PT,
            gray: BRANDING_GRAY,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
