//! # Domain Types
//!
//! Core domain types used throughout Poster Tiler.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ LayoutSettings  │   │  PageGeometry   │   │ImageDescriptor  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  grid cols/rows │   │  width_mm       │   │  width (px)     │       │
//! │  │  printer margin │   │  height_mm      │   │  height (px)    │       │
//! │  │  crop marks     │   │  dpi            │   └─────────────────┘       │
//! │  │  add overlap    │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PlacementRect   │   │ TileDescriptor  │   │  Decorations    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  scaled size    │   │  row / col      │   │  tab stripes    │       │
//! │  │  offset x / y   │   │  source rect    │   │  crop lines     │       │
//! │  └─────────────────┘   │  dest rect      │   │  branding       │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Coordinate Systems
//! - **Grid space**: pixels of the whole poster, origin at the top-left of
//!   tile (0, 0)'s printable area. Placement lives here.
//! - **Page space**: pixels of one printed page, origin at the page corner.
//!   Destination rects, stripes and crop lines live here.
//! - **Source space**: pixels of the uploaded image.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::units::{self, MM_PER_INCH, TARGET_DPI};
use crate::DEFAULT_MAX_OVERLAP_MM;

// =============================================================================
// Enums
// =============================================================================

/// Unit the user typed the printer margin in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MarginUnit {
    #[default]
    Mm,
    In,
}

impl MarginUnit {
    /// Returns the lowercase name used in config files and the UI.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MarginUnit::Mm => "mm",
            MarginUnit::In => "in",
        }
    }
}

impl std::str::FromStr for MarginUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" => Ok(MarginUnit::Mm),
            "in" | "inch" | "inches" => Ok(MarginUnit::In),
            other => Err(format!("unknown margin unit '{}'", other)),
        }
    }
}

/// Style of cut guides drawn in the page margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CropMarkType {
    None,
    #[default]
    Corners,
    Full,
}

impl CropMarkType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CropMarkType::None => "none",
            CropMarkType::Corners => "corners",
            CropMarkType::Full => "full",
        }
    }
}

impl std::str::FromStr for CropMarkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(CropMarkType::None),
            "corners" => Ok(CropMarkType::Corners),
            "full" => Ok(CropMarkType::Full),
            other => Err(format!("unknown crop mark type '{}'", other)),
        }
    }
}

// =============================================================================
// Layout Settings
// =============================================================================

/// Two short text lines printed at the bottom of every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Branding {
    pub line1: String,
    pub line2: String,
}

/// Everything the user can adjust about the poster layout.
///
/// ## Defaults
/// 3 columns × 2 rows, 6 mm margin, corner crop marks, glue tabs on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSettings {
    /// Columns in the poster grid (≥ 1).
    pub grid_cols: u32,
    /// Rows in the poster grid (≥ 1).
    pub grid_rows: u32,
    /// Unprintable border on every page edge, in `margin_unit`.
    pub printer_margin: f64,
    pub margin_unit: MarginUnit,
    pub crop_mark_type: CropMarkType,
    /// Extend interior tiles into their right/bottom margins as glue tabs.
    pub add_overlap: bool,
    /// Upper bound on the glue-tab width, in millimetres.
    #[serde(default = "default_max_overlap_mm")]
    pub max_overlap_mm: f64,
    #[serde(default)]
    pub branding: Option<Branding>,
}

fn default_max_overlap_mm() -> f64 {
    DEFAULT_MAX_OVERLAP_MM
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            grid_cols: 3,
            grid_rows: 2,
            printer_margin: 6.0,
            margin_unit: MarginUnit::Mm,
            crop_mark_type: CropMarkType::Corners,
            add_overlap: true,
            max_overlap_mm: DEFAULT_MAX_OVERLAP_MM,
            branding: None,
        }
    }
}

impl LayoutSettings {
    /// The printer margin normalized to millimetres.
    pub fn margin_mm(&self) -> f64 {
        units::margin_to_mm(self.printer_margin, self.margin_unit)
    }

    /// Width of the glue tab in millimetres, or 0 when tabs are off.
    ///
    /// The tab never exceeds the margin it is printed into.
    pub fn overlap_mm(&self) -> f64 {
        if !self.add_overlap {
            return 0.0;
        }
        self.margin_mm().min(self.max_overlap_mm).max(0.0)
    }

    /// Total number of pages the grid produces.
    pub fn tile_count(&self) -> usize {
        self.grid_cols as usize * self.grid_rows as usize
    }
}

// =============================================================================
// Page Geometry
// =============================================================================

/// Physical page size plus the rasterization density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
    pub dpi: f64,
}

impl PageGeometry {
    /// A4 portrait at the target DPI.
    pub const A4: PageGeometry = PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
        dpi: TARGET_DPI,
    };

    /// Full page width in pixels (unrounded).
    pub fn width_px(&self) -> f64 {
        units::mm_to_px_at(self.width_mm, self.dpi)
    }

    pub fn height_px(&self) -> f64 {
        units::mm_to_px_at(self.height_mm, self.dpi)
    }

    /// Printable width in millimetres for the given margin. May be ≤ 0.
    pub fn printable_width_mm(&self, margin_mm: f64) -> f64 {
        self.width_mm - 2.0 * margin_mm
    }

    pub fn printable_height_mm(&self, margin_mm: f64) -> f64 {
        self.height_mm - 2.0 * margin_mm
    }

    /// Page size in whole pixels, the size of a rendered page buffer.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width_px().round().max(0.0) as u32,
            self.height_px().round().max(0.0) as u32,
        )
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

// =============================================================================
// Image Descriptor
// =============================================================================

/// Pixel dimensions of the uploaded source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
}

impl ImageDescriptor {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub const fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Physical size this image prints at without upscaling, in inches.
    pub fn native_size_in(&self, dpi: f64) -> (f64, f64) {
        (self.width as f64 / dpi, self.height as f64 / dpi)
    }
}

// =============================================================================
// Geometric Primitives
// =============================================================================

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// True when the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Overlapping part of two rectangles, or `None` if they only touch or
    /// are disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());

        let r = Rect::new(x0, y0, x1 - x0, y1 - y0);
        if r.is_empty() {
            None
        } else {
            Some(r)
        }
    }

    /// Containment with a small tolerance for floating-point drift.
    pub fn contains_rect(&self, other: &Rect, epsilon: f64) -> bool {
        other.x >= self.x - epsilon
            && other.y >= self.y - epsilon
            && other.right() <= self.right() + epsilon
            && other.bottom() <= self.bottom() + epsilon
    }
}

/// Straight line from (x1, y1) to (x2, y2), in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }

    pub fn is_horizontal(&self) -> bool {
        self.y1 == self.y2
    }

    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }
}

// =============================================================================
// Layout Results
// =============================================================================

/// Where the scaled image sits inside the combined printable grid.
///
/// The image is fitted with "contain" semantics: aspect ratio preserved,
/// centred on the axis with slack.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRect {
    pub scaled_width: f64,
    pub scaled_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl PlacementRect {
    /// The placement as a rectangle in grid space.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.scaled_width,
            self.scaled_height,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.as_rect().is_empty()
    }
}

/// Emitted when the image has fewer pixels than the poster needs at the
/// target DPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionWarning {
    pub required_width: u32,
    pub required_height: u32,
    pub actual_width: u32,
    pub actual_height: u32,
}

/// A line of branding text, exported with the layout. Nothing in this
/// workspace rasterizes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TextAnchor {
    pub text: String,
    /// Horizontal centre of the line in page pixels.
    pub x: f64,
    /// Baseline in page pixels.
    pub y: f64,
    pub font_size_pt: f64,
    /// Gray level 0-255.
    pub gray: u8,
}

/// Per-tile overlays: glue-tab stripes, crop lines and branding text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Decorations {
    /// Glue-tab regions, hatched with 45° stripes by the renderer.
    pub stripes: Vec<Rect>,
    /// Distance between hatch lines, in page pixels.
    pub hatch_spacing_px: f64,
    /// Dashed cut guides.
    pub crop_lines: Vec<Segment>,
    /// Length of each dash and each gap, in page pixels.
    pub dash_px: f64,
    pub branding: Vec<TextAnchor>,
}

impl Decorations {
    pub fn is_empty(&self) -> bool {
        self.stripes.is_empty() && self.crop_lines.is_empty() && self.branding.is_empty()
    }
}

/// Everything needed to draw one printed page.
///
/// A tile whose extended box misses the image entirely is **blank**:
/// both `source_rect` and `dest_rect` are `None` and only decorations are
/// drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TileDescriptor {
    pub row: u32,
    pub col: u32,
    /// Region of the source image, in source pixels.
    pub source_rect: Option<Rect>,
    /// Where that region lands on the page, in page pixels.
    pub dest_rect: Option<Rect>,
    /// The page's printable area (page minus margins), in page pixels.
    pub printable_rect: Rect,
    pub has_right_tab: bool,
    pub has_bottom_tab: bool,
    /// Glue-tab width in page pixels (0 when tabs are off).
    pub overlap_px: f64,
    pub page_width_px: f64,
    pub page_height_px: f64,
    pub decorations: Decorations,
}

impl TileDescriptor {
    /// Row-major index of this tile in a grid with `cols` columns.
    pub fn index(&self, cols: u32) -> usize {
        self.row as usize * cols as usize + self.col as usize
    }

    pub fn is_blank(&self) -> bool {
        self.dest_rect.is_none()
    }

    /// Margin width in page pixels (same on every edge).
    pub fn margin_px(&self) -> f64 {
        self.printable_rect.x
    }

    /// Human-readable 1-based label, e.g. "R1C3".
    pub fn label(&self) -> String {
        format!("R{}C{}", self.row + 1, self.col + 1)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = LayoutSettings::default();
        assert_eq!(s.grid_cols, 3);
        assert_eq!(s.grid_rows, 2);
        assert_eq!(s.printer_margin, 6.0);
        assert_eq!(s.margin_unit, MarginUnit::Mm);
        assert_eq!(s.crop_mark_type, CropMarkType::Corners);
        assert!(s.add_overlap);
        assert_eq!(s.tile_count(), 6);
    }

    #[test]
    fn test_overlap_capped_by_margin_and_max() {
        let mut s = LayoutSettings::default();
        assert_eq!(s.overlap_mm(), 6.0);

        s.printer_margin = 15.0;
        assert_eq!(s.overlap_mm(), 10.0);

        s.printer_margin = 0.5;
        s.margin_unit = MarginUnit::In;
        assert!((s.overlap_mm() - 10.0).abs() < 1e-9);

        s.add_overlap = false;
        assert_eq!(s.overlap_mm(), 0.0);
    }

    #[test]
    fn test_settings_json_uses_camel_case() {
        let json = serde_json::to_value(LayoutSettings::default()).unwrap();
        assert_eq!(json["gridCols"], 3);
        assert_eq!(json["marginUnit"], "mm");
        assert_eq!(json["cropMarkType"], "corners");
        assert_eq!(json["addOverlap"], true);
    }

    #[test]
    fn test_settings_max_overlap_defaults_when_missing() {
        let json = r#"{
            "gridCols": 4, "gridRows": 3, "printerMargin": 0.25,
            "marginUnit": "in", "cropMarkType": "full", "addOverlap": false
        }"#;
        let s: LayoutSettings = serde_json::from_str(json).unwrap();
        assert_eq!(s.max_overlap_mm, DEFAULT_MAX_OVERLAP_MM);
        assert_eq!(s.crop_mark_type, CropMarkType::Full);
        assert!(s.branding.is_none());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("MM".parse::<MarginUnit>(), Ok(MarginUnit::Mm));
        assert_eq!("inches".parse::<MarginUnit>(), Ok(MarginUnit::In));
        assert!("cm".parse::<MarginUnit>().is_err());
        assert_eq!("full".parse::<CropMarkType>(), Ok(CropMarkType::Full));
        assert!("dotted".parse::<CropMarkType>().is_err());
    }

    #[test]
    fn test_a4_pixel_size() {
        // 210 mm / 25.4 * 150 = 1240.16, 297 mm → 1753.94
        assert_eq!(PageGeometry::A4.pixel_size(), (1240, 1754));
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));

        // Touching edges do not intersect
        let c = Rect::new(10.0, 0.0, 5.0, 5.0);
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn test_degenerate_image_and_empty_decorations() {
        assert!(ImageDescriptor::new(0, 10).is_degenerate());
        assert!(!ImageDescriptor::new(1, 1).is_degenerate());

        let mut deco = Decorations::default();
        assert!(deco.is_empty());
        deco.crop_lines.push(Segment::new(0.0, 5.0, 10.0, 5.0));
        assert!(!deco.is_empty());
    }

    #[test]
    fn test_tile_label_and_index() {
        let tile = TileDescriptor {
            row: 1,
            col: 2,
            source_rect: None,
            dest_rect: None,
            printable_rect: Rect::new(35.0, 35.0, 100.0, 100.0),
            has_right_tab: false,
            has_bottom_tab: false,
            overlap_px: 0.0,
            page_width_px: 170.0,
            page_height_px: 170.0,
            decorations: Decorations::default(),
        };
        assert_eq!(tile.label(), "R2C3");
        assert_eq!(tile.index(3), 5);
        assert!(tile.is_blank());
        assert_eq!(tile.margin_px(), 35.0);
    }
}
