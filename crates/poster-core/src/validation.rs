//! # Validation Module
//!
//! Caller-side rules for layout settings, plus the grid suggestion made
//! when an image is uploaded.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (CLI flags / config file)                          │
//! │  ├── Type parsing (numbers, unit names)                                │
//! │  └── THIS MODULE: range and product rules                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Geometry (tiles, placement)                                  │
//! │  ├── Total over well-formed input                                      │
//! │  └── Degrades to blank tiles when the margin eats the page             │
//! │                                                                         │
//! │  Geometry never rejects a setting; this layer decides what to offer.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use poster_core::validation::{validate_grid, validate_settings};
//! use poster_core::{LayoutSettings, PageGeometry};
//!
//! validate_grid(3, 2).unwrap();
//! validate_settings(&LayoutSettings::default(), &PageGeometry::A4).unwrap();
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{ImageDescriptor, LayoutSettings, MarginUnit, PageGeometry};
use crate::units::{mm_to_px_at, MM_PER_INCH};
use crate::{MAX_GRID_DIMENSION, RECOMMENDED_MIN_MARGIN_MM};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Grid Validators
// =============================================================================

/// Validates grid dimensions.
///
/// ## Rules
/// - Columns and rows between 1 and [`MAX_GRID_DIMENSION`]
///
/// ```rust
/// use poster_core::validation::validate_grid;
///
/// assert!(validate_grid(1, 1).is_ok());
/// assert!(validate_grid(0, 2).is_err());
/// assert!(validate_grid(3, 11).is_err());
/// ```
pub fn validate_grid(cols: u32, rows: u32) -> ValidationResult<()> {
    for (field, value) in [("gridCols", cols), ("gridRows", rows)] {
        if !(1..=MAX_GRID_DIMENSION).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: 1.0,
                max: MAX_GRID_DIMENSION as f64,
            });
        }
    }
    Ok(())
}

/// Whether a front end should offer this grid.
///
/// A single-page "poster" is geometrically valid but pointless, so 1 × 1 is
/// not offered.
pub fn is_grid_allowed(cols: u32, rows: u32) -> bool {
    validate_grid(cols, rows).is_ok() && !(cols == 1 && rows == 1)
}

// =============================================================================
// Margin Validators
// =============================================================================

/// Validates a printer margin typed in `unit`.
///
/// ## Rules
/// - Finite and non-negative
/// - Leaves a printable area on both page axes
pub fn validate_margin(value: f64, unit: MarginUnit, page: &PageGeometry) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "printerMargin".to_string(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "printerMargin".to_string(),
            min: 0.0,
            max: margin_slider_max(unit),
        });
    }

    let margin_mm = crate::units::margin_to_mm(value, unit);
    let max_mm = page.width_mm.min(page.height_mm) / 2.0;
    if margin_mm >= max_mm {
        return Err(ValidationError::MarginTooLarge { margin_mm, max_mm });
    }

    Ok(())
}

/// Upper end of the margin slider: 20 mm or 1 inch.
pub fn margin_slider_max(unit: MarginUnit) -> f64 {
    match unit {
        MarginUnit::Mm => 20.0,
        MarginUnit::In => 1.0,
    }
}

/// Advice shown next to the margin input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MarginAdvisory {
    pub margin_mm: f64,
    pub recommended_min_mm: f64,
}

/// Flags margins below [`RECOMMENDED_MIN_MARGIN_MM`], which most printers
/// cannot reach.
pub fn margin_advisory(settings: &LayoutSettings) -> Option<MarginAdvisory> {
    let margin_mm = settings.margin_mm();
    (margin_mm < RECOMMENDED_MIN_MARGIN_MM).then_some(MarginAdvisory {
        margin_mm,
        recommended_min_mm: RECOMMENDED_MIN_MARGIN_MM,
    })
}

// =============================================================================
// Settings Validator
// =============================================================================

/// Validates a full settings value.
pub fn validate_settings(settings: &LayoutSettings, page: &PageGeometry) -> ValidationResult<()> {
    validate_grid(settings.grid_cols, settings.grid_rows)?;
    validate_margin(settings.printer_margin, settings.margin_unit, page)?;

    if !settings.max_overlap_mm.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "maxOverlapMm".to_string(),
        });
    }
    if settings.max_overlap_mm <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "maxOverlapMm".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Grid Suggestion
// =============================================================================

/// Suggests a grid for a freshly uploaded image.
///
/// One page per printable-page-worth of pixels at the page DPI, clamped to
/// `1..=MAX_GRID_DIMENSION`. A 1 × 1 result is bumped to 2 × 2.
///
/// ```rust
/// use poster_core::validation::suggest_grid;
/// use poster_core::{ImageDescriptor, LayoutSettings, PageGeometry};
///
/// let settings = LayoutSettings::default();
/// let grid = suggest_grid(&ImageDescriptor::new(3508, 3366), &settings, &PageGeometry::A4);
/// assert_eq!(grid, (3, 2));
///
/// let small = suggest_grid(&ImageDescriptor::new(640, 480), &settings, &PageGeometry::A4);
/// assert_eq!(small, (2, 2));
/// ```
pub fn suggest_grid(
    image: &ImageDescriptor,
    settings: &LayoutSettings,
    page: &PageGeometry,
) -> (u32, u32) {
    let margin_mm = settings.margin_mm();
    let page_w_px = mm_to_px_at(page.printable_width_mm(margin_mm), page.dpi);
    let page_h_px = mm_to_px_at(page.printable_height_mm(margin_mm), page.dpi);

    let (mut cols, mut rows) = (1.0, 1.0);
    if page_w_px > 0.0 && page_h_px > 0.0 {
        cols = (image.width as f64 / page_w_px).round();
        rows = (image.height as f64 / page_h_px).round();
    }

    let clamp = |v: f64| v.clamp(1.0, MAX_GRID_DIMENSION as f64) as u32;
    match (clamp(cols), clamp(rows)) {
        (1, 1) => (2, 2),
        grid => grid,
    }
}

/// Largest print size the image supports at the page DPI, in millimetres.
pub fn native_print_size_mm(image: &ImageDescriptor, page: &PageGeometry) -> (f64, f64) {
    let (w_in, h_in) = image.native_size_in(page.dpi);
    (w_in * MM_PER_INCH, h_in * MM_PER_INCH)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_grid_bounds() {
        assert!(validate_grid(1, 10).is_ok());
        assert!(validate_grid(10, 1).is_ok());
        assert!(matches!(
            validate_grid(0, 3),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "gridCols"
        ));
        assert!(matches!(
            validate_grid(3, 11),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "gridRows"
        ));
    }

    #[test]
    fn test_single_page_grid_not_offered() {
        assert!(!is_grid_allowed(1, 1));
        assert!(is_grid_allowed(1, 2));
        assert!(is_grid_allowed(2, 1));
        assert!(!is_grid_allowed(11, 2));
    }

    #[test]
    fn test_validate_margin() {
        let a4 = PageGeometry::A4;
        assert!(validate_margin(0.0, MarginUnit::Mm, &a4).is_ok());
        assert!(validate_margin(6.0, MarginUnit::Mm, &a4).is_ok());
        assert!(validate_margin(0.25, MarginUnit::In, &a4).is_ok());

        assert!(matches!(
            validate_margin(f64::NAN, MarginUnit::Mm, &a4),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            validate_margin(-1.0, MarginUnit::Mm, &a4),
            Err(ValidationError::OutOfRange { .. })
        ));
        // Half of A4's short side
        assert!(matches!(
            validate_margin(105.0, MarginUnit::Mm, &a4),
            Err(ValidationError::MarginTooLarge { .. })
        ));
        assert!(matches!(
            validate_margin(5.0, MarginUnit::In, &a4),
            Err(ValidationError::MarginTooLarge { .. })
        ));
    }

    #[test]
    fn test_margin_advisory() {
        let mut settings = LayoutSettings::default();
        assert!(margin_advisory(&settings).is_none());

        settings.printer_margin = 4.0;
        let advisory = margin_advisory(&settings).unwrap();
        assert_eq!(advisory.margin_mm, 4.0);
        assert_eq!(advisory.recommended_min_mm, RECOMMENDED_MIN_MARGIN_MM);

        // 0.25 in = 6.35 mm
        settings.printer_margin = 0.25;
        settings.margin_unit = MarginUnit::In;
        assert!(margin_advisory(&settings).is_none());
    }

    #[test]
    fn test_validate_settings_rejects_bad_overlap_cap() {
        let settings = LayoutSettings {
            max_overlap_mm: 0.0,
            ..LayoutSettings::default()
        };
        assert!(matches!(
            validate_settings(&settings, &PageGeometry::A4),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_suggest_grid_clamps_to_max() {
        let huge = ImageDescriptor::new(100_000, 100_000);
        let grid = suggest_grid(&huge, &LayoutSettings::default(), &PageGeometry::A4);
        assert_eq!(grid, (MAX_GRID_DIMENSION, MAX_GRID_DIMENSION));
    }

    #[test]
    fn test_suggest_grid_without_printable_area() {
        let settings = LayoutSettings {
            printer_margin: 200.0,
            ..LayoutSettings::default()
        };
        let grid = suggest_grid(&ImageDescriptor::new(9000, 9000), &settings, &PageGeometry::A4);
        assert_eq!(grid, (2, 2));
    }

    #[test]
    fn test_suggest_grid_keeps_single_axis_strip() {
        // Three pages wide, under half a page tall
        let strip = ImageDescriptor::new(3500, 500);
        let grid = suggest_grid(&strip, &LayoutSettings::default(), &PageGeometry::A4);
        assert_eq!(grid, (3, 1));
    }

    #[test]
    fn test_native_print_size() {
        let (w, h) = native_print_size_mm(&ImageDescriptor::new(1500, 300), &PageGeometry::A4);
        assert!((w - 254.0).abs() < 1e-9);
        assert!((h - 50.8).abs() < 1e-9);
    }
}
