//! # Unit Conversion
//!
//! Millimetres, inches and pixels at the target print density.
//!
//! ```text
//! 1 inch = 25.4 mm = 150 px (at 150 DPI)
//!
//!   mm ──÷ 25.4──► in ──× dpi──► px
//! ```
//!
//! All conversions are plain `f64` arithmetic. Rounding happens only where a
//! caller needs a whole pixel count (page buffers, required resolution).

use crate::types::MarginUnit;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Print density every page is laid out at.
pub const TARGET_DPI: f64 = 150.0;

/// Converts millimetres to pixels at [`TARGET_DPI`].
///
/// ```rust
/// use poster_core::mm_to_px;
///
/// assert_eq!(mm_to_px(25.4), 150.0);
/// assert_eq!(mm_to_px(0.0), 0.0);
/// ```
#[inline]
pub fn mm_to_px(mm: f64) -> f64 {
    mm_to_px_at(mm, TARGET_DPI)
}

/// Converts millimetres to pixels at an arbitrary density.
#[inline]
pub fn mm_to_px_at(mm: f64, dpi: f64) -> f64 {
    mm / MM_PER_INCH * dpi
}

#[inline]
pub fn px_to_mm_at(px: f64, dpi: f64) -> f64 {
    px / dpi * MM_PER_INCH
}

/// Normalizes a margin typed in `unit` to millimetres.
pub fn margin_to_mm(value: f64, unit: MarginUnit) -> f64 {
    match unit {
        MarginUnit::Mm => value,
        MarginUnit::In => value * MM_PER_INCH,
    }
}

/// Re-expresses a margin when the user flips the unit selector.
///
/// Inches keep two decimals, millimetres are whole numbers, so the value in
/// the input box stays tidy:
///
/// ```rust
/// use poster_core::units::convert_margin;
/// use poster_core::MarginUnit;
///
/// assert_eq!(convert_margin(6.0, MarginUnit::Mm, MarginUnit::In), 0.24);
/// assert_eq!(convert_margin(0.25, MarginUnit::In, MarginUnit::Mm), 6.0);
/// ```
pub fn convert_margin(value: f64, from: MarginUnit, to: MarginUnit) -> f64 {
    match (from, to) {
        (MarginUnit::Mm, MarginUnit::In) => round_to(value / MM_PER_INCH, 2),
        (MarginUnit::In, MarginUnit::Mm) => (value * MM_PER_INCH).round(),
        _ => value,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_px() {
        assert_eq!(mm_to_px(25.4), 150.0);
        assert_eq!(mm_to_px(50.8), 300.0);
        assert_eq!(mm_to_px(0.0), 0.0);
    }

    #[test]
    fn test_mm_to_px_at_custom_dpi() {
        assert_eq!(mm_to_px_at(25.4, 300.0), 300.0);
        assert!((px_to_mm_at(300.0, 300.0) - 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_margin_to_mm() {
        assert_eq!(margin_to_mm(6.0, MarginUnit::Mm), 6.0);
        assert!((margin_to_mm(0.5, MarginUnit::In) - 12.7).abs() < 1e-9);
    }

    #[test]
    fn test_convert_margin_same_unit_is_identity() {
        assert_eq!(convert_margin(7.3, MarginUnit::Mm, MarginUnit::Mm), 7.3);
        assert_eq!(convert_margin(0.33, MarginUnit::In, MarginUnit::In), 0.33);
    }

    #[test]
    fn test_convert_margin_rounding() {
        // 20 mm = 0.787 in → 0.79
        assert_eq!(convert_margin(20.0, MarginUnit::Mm, MarginUnit::In), 0.79);
        // 1 in = 25.4 mm → 25
        assert_eq!(convert_margin(1.0, MarginUnit::In, MarginUnit::Mm), 25.0);
    }
}
