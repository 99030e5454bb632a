//! # Error Types
//!
//! Domain-specific error types for poster-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  poster-core errors (this file)                                        │
//! │  ├── CoreError        - Geometry cannot be computed                    │
//! │  └── ValidationError  - Settings rejected by the caller-side rules     │
//! │                                                                         │
//! │  poster-render errors (separate crate)                                 │
//! │  └── RenderError      - Decoding / drawing / encoding failures         │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → RenderError → CliError → User     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending numbers in error messages
//! 3. Errors are enum variants, never String
//! 4. Geometry is total over well-formed input; only the variants below exist

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Geometry errors.
///
/// Everything in the core is pure and total over well-formed input, so this
/// enum is deliberately small.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The image has a zero width or height.
    ///
    /// ## When This Occurs
    /// - A decoder reported a 0 × N image
    /// - The caller passed an `ImageDescriptor` before the image finished loading
    ///
    /// No aspect ratio exists for such an image, so no tiles are emitted.
    #[error("Degenerate image: {width}x{height} has no usable area")]
    DegenerateImage { width: u32, height: u32 },

    /// A rendered tile handed to the preview builder has no pixels yet.
    ///
    /// ## User Workflow
    /// ```text
    /// Render pages (background)
    ///      │
    ///      ▼
    /// Build preview ── tile 4 still 0 × 0 ──► TileNotReady { index: 4 }
    ///      │
    ///      ▼
    /// Caller retries once every page has finished
    /// ```
    #[error("Tile {index} is not ready ({width}x{height})")]
    TileNotReady { index: usize, width: u32, height: u32 },

    /// The preview builder received a different number of tiles than the grid holds.
    #[error("Expected {expected} tiles for the grid, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Settings validation errors.
///
/// These come from [`crate::validation`], the caller-side rule layer. The
/// geometry functions themselves never produce them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// The margin leaves no printable area on the page.
    #[error("Margin of {margin_mm:.1} mm leaves no printable area (must be below {max_mm:.1} mm)")]
    MarginTooLarge { margin_mm: f64, max_mm: f64 },

    /// Invalid format (e.g. an unknown unit name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::DegenerateImage {
            width: 0,
            height: 480,
        };
        assert_eq!(err.to_string(), "Degenerate image: 0x480 has no usable area");

        let err = CoreError::TileNotReady {
            index: 4,
            width: 0,
            height: 0,
        };
        assert_eq!(err.to_string(), "Tile 4 is not ready (0x0)");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MarginTooLarge {
            margin_mm: 120.0,
            max_mm: 105.0,
        };
        assert_eq!(
            err.to_string(),
            "Margin of 120.0 mm leaves no printable area (must be below 105.0 mm)"
        );

        let err = ValidationError::OutOfRange {
            field: "gridCols".to_string(),
            min: 1.0,
            max: 10.0,
        };
        assert_eq!(err.to_string(), "gridCols must be between 1 and 10");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::NotFinite {
            field: "printerMargin".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
