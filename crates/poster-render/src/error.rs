//! # Render Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  image::ImageError / io::Error / CoreError                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RenderError (this module) ← Adds page context                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in app) ← Code + message for the user                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use poster_core::CoreError;
use thiserror::Error;

/// Rendering and file errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Geometry could not be computed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Decoding or encoding failed.
    ///
    /// ## When This Occurs
    /// - Unsupported or corrupt input file
    /// - Encoder rejected the page buffer
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The page would have no pixels.
    #[error("Page size {width}x{height} is empty")]
    EmptyPage { width: u32, height: u32 },

    /// The source bitmap is not the image the layout was computed for.
    #[error("Source is {actual_width}x{actual_height} but layout expects {expected_width}x{expected_height}")]
    SourceMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

/// Convenience type alias for Results with RenderError.
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_is_transparent() {
        let err: RenderError = CoreError::DegenerateImage {
            width: 0,
            height: 0,
        }
        .into();
        assert_eq!(err.to_string(), "Degenerate image: 0x0 has no usable area");
    }

    #[test]
    fn test_source_mismatch_message() {
        let err = RenderError::SourceMismatch {
            expected_width: 300,
            expected_height: 200,
            actual_width: 30,
            actual_height: 20,
        };
        assert_eq!(
            err.to_string(),
            "Source is 30x20 but layout expects 300x200"
        );
    }
}
