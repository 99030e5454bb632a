//! # CLI Error Type
//!
//! Unified error type for every command.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Poster Tiler                           │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<T, CliError>                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Config Error? ───── toml::de::Error ─────────────────┐                │
//! │         │                                             │                │
//! │         ▼                                             ▼                │
//! │  Geometry Error? ─── CoreError::DegenerateImage ── CliError ──► stderr │
//! │         │                                             ▲      + exit    │
//! │         ▼                                             │        code    │
//! │  Render Error? ───── RenderError::Image ──────────────┘                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! With `--json`, failures are printed as:
//! ```json
//! { "code": "DEGENERATE_IMAGE", "message": "Degenerate image: 0x480 has no usable area" }
//! ```

use std::process::ExitCode;

use poster_core::{CoreError, ValidationError};
use poster_render::RenderError;
use serde::Serialize;

/// Error returned from CLI commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Settings failed validation
    ValidationError,

    /// The image has no usable area
    DegenerateImage,

    /// Decoding or encoding failed
    ImageError,

    /// File system failure
    IoError,

    /// Config file could not be read or written
    ConfigError,

    /// A background task went away
    ChannelClosed,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit status for this code (sysexits-style).
    pub const fn exit_status(&self) -> u8 {
        match self {
            ErrorCode::ValidationError => 64,
            ErrorCode::DegenerateImage | ErrorCode::ImageError => 65,
            ErrorCode::IoError => 74,
            ErrorCode::ConfigError => 78,
            ErrorCode::ChannelClosed | ErrorCode::Internal => 70,
        }
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ConfigError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    /// Error for a closed scheduler or renderer channel.
    pub fn channel_closed(what: &str) -> Self {
        CliError::new(ErrorCode::ChannelClosed, format!("{} channel closed", what))
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code.exit_status())
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DegenerateImage { .. } => {
                CliError::new(ErrorCode::DegenerateImage, err.to_string())
            }
            CoreError::Validation(e) => e.into(),
            CoreError::TileNotReady { .. } | CoreError::TileCountMismatch { .. } => {
                tracing::error!("Preview assembly failed: {}", err);
                CliError::internal(err.to_string())
            }
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

/// Converts render errors to CLI errors.
impl From<RenderError> for CliError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Core(e) => e.into(),
            RenderError::Image(e) => e.into(),
            RenderError::Io(e) => e.into(),
            RenderError::EmptyPage { .. } | RenderError::SourceMismatch { .. } => {
                tracing::error!("Render failed: {}", err);
                CliError::internal(err.to_string())
            }
        }
    }
}

impl From<image::ImageError> for CliError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => e.into(),
            other => CliError::new(ErrorCode::ImageError, other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::config(format!("Invalid config file: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::config(format!("Cannot serialize config: {}", err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("JSON encoding failed: {}", err))
    }
}

impl From<tokio::task::JoinError> for CliError {
    fn from(err: tokio::task::JoinError) -> Self {
        CliError::internal(format!("Background task failed: {}", err))
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

/// Convenience type alias for Results with CliError.
pub type CliResult<T> = Result<T, CliError>;

// =============================================================================
// Unit Tests
// =============================================================================
