//! # Commands Module
//!
//! One module per subcommand.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (shared helpers)
//! ├── layout.rs   ◄─── Tile geometry report
//! ├── render.rs   ◄─── Page and preview files
//! ├── suggest.rs  ◄─── Grid suggestion
//! ├── config.rs   ◄─── Effective configuration
//! └── watch.rs    ◄─── Interactive re-rendering
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  poster-tiler render cat.png --cols 4                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ConfigState::load()          defaults → poster.toml → POSTER_*        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  resolve_settings()           + --cols/--rows/... flags, validated     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  poster_core::compute_poster  geometry                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  poster_render                pixels and files (blocking pool)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod layout;
pub mod render;
pub mod suggest;
pub mod watch;

use std::path::Path;

use poster_core::validation::validate_settings;
use poster_core::{ImageDescriptor, LayoutSettings, PageGeometry};

use crate::cli::LayoutFlags;
use crate::error::CliResult;
use crate::state::ConfigState;

/// Every command prints on A4.
pub const PAGE: PageGeometry = PageGeometry::A4;

/// Config layout settings with the command-line flags applied, validated.
pub fn resolve_settings(config: &ConfigState, flags: &LayoutFlags) -> CliResult<LayoutSettings> {
    let mut settings = config.layout_settings();
    flags.apply(&mut settings);
    validate_settings(&settings, &PAGE)?;
    tracing::debug!(?settings, "Resolved layout settings");
    Ok(settings)
}

/// Reads only the image header.
pub fn read_image_descriptor(path: &Path) -> CliResult<ImageDescriptor> {
    let (width, height) = image::image_dimensions(path)?;
    Ok(ImageDescriptor::new(width, height))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use poster_core::MarginUnit;

    #[test]
    fn test_flags_override_config() {
        let mut config = ConfigState::default();
        config.layout.grid_cols = 5;

        let flags = LayoutFlags {
            rows: Some(4),
            ..LayoutFlags::default()
        };
        let settings = resolve_settings(&config, &flags).unwrap();
        assert_eq!((settings.grid_cols, settings.grid_rows), (5, 4));
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let flags = LayoutFlags {
            margin: Some(5.0),
            unit: Some(MarginUnit::In),
            ..LayoutFlags::default()
        };
        let err = resolve_settings(&ConfigState::default(), &flags).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_missing_image_is_io_error() {
        let err = read_image_descriptor(Path::new("/definitely/not/here.png")).unwrap_err();
        assert_eq!(err.code, ErrorCode::IoError);
    }
}
