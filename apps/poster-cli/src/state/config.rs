//! # Configuration State
//!
//! Defaults for every command, loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --cols 4 --margin 8                                                │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     POSTER_GRID_COLS=4                                                 │
//! │     POSTER_OUTPUT_FORMAT=jpeg                                          │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/poster-tiler/poster.toml (Linux)                         │
//! │     ~/Library/Application Support/com.poster.tiler/poster.toml (macOS) │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     3 × 2 grid, 6 mm margin, PNG pages                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # poster.toml
//! [layout]
//! grid_cols = 3
//! grid_rows = 2
//! margin = 6.0
//! margin_unit = "mm"   # mm | in
//! crop_marks = "corners"  # none | corners | full
//! overlap = true
//! max_overlap_mm = 10.0
//!
//! [output]
//! format = "png"  # png | jpeg
//! jpeg_quality = 95
//! page_prefix = "page"
//! write_preview = true
//!
//! [watch]
//! debounce_ms = 300
//! ```

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use poster_core::validation::validate_settings;
use poster_core::{
    Branding, CropMarkType, LayoutSettings, MarginUnit, PageGeometry, DEFAULT_MAX_OVERLAP_MM,
};
use poster_render::OutputFormat;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

// =============================================================================
// Layout Section
// =============================================================================

/// Default layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSection {
    pub grid_cols: u32,
    pub grid_rows: u32,

    /// Printer margin, in `margin_unit`.
    pub margin: f64,
    pub margin_unit: MarginUnit,
    pub crop_marks: CropMarkType,

    /// Glue tabs on shared edges.
    pub overlap: bool,

    /// Upper bound on the glue-tab width.
    pub max_overlap_mm: f64,

    /// Footer text. Each non-blank line becomes a text anchor in the
    /// exported layout; rendered pages do not draw it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branding: Option<Branding>,
}

impl Default for LayoutSection {
    fn default() -> Self {
        let settings = LayoutSettings::default();
        LayoutSection {
            grid_cols: settings.grid_cols,
            grid_rows: settings.grid_rows,
            margin: settings.printer_margin,
            margin_unit: settings.margin_unit,
            crop_marks: settings.crop_mark_type,
            overlap: settings.add_overlap,
            max_overlap_mm: DEFAULT_MAX_OVERLAP_MM,
            branding: None,
        }
    }
}

impl LayoutSection {
    /// The section as core layout settings.
    pub fn layout_settings(&self) -> LayoutSettings {
        LayoutSettings {
            grid_cols: self.grid_cols,
            grid_rows: self.grid_rows,
            printer_margin: self.margin,
            margin_unit: self.margin_unit,
            crop_mark_type: self.crop_marks,
            add_overlap: self.overlap,
            max_overlap_mm: self.max_overlap_mm,
            branding: self.branding.clone(),
        }
    }
}

// =============================================================================
// Output Section
// =============================================================================

/// How rendered pages are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,

    /// 1-100, JPEG only.
    pub jpeg_quality: u8,

    /// Page files are named `<prefix>-RR-CC.<ext>`.
    pub page_prefix: String,

    pub write_preview: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            format: OutputFormat::Png,
            jpeg_quality: 95,
            page_prefix: "page".to_string(),
            write_preview: true,
        }
    }
}

// =============================================================================
// Watch Section
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    /// Quiet period before a burst of edits is recomputed (milliseconds).
    pub debounce_ms: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        WatchSettings { debounce_ms: 300 }
    }
}

// =============================================================================
// Config State
// =============================================================================

/// Effective configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigState {
    #[serde(default)]
    pub layout: LayoutSection,

    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub watch: WatchSettings,
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (poster.toml)
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(CliError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(CliError::config(format!(
                "jpeg_quality must be between 1 and 100, got {}",
                self.output.jpeg_quality
            )));
        }

        if self.output.page_prefix.trim().is_empty() {
            return Err(CliError::config("page_prefix must not be empty"));
        }

        if self.watch.debounce_ms == 0 {
            return Err(CliError::config("debounce_ms must be greater than 0"));
        }

        validate_settings(&self.layout.layout_settings(), &PageGeometry::A4)?;

        Ok(())
    }

    /// Applies `POSTER_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides looked up by variable name.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: std::str::FromStr>(key: &str, value: Option<String>) -> Option<T> {
            let value = value?;
            match value.trim().parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(key, value = %value, "Ignoring unparseable environment override");
                    None
                }
            }
        }

        if let Some(cols) = parsed("POSTER_GRID_COLS", lookup("POSTER_GRID_COLS")) {
            self.layout.grid_cols = cols;
        }
        if let Some(rows) = parsed("POSTER_GRID_ROWS", lookup("POSTER_GRID_ROWS")) {
            self.layout.grid_rows = rows;
        }
        if let Some(margin) = parsed::<f64>("POSTER_MARGIN", lookup("POSTER_MARGIN")) {
            debug!(margin, "Overriding margin from environment");
            self.layout.margin = margin;
        }
        if let Some(unit) = parsed("POSTER_MARGIN_UNIT", lookup("POSTER_MARGIN_UNIT")) {
            self.layout.margin_unit = unit;
        }
        if let Some(marks) = parsed("POSTER_CROP_MARKS", lookup("POSTER_CROP_MARKS")) {
            self.layout.crop_marks = marks;
        }
        if let Some(overlap) = lookup("POSTER_OVERLAP") {
            match overlap.trim().to_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => self.layout.overlap = true,
                "0" | "false" | "off" | "no" => self.layout.overlap = false,
                _ => warn!(value = %overlap, "Unknown POSTER_OVERLAP value"),
            }
        }
        if let Some(format) = parsed("POSTER_OUTPUT_FORMAT", lookup("POSTER_OUTPUT_FORMAT")) {
            self.output.format = format;
        }
        if let Some(quality) = parsed("POSTER_JPEG_QUALITY", lookup("POSTER_JPEG_QUALITY")) {
            self.output.jpeg_quality = quality;
        }
        if let Some(ms) = parsed("POSTER_DEBOUNCE_MS", lookup("POSTER_DEBOUNCE_MS")) {
            self.watch.debounce_ms = ms;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "poster", "tiler")
            .map(|dirs| dirs.config_dir().join("poster.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Layout settings before command-line flags.
    pub fn layout_settings(&self) -> LayoutSettings {
        self.layout.layout_settings()
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.watch.debounce_ms)
    }

    pub fn to_toml(&self) -> CliResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
