//! Command-line argument definitions for the poster tiler.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use poster_core::{CropMarkType, LayoutSettings, MarginUnit};
use poster_render::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "poster-tiler",
    version,
    about = "Split an image into printable A4 poster pages",
    long_about = "Split an image into a grid of A4 pages that can be printed,\n\
                  trimmed along the crop marks and glued back together.\n\n\
                  Pages carry hatched glue tabs on their right and bottom edges."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: platform config dir / poster.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v for debug, -vv for trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the tile layout computed for an image.
    Layout(LayoutArgs),

    /// Render printable pages (and a preview) for an image.
    Render(RenderArgs),

    /// Suggest a grid size for an image.
    Suggest(SuggestArgs),

    /// Show the effective configuration as TOML.
    Config,

    /// Render, then re-render as settings are edited on stdin.
    Watch(WatchArgs),
}

/// Layout overrides shared by every image command.
#[derive(Debug, Clone, Default, Args)]
pub struct LayoutFlags {
    /// Number of page columns (1-10).
    #[arg(long = "cols", value_name = "N")]
    pub cols: Option<u32>,

    /// Number of page rows (1-10).
    #[arg(long = "rows", value_name = "N")]
    pub rows: Option<u32>,

    /// Printer margin, in --unit.
    #[arg(long = "margin", value_name = "VALUE")]
    pub margin: Option<f64>,

    /// Margin unit: mm or in.
    #[arg(long = "unit", value_name = "UNIT")]
    pub unit: Option<MarginUnit>,

    /// Crop marks: none, corners or full.
    #[arg(long = "crop-marks", value_name = "TYPE")]
    pub crop_marks: Option<CropMarkType>,

    /// Disable glue tabs.
    #[arg(long = "no-overlap")]
    pub no_overlap: bool,
}

impl LayoutFlags {
    /// Applies the flags that were given on top of `settings`.
    pub fn apply(&self, settings: &mut LayoutSettings) {
        if let Some(cols) = self.cols {
            settings.grid_cols = cols;
        }
        if let Some(rows) = self.rows {
            settings.grid_rows = rows;
        }
        if let Some(unit) = self.unit {
            settings.margin_unit = unit;
        }
        if let Some(margin) = self.margin {
            settings.printer_margin = margin;
        }
        if let Some(marks) = self.crop_marks {
            settings.crop_mark_type = marks;
        }
        if self.no_overlap {
            settings.add_overlap = false;
        }
    }
}

#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Source image.
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    #[command(flatten)]
    pub flags: LayoutFlags,

    /// Print the full layout as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Source image.
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    #[command(flatten)]
    pub flags: LayoutFlags,

    /// Output directory (created if missing).
    #[arg(short = 'o', long = "out", value_name = "DIR", default_value = "poster")]
    pub out: PathBuf,

    /// Page file format: png or jpeg (default from config).
    #[arg(long = "format", value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Skip writing preview.<ext>.
    #[arg(long = "no-preview")]
    pub no_preview: bool,
}

#[derive(Debug, Args)]
pub struct SuggestArgs {
    /// Source image.
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    #[command(flatten)]
    pub flags: LayoutFlags,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Source image.
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    #[command(flatten)]
    pub flags: LayoutFlags,

    /// Output directory (created if missing).
    #[arg(short = 'o', long = "out", value_name = "DIR", default_value = "poster")]
    pub out: PathBuf,

    /// Page file format: png or jpeg (default from config).
    #[arg(long = "format", value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_flags_parse() {
        let cli = Cli::try_parse_from([
            "poster-tiler",
            "render",
            "cat.png",
            "--cols",
            "4",
            "--margin",
            "0.25",
            "--unit",
            "in",
            "--crop-marks",
            "full",
            "--format",
            "jpg",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.flags.cols, Some(4));
        assert_eq!(args.flags.unit, Some(MarginUnit::In));
        assert_eq!(args.flags.crop_marks, Some(CropMarkType::Full));
        assert_eq!(args.format, Some(OutputFormat::Jpeg));
        assert_eq!(args.out, PathBuf::from("poster"));
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let result = Cli::try_parse_from(["poster-tiler", "layout", "a.png", "--unit", "cm"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_apply_only_given_values() {
        let flags = LayoutFlags {
            rows: Some(4),
            no_overlap: true,
            ..LayoutFlags::default()
        };
        let mut settings = LayoutSettings::default();
        flags.apply(&mut settings);

        assert_eq!(settings.grid_cols, 3);
        assert_eq!(settings.grid_rows, 4);
        assert!(!settings.add_overlap);
        assert_eq!(settings.printer_margin, 6.0);
    }
}
