//! # Suggest Command
//!
//! The grid a freshly loaded image would start with: roughly one page per
//! printable page's worth of pixels at 150 DPI.

use poster_core::validation::{native_print_size_mm, suggest_grid};
use poster_core::{ImageDescriptor, LayoutSettings, PageGeometry};
use tracing::debug;

use crate::cli::SuggestArgs;
use crate::error::CliResult;
use crate::state::ConfigState;

use super::{read_image_descriptor, resolve_settings, PAGE};

/// Runs `poster-tiler suggest`.
pub fn run(args: &SuggestArgs, config: &ConfigState) -> CliResult<()> {
    let settings = resolve_settings(config, &args.flags)?;
    let image = read_image_descriptor(&args.image)?;
    debug!(width = image.width, height = image.height, "suggest command");

    print!("{}", format_suggestion(&image, &settings, &PAGE));
    Ok(())
}

pub fn format_suggestion(
    image: &ImageDescriptor,
    settings: &LayoutSettings,
    page: &PageGeometry,
) -> String {
    let (cols, rows) = suggest_grid(image, settings, page);
    let (width_mm, height_mm) = native_print_size_mm(image, page);

    format!(
        "Suggested grid: {cols} x {rows} ({} pages)\n\
         Native print size at {:.0} DPI: {:.0} x {:.0} mm\n\
         Use: --cols {cols} --rows {rows}\n",
        cols * rows,
        page.dpi,
        width_mm,
        height_mm,
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
