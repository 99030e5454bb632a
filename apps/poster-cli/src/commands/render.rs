//! # Render Command
//!
//! Decodes the image, renders every page and writes them, plus the preview,
//! into the output directory.
//!
//! ```text
//! poster/
//! ├── page-01-01.png   row 1, column 1
//! ├── page-01-02.png
//! ├── ...
//! └── preview.png      all pages side by side
//! ```

use std::path::{Path, PathBuf};

use image::RgbaImage;
use poster_core::{compute_poster, ImageDescriptor, PosterLayout};
use poster_render::{compose_preview, load_source, page_file_name, render_pages, write_image};
use tokio::task::spawn_blocking;
use tracing::{info, warn};

use crate::cli::RenderArgs;
use crate::error::CliResult;
use crate::state::{ConfigState, OutputSettings};

use super::{resolve_settings, PAGE};

/// Runs `poster-tiler render`.
pub async fn run(args: RenderArgs, config: &ConfigState) -> CliResult<()> {
    let settings = resolve_settings(config, &args.flags)?;
    let output = output_settings(config, args.format, args.no_preview);

    let path = args.image.clone();
    let source = spawn_blocking(move || load_source(&path)).await??;
    let image = ImageDescriptor::new(source.width(), source.height());
    let layout = compute_poster(&settings, &PAGE, image)?;

    if let Some(warning) = &layout.resolution_warning {
        warn!(
            required_width = warning.required_width,
            required_height = warning.required_height,
            "Image resolution is below 150 DPI at this poster size"
        );
    }

    let out = args.out.clone();
    let written = spawn_blocking(move || render_to_dir(&source, &layout, &out, &output)).await??;

    println!("Wrote {} files to {}", written.len(), args.out.display());
    Ok(())
}

/// Output settings from the config, with command-line overrides.
pub fn output_settings(
    config: &ConfigState,
    format: Option<poster_render::OutputFormat>,
    no_preview: bool,
) -> OutputSettings {
    let mut output = config.output.clone();
    if let Some(format) = format {
        output.format = format;
    }
    if no_preview {
        output.write_preview = false;
    }
    output
}

/// Renders `layout` and writes one file per page (row-major), then the
/// preview. Returns the written paths in that order.
pub fn render_to_dir(
    source: &RgbaImage,
    layout: &PosterLayout,
    out: &Path,
    output: &OutputSettings,
) -> CliResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out)?;

    let pages = render_pages(source, layout)?;
    let mut written = Vec::with_capacity(pages.len() + 1);

    for (tile, page) in layout.tiles.iter().zip(&pages) {
        let path = out.join(page_file_name(&output.page_prefix, tile, output.format));
        write_image(&path, page, output.format, output.jpeg_quality)?;
        written.push(path);
    }

    if output.write_preview {
        let preview = compose_preview(
            &pages,
            layout.settings.grid_cols,
            layout.settings.grid_rows,
        )?;
        let path = out.join(format!("preview.{}", output.format.extension()));
        write_image(&path, &preview, output.format, output.jpeg_quality)?;
        written.push(path);
    }

    info!(files = written.len(), out = %out.display(), "Poster written");
    Ok(written)
}

// =============================================================================
// Unit Tests
// =============================================================================
