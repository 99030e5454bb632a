//! # Layout Command
//!
//! Prints the computed geometry without touching any pixels.
//!
//! ```text
//! Grid 3 x 2 (6 pages), margin 6 mm, glue tabs 6.0 mm, crop marks corners
//! Image 3000 x 2000 px, placed at (0.0, 513.8) as 3507.9 x 2338.6 px
//!
//! TILE  SOURCE x, y, w, h                 DEST x, y, w, h                   TABS
//! R1C1  ...
//! ```

use std::fmt::Write as _;

use poster_core::validation::margin_advisory;
use poster_core::{compute_poster, PosterLayout, Rect, TileDescriptor};
use tracing::debug;

use crate::cli::LayoutArgs;
use crate::error::CliResult;
use crate::state::ConfigState;

use super::{read_image_descriptor, resolve_settings, PAGE};

/// Runs `poster-tiler layout`.
pub fn run(args: &LayoutArgs, config: &ConfigState) -> CliResult<()> {
    debug!(image = %args.image.display(), "layout command");

    let settings = resolve_settings(config, &args.flags)?;
    let image = read_image_descriptor(&args.image)?;
    let layout = compute_poster(&settings, &PAGE, image)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    print!("{}", format_layout_table(&layout));
    if let Some(advisory) = margin_advisory(&settings) {
        println!(
            "Note: a {:.1} mm margin is below the {:.0} mm most printers need",
            advisory.margin_mm, advisory.recommended_min_mm
        );
    }

    Ok(())
}

/// Human-readable report of a layout.
pub fn format_layout_table(layout: &PosterLayout) -> String {
    let settings = &layout.settings;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Grid {} x {} ({} pages), margin {} {}, glue tabs {:.1} mm, crop marks {}",
        settings.grid_cols,
        settings.grid_rows,
        layout.tiles.len(),
        settings.printer_margin,
        settings.margin_unit.as_str(),
        settings.overlap_mm(),
        settings.crop_mark_type.as_str(),
    );
    let _ = writeln!(
        out,
        "Image {} x {} px, placed at ({:.1}, {:.1}) as {:.1} x {:.1} px",
        layout.image.width,
        layout.image.height,
        layout.placement.offset_x,
        layout.placement.offset_y,
        layout.placement.scaled_width,
        layout.placement.scaled_height,
    );
    out.push('\n');

    let _ = writeln!(
        out,
        "{:<5} {:<34} {:<34} TABS",
        "TILE", "SOURCE x, y, w, h", "DEST x, y, w, h"
    );
    for tile in &layout.tiles {
        let _ = writeln!(out, "{}", format_tile_row(tile));
    }

    if let Some(warning) = &layout.resolution_warning {
        out.push('\n');
        let _ = writeln!(
            out,
            "Low resolution: needs at least {} x {} px for sharp prints (have {} x {})",
            warning.required_width,
            warning.required_height,
            warning.actual_width,
            warning.actual_height,
        );
    }

    out
}

fn format_rect(rect: Option<&Rect>) -> String {
    match rect {
        Some(r) => format!("{:7.1}, {:7.1}, {:7.1}, {:7.1}", r.x, r.y, r.width, r.height),
        None => "blank".to_string(),
    }
}

fn format_tile_row(tile: &TileDescriptor) -> String {
    let tabs = match (tile.has_right_tab, tile.has_bottom_tab) {
        (true, true) => "right bottom",
        (true, false) => "right",
        (false, true) => "bottom",
        (false, false) => "-",
    };
    format!(
        "{:<5} {:<34} {:<34} {}",
        tile.label(),
        format_rect(tile.source_rect.as_ref()),
        format_rect(tile.dest_rect.as_ref()),
        tabs
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use poster_core::{ImageDescriptor, LayoutSettings};

    #[test]
    fn test_table_lists_every_tile_and_warning() {
        let layout = compute_poster(
            &LayoutSettings::default(),
            &PAGE,
            ImageDescriptor::new(3000, 2000),
        )
        .unwrap();
        let table = format_layout_table(&layout);

        assert!(table.starts_with("Grid 3 x 2 (6 pages), margin 6 mm"));
        for label in ["R1C1", "R1C2", "R1C3", "R2C1", "R2C2", "R2C3"] {
            assert!(table.contains(label), "missing {label}");
        }
        assert!(table.contains("Low resolution: needs at least 3508 x 3366 px"));
    }

    #[test]
    fn test_blank_tiles_marked() {
        let settings = LayoutSettings {
            grid_cols: 4,
            grid_rows: 1,
            ..LayoutSettings::default()
        };
        let layout = compute_poster(&settings, &PAGE, ImageDescriptor::new(100, 1000)).unwrap();
        let table = format_layout_table(&layout);

        let r1c1 = table.lines().find(|l| l.starts_with("R1C1")).unwrap();
        let r1c2 = table.lines().find(|l| l.starts_with("R1C2")).unwrap();
        assert!(r1c1.contains("blank"));
        assert!(!r1c2.contains("blank"));
    }

    #[test]
    fn test_tab_column() {
        let layout = compute_poster(
            &LayoutSettings::default(),
            &PAGE,
            ImageDescriptor::new(3508, 3366),
        )
        .unwrap();
        let table = format_layout_table(&layout);

        let row = |label: &str| table.lines().find(|l| l.starts_with(label)).unwrap().to_string();
        assert!(row("R1C1").ends_with("right bottom"));
        assert!(row("R1C3").ends_with("bottom"));
        assert!(row("R2C2").ends_with("right"));
        assert!(row("R2C3").ends_with("-"));
        assert!(!table.contains("Low resolution"));
    }
}
