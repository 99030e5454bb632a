//! # Watch Command
//!
//! Renders once, then keeps re-rendering as settings are edited on stdin.
//!
//! ## Edit Syntax
//! One or more `key=value` pairs per line:
//! ```text
//! cols=4 rows=3
//! margin=8
//! unit=in          (converts the current margin)
//! marks=full       (none | corners | full)
//! overlap=off      (on | off)
//! render           (recompute now)
//! quit
//! ```
//!
//! ## Task Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stdin ──► apply_edit_lines ──► SessionState ──► SchedulerHandle        │
//! │                                                       │                 │
//! │                                                       ▼                 │
//! │                                            RecomputeScheduler           │
//! │                                                       │ LayoutUpdate    │
//! │                                                       ▼                 │
//! │                                             render_updates              │
//! │                                  (stale generations dropped, pages     │
//! │                                   rendered on the blocking pool)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use poster_core::units::convert_margin;
use poster_core::{CropMarkType, LayoutSettings, MarginUnit, ValidationError};
use poster_render::load_source;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::spawn_blocking;
use tracing::{debug, info, warn};

use crate::cli::WatchArgs;
use crate::error::{CliError, CliResult};
use crate::scheduler::{LayoutUpdate, RecomputeScheduler, SchedulerHandle};
use crate::state::{ConfigState, OutputSettings, SessionState};

use super::render::{output_settings, render_to_dir};
use super::{resolve_settings, PAGE};

// =============================================================================
// Setting Edits
// =============================================================================

/// One `key=value` edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingEdit {
    Cols(u32),
    Rows(u32),
    Margin(f64),
    Unit(MarginUnit),
    Marks(CropMarkType),
    Overlap(bool),
}

impl SettingEdit {
    pub fn apply(&self, settings: &mut LayoutSettings) {
        match *self {
            SettingEdit::Cols(cols) => settings.grid_cols = cols,
            SettingEdit::Rows(rows) => settings.grid_rows = rows,
            SettingEdit::Margin(margin) => settings.printer_margin = margin,
            SettingEdit::Unit(unit) => {
                settings.printer_margin =
                    convert_margin(settings.printer_margin, settings.margin_unit, unit);
                settings.margin_unit = unit;
            }
            SettingEdit::Marks(marks) => settings.crop_mark_type = marks,
            SettingEdit::Overlap(on) => settings.add_overlap = on,
        }
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> CliError {
    ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.into(),
    }
    .into()
}

impl std::str::FromStr for SettingEdit {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| invalid(s, "expected key=value"))?;
        let (key, value) = (key.trim().to_lowercase(), value.trim());

        let number = |v: &str| -> CliResult<f64> {
            v.parse::<f64>()
                .map_err(|_| invalid(&key, format!("'{}' is not a number", v)))
        };
        let count = |v: &str| -> CliResult<u32> {
            v.parse::<u32>()
                .map_err(|_| invalid(&key, format!("'{}' is not a whole number", v)))
        };

        match key.as_str() {
            "cols" | "columns" => Ok(SettingEdit::Cols(count(value)?)),
            "rows" => Ok(SettingEdit::Rows(count(value)?)),
            "margin" => Ok(SettingEdit::Margin(number(value)?)),
            "unit" => value
                .parse()
                .map(SettingEdit::Unit)
                .map_err(|e: String| invalid(&key, e)),
            "marks" | "crop-marks" | "crop_marks" => value
                .parse()
                .map(SettingEdit::Marks)
                .map_err(|e: String| invalid(&key, e)),
            "overlap" | "tabs" => match value.to_lowercase().as_str() {
                "on" | "true" | "yes" | "1" => Ok(SettingEdit::Overlap(true)),
                "off" | "false" | "no" | "0" => Ok(SettingEdit::Overlap(false)),
                other => Err(invalid(&key, format!("expected on or off, got '{}'", other))),
            },
            other => Err(invalid(other, "unknown setting")),
        }
    }
}

/// Parses every whitespace-separated edit on a line.
pub fn parse_edits(line: &str) -> CliResult<Vec<SettingEdit>> {
    line.split_whitespace().map(str::parse).collect()
}

// =============================================================================
// Command
// =============================================================================

/// Runs `poster-tiler watch`.
pub async fn run(args: WatchArgs, config: &ConfigState) -> CliResult<()> {
    let settings = resolve_settings(config, &args.flags)?;
    let output = output_settings(config, args.format, false);

    let session = SessionState::try_new(settings, PAGE)?;
    let (scheduler, updates) = RecomputeScheduler::new(session.clone(), config.debounce());
    let handle = scheduler.start();
    let renderer = tokio::spawn(render_updates(
        updates,
        session.clone(),
        args.out.clone(),
        output,
    ));

    let path = args.image.clone();
    let source = spawn_blocking(move || load_source(&path)).await??;
    session.set_image(Arc::new(source));
    handle.flush().await?;

    info!(out = %args.out.display(), "Watching stdin for setting edits");
    apply_edit_lines(BufReader::new(tokio::io::stdin()), &session, &handle).await?;

    handle.shutdown().await?;
    let rendered = renderer.await??;
    info!(rendered, "Watch finished");
    Ok(())
}

/// Applies edit lines until EOF or `quit`, nudging the scheduler after each
/// accepted change. Rejected lines are logged and skipped.
pub async fn apply_edit_lines<R>(
    reader: R,
    session: &SessionState,
    handle: &SchedulerHandle,
) -> CliResult<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            _ if line.starts_with('#') => continue,
            "quit" | "exit" => break,
            "render" | "flush" => {
                handle.flush().await?;
                continue;
            }
            _ => {}
        }

        let edits = match parse_edits(line) {
            Ok(edits) => edits,
            Err(e) => {
                warn!(line, error = %e.message, "Ignoring edit");
                continue;
            }
        };

        match session.try_update_settings(|settings| {
            for edit in &edits {
                edit.apply(settings);
            }
        }) {
            Ok(generation) => {
                debug!(generation, line, "Edit accepted");
                handle.settings_changed().await?;
            }
            Err(e) => warn!(line, error = %e.message, "Edit rejected"),
        }
    }

    Ok(())
}

/// Renders each update that is still current. Returns how many were
/// rendered.
pub async fn render_updates(
    mut updates: mpsc::Receiver<LayoutUpdate>,
    session: SessionState,
    out: PathBuf,
    output: OutputSettings,
) -> CliResult<usize> {
    let mut rendered = 0;

    while let Some(LayoutUpdate {
        generation,
        image,
        layout,
    }) = updates.recv().await
    {
        if !session.is_current(generation) {
            debug!(generation, "Discarding superseded layout");
            continue;
        }

        let layout = match layout {
            Ok(layout) => layout,
            Err(e) => {
                warn!(generation, error = %e, "Layout failed");
                continue;
            }
        };

        let (out, output) = (out.clone(), output.clone());
        let written =
            spawn_blocking(move || render_to_dir(&image, &layout, &out, &output)).await??;
        rendered += 1;

        if session.is_current(generation) {
            info!(generation, files = written.len(), "Pages written");
        } else {
            debug!(generation, "Settings changed during render");
        }
    }

    Ok(rendered)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use poster_core::{compute_poster, ImageDescriptor, PageGeometry};
    use std::time::Duration;

    #[test]
    fn test_parse_edits() {
        assert_eq!(
            parse_edits("cols=4 rows=3").unwrap(),
            vec![SettingEdit::Cols(4), SettingEdit::Rows(3)]
        );
        assert_eq!(
            parse_edits("unit=inch marks=FULL overlap=off").unwrap(),
            vec![
                SettingEdit::Unit(MarginUnit::In),
                SettingEdit::Marks(CropMarkType::Full),
                SettingEdit::Overlap(false)
            ]
        );
        assert!(parse_edits("cols=four").is_err());
        assert!(parse_edits("colour=red").is_err());
        assert!(parse_edits("margin").is_err());
    }

    #[test]
    fn test_unit_switch_converts_margin() {
        let mut settings = LayoutSettings::default();

        SettingEdit::Unit(MarginUnit::In).apply(&mut settings);
        assert_eq!(settings.margin_unit, MarginUnit::In);
        assert_eq!(settings.printer_margin, 0.24);

        SettingEdit::Unit(MarginUnit::Mm).apply(&mut settings);
        assert_eq!(settings.printer_margin, 6.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_lines_update_session() {
        let session = SessionState::new(LayoutSettings::default(), PageGeometry::A4);
        session.set_image(Arc::new(RgbaImage::new(300, 200)));
        let (scheduler, mut updates) =
            RecomputeScheduler::new(session.clone(), Duration::from_millis(300));
        let handle = scheduler.start();

        let input: &[u8] = b"cols=4\n# comment\nrows=3\nbogus=1\ncols=1 rows=1\nquit\ncols=9\n";
        apply_edit_lines(input, &session, &handle).await.unwrap();

        let settings = session.snapshot().settings;
        assert_eq!((settings.grid_cols, settings.grid_rows), (4, 3));
        assert_eq!(session.generation(), 3);

        handle.shutdown().await.unwrap();
        let update = updates.recv().await.unwrap();
        assert_eq!(update.generation, 3);
        assert_eq!(update.layout.unwrap().tiles.len(), 12);
    }

    #[tokio::test]
    async fn test_render_updates_drops_stale_generations() {
        const SMALL_PAGE: PageGeometry = PageGeometry {
            width_mm: 50.8,
            height_mm: 76.2,
            dpi: 150.0,
        };
        let dir = std::env::temp_dir().join(format!("poster-cli-{}-watch", std::process::id()));

        let session = SessionState::new(LayoutSettings::default(), PageGeometry::A4);
        let image = Arc::new(RgbaImage::new(60, 40));
        session.set_image(image.clone());
        session.try_update_settings(|s| s.grid_rows = 1).unwrap();

        let snapshot = session.snapshot();
        let layout = || compute_poster(&snapshot.settings, &SMALL_PAGE, ImageDescriptor::new(60, 40));

        let (tx, rx) = mpsc::channel(4);
        tx.send(LayoutUpdate {
            generation: 1,
            image: image.clone(),
            layout: layout(),
        })
        .await
        .unwrap();
        tx.send(LayoutUpdate {
            generation: 2,
            image,
            layout: layout(),
        })
        .await
        .unwrap();
        drop(tx);

        let output = OutputSettings {
            write_preview: false,
            ..OutputSettings::default()
        };
        let rendered = render_updates(rx, session, dir.clone(), output).await.unwrap();

        assert_eq!(rendered, 1);
        assert!(dir.join("page-01-03.png").exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
