//! # Composite Preview Layout
//!
//! Where each rendered page goes on the single combined preview canvas.
//!
//! ```text
//!   cols = 3, rows = 2, every page w × h
//!
//!   (0,0)      (w,0)      (2w,0)
//!   ┌──────────┬──────────┬──────────┐
//!   │  page 0  │  page 1  │  page 2  │
//!   ├──────────┼──────────┼──────────┤
//!   │  page 3  │  page 4  │  page 5  │
//!   └──────────┴──────────┴──────────┘
//!                                   (3w, 2h)
//! ```
//!
//! The page bitmaps themselves live outside the core; this module only
//! checks their sizes and computes offsets.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Pixel size of one rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl TileSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Offset of one page on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PreviewPlacement {
    pub index: usize,
    pub row: u32,
    pub col: u32,
    pub x: u32,
    pub y: u32,
}

/// Canvas size plus one placement per page, in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PreviewLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub placements: Vec<PreviewPlacement>,
}

/// Lays out `tiles` (rendered pages, row-major) into one gapless canvas.
///
/// Every page is drawn at the first page's size.
///
/// ## Errors
/// - [`CoreError::TileCountMismatch`] if `tiles.len() != cols × rows`
/// - [`CoreError::TileNotReady`] if any page is still 0 × 0
///
/// ```rust
/// use poster_core::{compute_preview_layout, TileSize};
///
/// let pages = vec![TileSize::new(100, 140); 6];
/// let layout = compute_preview_layout(&pages, 3, 2).unwrap();
/// assert_eq!((layout.canvas_width, layout.canvas_height), (300, 280));
/// assert_eq!((layout.placements[4].x, layout.placements[4].y), (100, 140));
/// ```
pub fn compute_preview_layout(
    tiles: &[TileSize],
    cols: u32,
    rows: u32,
) -> CoreResult<PreviewLayout> {
    let expected = cols as usize * rows as usize;
    if tiles.len() != expected {
        return Err(CoreError::TileCountMismatch {
            expected,
            actual: tiles.len(),
        });
    }

    if let Some((index, size)) = tiles
        .iter()
        .enumerate()
        .find(|(_, t)| t.width == 0 || t.height == 0)
    {
        return Err(CoreError::TileNotReady {
            index,
            width: size.width,
            height: size.height,
        });
    }

    let Some(first) = tiles.first() else {
        // cols × rows == 0; nothing to lay out
        return Ok(PreviewLayout {
            canvas_width: 0,
            canvas_height: 0,
            tile_width: 0,
            tile_height: 0,
            placements: Vec::new(),
        });
    };

    let placements = (0..expected)
        .map(|index| {
            let row = (index / cols as usize) as u32;
            let col = (index % cols as usize) as u32;
            PreviewPlacement {
                index,
                row,
                col,
                x: col * first.width,
                y: row * first.height,
            }
        })
        .collect();

    Ok(PreviewLayout {
        canvas_width: first.width * cols,
        canvas_height: first.height * rows,
        tile_width: first.width,
        tile_height: first.height,
        placements,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
