//! # poster-render: Raster Adapter for Poster Tiler
//!
//! Implements poster-core's [`Rasterizer`](poster_core::Rasterizer) seam on
//! top of the `image` crate and paints the per-page decorations.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rendering Pipeline                               │
//! │                                                                         │
//! │  source file ──► load_source() ──► RgbaImage (read-only)               │
//! │                                        │                                │
//! │  PosterLayout (poster-core) ───────────┤                                │
//! │                                        ▼                                │
//! │                    render_pages() ── one white page per tile           │
//! │                      │  1. ImageRasterizer: crop → resize → overlay    │
//! │                      │  2. hatch over glue-tab stripes                 │
//! │                      │  3. dashed crop marks                           │
//! │                      ▼                                                  │
//! │          ┌───────────┴────────────┐                                     │
//! │          ▼                        ▼                                     │
//! │   write_image() per page    compose_preview() ──► write_image()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Branding anchors are carried through untouched; this crate draws no text.

pub mod error;
pub mod output;
pub mod page;
pub mod preview;
pub mod rasterizer;

pub use error::{RenderError, RenderResult};
pub use output::{load_source, page_file_name, write_image, OutputFormat};
pub use page::{render_page, render_pages};
pub use preview::compose_preview;
pub use rasterizer::ImageRasterizer;

use image::Rgba;

/// Paper colour.
pub const PAGE_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Colour of the glue-tab hatch lines.
pub const HATCH_COLOR: Rgba<u8> = Rgba([200, 200, 200, 255]);
