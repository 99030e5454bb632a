//! # poster-core: Pure Tiling Geometry for Poster Tiler
//!
//! This crate is the **heart** of Poster Tiler. It turns one image plus a
//! handful of layout settings into a list of printable page tiles, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Poster Tiler Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Front end (CLI / web / desktop)                │   │
//! │  │    Upload ──► Settings ──► Preview ──► Export pages             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain data                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ poster-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   units   │  │ placement │  │   tiles   │  │decorations│  │   │
//! │  │   │ mm ↔ px   │  │ contain   │  │ src/dest  │  │ tabs/marks│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │resolution │  │  preview  │  │validation │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PIXELS • NO TIMERS • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Rasterizer trait                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              poster-render (image / imageproc)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Millimetre / inch / pixel conversion at the target DPI
//! - [`types`] - Settings, page geometry, rectangles, tile descriptors
//! - [`resolution`] - Source-resolution adequacy check
//! - [`placement`] - "Contain" fit of the image inside the whole grid
//! - [`tiles`] - Per-tile source and destination rectangles
//! - [`decorations`] - Glue-tab stripes, crop marks, branding anchors
//! - [`preview`] - Combined preview canvas layout
//! - [`raster`] - The seam to an external rasterizer
//! - [`poster`] - One-call snapshot of everything above
//! - [`validation`] - Caller-side settings rules and grid suggestion
//! - [`error`] - Domain error types
//!
//! ## Data Flow
//! ```text
//! settings + image ──► units/resolution ──► placement ──► tiles ──┬─► decorations
//!                                                                  └─► preview
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use poster_core::{compute_tile_layout, LayoutSettings, PageGeometry};
//!
//! let settings = LayoutSettings::default(); // 3 × 2 grid, 6 mm margin
//! let tiles = compute_tile_layout(&settings, &PageGeometry::A4, 3000, 2000).unwrap();
//!
//! assert_eq!(tiles.len(), 6);
//! assert!(tiles[0].has_right_tab);
//! assert!(!tiles[2].has_right_tab);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod decorations;
pub mod error;
pub mod placement;
pub mod poster;
pub mod preview;
pub mod raster;
pub mod resolution;
pub mod tiles;
pub mod types;
pub mod units;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use poster_core::compute_tile_layout` instead of
// `use poster_core::tiles::compute_tile_layout`

pub use decorations::compute_decorations;
pub use error::{CoreError, CoreResult, ValidationError};
pub use placement::compute_grid_placement;
pub use poster::{compute_poster, PosterLayout};
pub use preview::{compute_preview_layout, PreviewLayout, PreviewPlacement, TileSize};
pub use raster::{draw_tile, Rasterizer};
pub use resolution::compute_resolution_warning;
pub use tiles::compute_tile_layout;
pub use types::*;
pub use units::{mm_to_px, MM_PER_INCH, TARGET_DPI};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default cap on the glue-tab width, in millimetres.
///
/// ## Why a cap?
/// The tab lives inside the page margin. Wide margins would otherwise
/// produce tabs wider than anyone needs to glue two sheets together.
pub const DEFAULT_MAX_OVERLAP_MM: f64 = 10.0;

/// Largest grid dimension a front end should offer (columns or rows).
pub const MAX_GRID_DIMENSION: u32 = 10;

/// Margins below this are flagged as likely to be clipped by the printer.
pub const RECOMMENDED_MIN_MARGIN_MM: f64 = 6.0;
