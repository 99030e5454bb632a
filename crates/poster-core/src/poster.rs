//! # Poster Snapshot
//!
//! One call that recomputes everything a front end shows after a settings
//! or image change. Every field is rebuilt from scratch; nothing is patched
//! incrementally.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::resolution::compute_resolution_warning;
use crate::tiles::{compute_tile_layout, GridMetrics};
use crate::types::{
    ImageDescriptor, LayoutSettings, PageGeometry, PlacementRect, ResolutionWarning,
    TileDescriptor,
};

/// Full layout for one settings + image pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PosterLayout {
    pub settings: LayoutSettings,
    pub image: ImageDescriptor,
    pub placement: PlacementRect,
    /// Row-major, `grid_cols × grid_rows` long.
    pub tiles: Vec<TileDescriptor>,
    pub resolution_warning: Option<ResolutionWarning>,
    pub page_width_px: u32,
    pub page_height_px: u32,
}

/// Computes placement, tiles and the resolution warning in one pass.
///
/// ```rust
/// use poster_core::{compute_poster, ImageDescriptor, LayoutSettings, PageGeometry};
///
/// let layout = compute_poster(
///     &LayoutSettings::default(),
///     &PageGeometry::A4,
///     ImageDescriptor::new(3000, 2000),
/// )
/// .unwrap();
///
/// assert_eq!(layout.tiles.len(), 6);
/// assert!(layout.resolution_warning.is_some());
/// assert_eq!((layout.page_width_px, layout.page_height_px), (1240, 1754));
/// ```
pub fn compute_poster(
    settings: &LayoutSettings,
    page: &PageGeometry,
    image: ImageDescriptor,
) -> CoreResult<PosterLayout> {
    let tiles = compute_tile_layout(settings, page, image.width, image.height)?;

    let metrics = GridMetrics::new(settings, page);
    let (total_w, total_h) = metrics.total_size(settings.grid_cols, settings.grid_rows);
    let placement =
        crate::placement::compute_grid_placement(image.width, image.height, total_w, total_h)?;

    let resolution_warning = compute_resolution_warning(settings, page, image.width, image.height);
    let (page_width_px, page_height_px) = page.pixel_size();

    Ok(PosterLayout {
        settings: settings.clone(),
        image,
        placement,
        tiles,
        resolution_warning,
        page_width_px,
        page_height_px,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_adequate_image_has_no_warning() {
        let layout = compute_poster(
            &LayoutSettings::default(),
            &PageGeometry::A4,
            ImageDescriptor::new(4000, 4000),
        )
        .unwrap();
        assert!(layout.resolution_warning.is_none());
        assert_eq!(layout.placement.offset_y, 0.0);
    }

    #[test]
    fn test_degenerate_image_fails() {
        let err = compute_poster(
            &LayoutSettings::default(),
            &PageGeometry::A4,
            ImageDescriptor::new(10, 0),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::DegenerateImage {
                width: 10,
                height: 0
            }
        );
    }

    #[test]
    fn test_layout_serializes_for_front_end() {
        let layout = compute_poster(
            &LayoutSettings::default(),
            &PageGeometry::A4,
            ImageDescriptor::new(3000, 2000),
        )
        .unwrap();
        let json = serde_json::to_value(&layout).unwrap();

        assert_eq!(json["tiles"].as_array().unwrap().len(), 6);
        assert_eq!(json["resolutionWarning"]["requiredWidth"], 3508);
        assert_eq!(json["tiles"][0]["hasRightTab"], true);
        assert!(json["tiles"][0]["sourceRect"].is_object());
    }
}
