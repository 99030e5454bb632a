//! # File Input / Output
//!
//! Decoding the uploaded image and encoding finished pages.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use poster_core::TileDescriptor;
use serde::{Deserialize, Serialize};

use crate::error::RenderResult;

/// Encoding used for page and preview files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    pub const fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
        })
    }
}

/// Decodes an image file into RGBA.
pub fn load_source(path: &Path) -> RenderResult<RgbaImage> {
    let image = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Decoded source image"
    );
    Ok(image.to_rgba8())
}

/// Writes `image` to `path`. JPEG drops the alpha channel.
pub fn write_image(
    path: &Path,
    image: &RgbaImage,
    format: OutputFormat,
    jpeg_quality: u8,
) -> RenderResult<()> {
    match format {
        OutputFormat::Png => image.save_with_format(path, ImageFormat::Png)?,
        OutputFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            let mut writer = BufWriter::new(File::create(path)?);
            let encoder = JpegEncoder::new_with_quality(&mut writer, jpeg_quality);
            rgb.write_with_encoder(encoder)?;
        }
    }
    tracing::debug!(path = %path.display(), %format, "Wrote image");
    Ok(())
}

/// File name of a page, 1-based: `page-01-03.png` is row 1, column 3.
pub fn page_file_name(prefix: &str, tile: &TileDescriptor, format: OutputFormat) -> String {
    format!(
        "{}-{:02}-{:02}.{}",
        prefix,
        tile.row + 1,
        tile.col + 1,
        format.extension()
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
