//! Conversions between the outside world and the one pixel format every
//! component works on: straight-alpha RGBA8 (`image::RgbaImage`).

use crate::error::{PokedexError, Result};
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use std::path::Path;

/// Decodes an uploaded file (PNG, JPEG, WEBP, ...) from memory.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| PokedexError::Decode(e.to_string()))
}

/// Reads a static asset from disk and normalises it to RGBA.
pub fn open_rgba(path: &Path) -> Result<RgbaImage> {
    if !path.is_file() {
        return Err(PokedexError::asset_load(path, "file not found"));
    }
    let image = image::open(path).map_err(|e| PokedexError::asset_load(path, e.to_string()))?;
    Ok(image.to_rgba8())
}

pub fn to_rgba(image: &DynamicImage) -> RgbaImage {
    image.to_rgba8()
}

/// Classifiers only ever see RGB; alpha is dropped here.
pub fn to_rgb(image: &DynamicImage) -> RgbImage {
    image.to_rgb8()
}

pub fn save_png(image: &RgbaImage, path: &Path) -> std::result::Result<(), image::ImageError> {
    image.save_with_format(path, ImageFormat::Png)
}
