//! Decoding and down-scaling of rasters shown by image shapes.

use egui::ColorImage;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use log::debug;
use thiserror::Error;

/// Errors that can occur while preparing an image for an image shape
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels")]
    EmptyImage,
}

/// Size of an image scaled down to fit a `max_width` x `max_height` box,
/// keeping its aspect ratio. Images that already fit keep their size.
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let (max_width, max_height) = (max_width.max(1), max_height.max(1));
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let scale = (f64::from(max_width) / f64::from(width)).min(f64::from(max_height) / f64::from(height));
    let scaled = |extent: u32, limit: u32| ((f64::from(extent) * scale) as u32).clamp(1, limit);
    (scaled(width, max_width), scaled(height, max_height))
}

/// Scales a decoded image so that it fits within `max_width` x `max_height`.
pub fn scale_to_fit(image: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    let (target_width, target_height) = scaled_dimensions(width, height, max_width, max_height);
    if (target_width, target_height) == (width, height) {
        return image;
    }
    debug!("Scaling image from {}x{} to {}x{}", width, height, target_width, target_height);
    image.resize_exact(target_width, target_height, FilterType::Triangle)
}

/// Decodes `bytes` and scales the result to fit within
/// `max_width` x `max_height`.
///
/// Returns an egui image ready to be uploaded as a texture.
pub fn load_scaled(bytes: &[u8], max_width: u32, max_height: u32) -> Result<ColorImage, ImageLoadError> {
    let decoded = image::load_from_memory(bytes)?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(ImageLoadError::EmptyImage);
    }
    debug!("Successfully decoded image: {}x{}", decoded.width(), decoded.height());

    let rgba = scale_to_fit(decoded, max_width, max_height).to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
