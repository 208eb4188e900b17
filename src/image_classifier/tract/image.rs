use crate::image_classifier::models::model_config::ModelConfig;
use image::{imageops, Rgb, RgbImage};
use tract_onnx::prelude::*;

/// Scales `image` to fit inside `width`x`height` keeping its aspect ratio and
/// centers it on a black canvas.
pub fn letterbox(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }

    let (w, h) = (image.width() as f32, image.height() as f32);
    let scale = (width as f32 / w).min(height as f32 / h);
    let new_w = ((w * scale) as u32).clamp(1, width);
    let new_h = ((h * scale) as u32).clamp(1, height);
    let scaled = imageops::resize(image, new_w, new_h, imageops::FilterType::Triangle);

    let mut padded = RgbImage::from_pixel(width, height, Rgb([0, 0, 0]));
    imageops::replace(
        &mut padded,
        &scaled,
        ((width - new_w) / 2) as i64,
        ((height - new_h) / 2) as i64,
    );
    padded
}

/// NCHW float tensor, each channel scaled to [0, 1] then standardised.
pub fn image_to_tensor(
    image: &RgbImage,
    config: &ModelConfig,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let (width, height) = config.input_shape;
    let input = letterbox(image, width, height);

    let array = tract_ndarray::Array4::from_shape_fn(
        (1, 3, height as usize, width as usize),
        |(_, c, y, x)| {
            let value = input.get_pixel(x as u32, y as u32)[c] as f32 / 255.0;
            (value - config.mean[c]) / config.std[c]
        },
    );

    Ok(array.into_tensor())
}
