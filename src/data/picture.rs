//! Grayscale picture helpers: read a drawn digit as a network input, write a
//! network vector (e.g. a dream) back out as a picture.
use image::{imageops::FilterType, GrayImage, Luma};

use crate::data::mnist_csv::normalize_pixel;
use crate::error::DatasetError;

/// Decodes an image file, resizes it to `width × height`, converts to
/// grayscale and normalises each pixel like a CSV pixel.
///
/// Returns a row-major `Vec<f64>` of length `width * height`.
pub fn load_grayscale_input(path: &str, width: u32, height: u32) -> Result<Vec<f64>, DatasetError> {
    let img = image::open(path)?;
    let resized = img.resize_exact(width, height, FilterType::Triangle);
    let gray = resized.to_luma8();
    Ok(gray.pixels().map(|p| normalize_pixel(p.0[0] as f64)).collect())
}

/// Renders a row-major vector of values in (0, 1) as an 8-bit grayscale image.
///
/// # Panics
/// Panics if `values.len() != width * height`.
pub fn to_grayscale_image(values: &[f64], width: u32, height: u32) -> GrayImage {
    assert_eq!(
        values.len(),
        pixel_count(width, height),
        "vector length must equal width * height"
    );
    GrayImage::from_fn(width, height, |x, y| {
        let v = values[y as usize * width as usize + x as usize];
        Luma([(v * 256.0).clamp(0.0, 255.0) as u8])
    })
}

/// `width * height` computed in `usize`, so large dimensions cannot wrap.
pub fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Writes `values` as a PNG; see [`to_grayscale_image`].
pub fn save_grayscale_png(values: &[f64], width: u32, height: u32, path: &str) -> Result<(), DatasetError> {
    to_grayscale_image(values, width, height).save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
