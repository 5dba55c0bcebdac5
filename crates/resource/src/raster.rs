//! Decoding of PNG/JPEG assets into the raw RGB form the PDF writer embeds.

use crate::provider::ResourceError;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use smartspend_types::EncodedImage;

/// Decodes `bytes` and flattens any alpha channel onto white.
pub fn decode_image(bytes: &[u8]) -> Result<EncodedImage, ResourceError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ResourceError::InvalidFormat(e.to_string()))?;
    to_encoded(&decoded)
}

pub fn to_encoded(image: &DynamicImage) -> Result<EncodedImage, ResourceError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ResourceError::InvalidFormat(format!(
            "image has no pixels ({}x{})",
            width, height
        )));
    }

    let rgba = image.to_rgba8();
    let mut flat = RgbImage::new(width, height);
    for (x, y, px) in rgba.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        let blend = |c: u8| -> u8 {
            let alpha = a as u16;
            ((c as u16 * alpha + 255 * (255 - alpha)) / 255) as u8
        };
        flat.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }

    EncodedImage::new(width, height, flat.into_raw()).ok_or_else(|| {
        ResourceError::InvalidFormat(format!("pixel buffer does not match {}x{}", width, height))
    })
}
