//! Downloaded-image transcoding.
//!
//! Every localized image is shrunk to 30% of its original size for small
//! e-reader screens. JPEG sources stay JPEG (alpha flattened onto white);
//! everything else is re-encoded as PNG.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use thiserror::Error;

/// Linear scale applied to both dimensions.
const SCALE_FACTOR: f32 = 0.3;

const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("decode failed: {0}")]
    Decode(image::ImageError),

    #[error("encode failed: {0}")]
    Encode(image::ImageError),

    #[error("shrunk dimensions {width}x{height} are empty")]
    Empty { width: u32, height: u32 },
}

#[derive(Debug, Clone)]
pub struct Transcoded {
    pub data: Vec<u8>,
    pub extension: &'static str,
    pub media_type: &'static str,
}

/// Decode, shrink to exactly `floor(0.3·w) × floor(0.3·h)`, and re-encode.
///
/// The caller is expected to fall back to the original bytes when this
/// fails; no image should be lost to a transcoding problem.
pub fn shrink(bytes: &[u8]) -> Result<Transcoded, TranscodeError> {
    let format = image::guess_format(bytes).map_err(TranscodeError::Decode)?;
    let original =
        image::load_from_memory_with_format(bytes, format).map_err(TranscodeError::Decode)?;

    let width = (original.width() as f32 * SCALE_FACTOR) as u32;
    let height = (original.height() as f32 * SCALE_FACTOR) as u32;
    if width == 0 || height == 0 {
        return Err(TranscodeError::Empty { width, height });
    }

    let resized = original.resize_exact(width, height, FilterType::Lanczos3);

    let mut data = Vec::new();
    if format == ImageFormat::Jpeg {
        let flattened = flatten_onto_white(&resized);
        JpegEncoder::new_with_quality(&mut data, JPEG_QUALITY)
            .encode_image(&flattened)
            .map_err(TranscodeError::Encode)?;
        Ok(Transcoded {
            data,
            extension: "jpg",
            media_type: "image/jpeg",
        })
    } else {
        resized
            .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
            .map_err(TranscodeError::Encode)?;
        Ok(Transcoded {
            data,
            extension: "png",
            media_type: "image/png",
        })
    }
}

/// Blend any alpha channel onto a white background; JPEG carries no alpha.
fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha)) / 255) as u8;
        rgb.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }
    rgb
}
