use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};

use crate::errors::{VdResult, VoiceDeskError};

/// Downscale so neither side exceeds `max_dimension` (Lanczos keeps on-screen
/// text readable) and encode as JPEG at the given quality.
pub fn encode_frame(image: RgbaImage, max_dimension: u32, quality: u8) -> VdResult<Vec<u8>> {
    let (w, h) = image.dimensions();
    let dynamic = DynamicImage::ImageRgba8(image);

    let scaled = if w > max_dimension || h > max_dimension {
        let scale = max_dimension as f64 / w.max(h) as f64;
        let nw = ((w as f64 * scale).round() as u32).max(1);
        let nh = ((h as f64 * scale).round() as u32).max(1);
        dynamic.resize_exact(nw, nh, FilterType::Lanczos3)
    } else {
        dynamic
    };

    let rgb = scaled.to_rgb8();
    let mut bytes = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode_image(&rgb)
        .map_err(|e| VoiceDeskError::Vision(format!("JPEG encode failed: {e}")))?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_frames_are_downscaled_preserving_aspect() {
        let frame = RgbaImage::from_pixel(2560, 1440, image::Rgba([10, 20, 30, 255]));
        let jpeg = encode_frame(frame, 1280, 85).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.width(), 1280);
        assert_eq!(decoded.height(), 720);
    }

    #[test]
    fn small_frames_keep_their_size() {
        let frame = RgbaImage::from_pixel(640, 480, image::Rgba([0, 0, 0, 255]));
        let jpeg = encode_frame(frame, 1280, 85).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (640, 480));
    }
}
