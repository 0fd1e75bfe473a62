use std::io::Cursor;

use anyhow::{Context, Result};
use ap_core::frame::RasterImage;
use image::{ImageFormat, RgbImage};

/// Encode une image en PNG (RGB8, sans perte).
///
/// # Errors
/// Returns an error if the buffer does not match its dimensions or the
/// encoder fails.
///
/// # Example
/// ```
/// use ap_core::frame::RasterImage;
/// use ap_export::png::encode_png;
/// let bytes = encode_png(&RasterImage::new(2, 2)).unwrap();
/// assert_eq!(&bytes[1..4], b"PNG");
/// ```
pub fn encode_png(img: &RasterImage) -> Result<Vec<u8>> {
    let buffer = RgbImage::from_raw(img.width, img.height, img.data.clone()).with_context(|| {
        format!(
            "Buffer RGB incohérent : {} octets pour {}×{}",
            img.data.len(),
            img.width,
            img.height
        )
    })?;
    let mut bytes = Vec::new();
    buffer
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("Encodage PNG échoué")?;
    log::debug!("PNG encodé : {} octets", bytes.len());
    Ok(bytes)
}

/// Décode un PNG vers un buffer RGB.
///
/// Alpha and palette images are converted to RGB8.
///
/// # Errors
/// Returns an error if the bytes are not a readable PNG.
pub fn decode_png(bytes: &[u8]) -> Result<RasterImage> {
    let rgb = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .context("Décodage PNG échoué")?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(RasterImage {
        data: rgb.into_raw(),
        width,
        height,
    })
}
