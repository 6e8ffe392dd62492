use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use overmap_core::SeenImage;
use png::{BitDepth, ColorType, Encoder};
use tracing::info;

/// Encodes the image as an 8-bit RGBA PNG.
pub fn encode_png(image: &SeenImage) -> Result<Vec<u8>, png::EncodingError> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, image.width(), image.height());
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);

        let mut writer = enc.write_header()?;
        writer.write_image_data(image.pixels())?;
        writer.finish()?;
    }
    Ok(buf)
}

/// Writes the image to `path` as PNG, replacing any existing file.
pub fn save_png(image: &SeenImage, path: &Path) -> Result<()> {
    let bytes = encode_png(image).wrap_err("Failed to encode seen map")?;
    std::fs::write(path, &bytes)
        .wrap_err_with(|| format!("Failed to write seen map {}", path.display()))?;

    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        "saved seen map"
    );
    Ok(())
}
