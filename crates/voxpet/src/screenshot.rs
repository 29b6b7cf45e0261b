//! PNG encoding of rendered frames

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageBuffer, ImageFormat, Rgba};

/// Encode an RGBA buffer as PNG bytes
pub fn encode_png(buffer: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    let img: ImageBuffer<Rgba<u8>, _> =
        ImageBuffer::from_raw(width as u32, height as u32, buffer.to_vec())
            .context("Failed to create image from buffer")?;

    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(bytes.into_inner())
}

/// Write already-encoded PNG bytes to disk, creating parent directories
pub fn save_png(png: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, png).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Screenshot saved to {}", path.display());
    Ok(())
}
