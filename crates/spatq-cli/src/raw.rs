//! Headerless raw RGB image I/O.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use ndarray::Array2;
use spatq_core::color::Rgb;

/// Load a headerless 8-bit interleaved RGB file, mapping bytes to
/// [0, 1] by division by 255.
pub fn load_rgb(path: &Path, width: usize, height: usize) -> Result<Array2<Rgb>> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let expected = width * height * 3;
    if bytes.len() < expected {
        bail!(
            "{} holds {} bytes, expected {} for {}x{} RGB",
            path.display(),
            bytes.len(),
            expected,
            width,
            height
        );
    }
    Ok(Array2::from_shape_fn((height, width), |(y, x)| {
        let at = (y * width + x) * 3;
        Rgb::new(
            bytes[at] as f64 / 255.0,
            bytes[at + 1] as f64 / 255.0,
            bytes[at + 2] as f64 / 255.0,
        )
    }))
}

/// Save an indexed image through its palette as headerless 8-bit
/// interleaved RGB (truncating 255*v, saturating to [0, 255]).
pub fn save_rgb(path: &Path, indices: &Array2<u8>, palette: &[Rgb]) -> Result<()> {
    let (h, w) = indices.dim();
    let mut bytes = Vec::with_capacity(h * w * 3);
    for y in 0..h {
        for x in 0..w {
            let color = palette[indices[[y, x]] as usize];
            for k in 0..Rgb::CHANNELS {
                bytes.push((255.0 * color[k]) as u8);
            }
        }
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
