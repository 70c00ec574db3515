// src/services/image_exporter.rs
//
// PNG export of the visible canvas.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::RgbaImage;

use crate::error::EffectError;

/// Save the canvas as a PNG under `output_dir`. Without a filename a
/// timestamped one is generated; an explicit name gets `.png` appended
/// when it lacks the extension.
pub fn save_png(
    image: &RgbaImage,
    output_dir: &Path,
    filename: Option<&str>,
) -> Result<PathBuf, EffectError> {
    fs::create_dir_all(output_dir)
        .map_err(|e| EffectError::Export(format!("creating {}: {e}", output_dir.display())))?;

    let name = match filename {
        Some(name) if name.ends_with(".png") => name.to_string(),
        Some(name) => format!("{name}.png"),
        None => format!("kinetic_typography_{}.png", unix_seconds()),
    };

    let path = output_dir.join(name);
    image
        .save(&path)
        .map_err(|e| EffectError::Export(format!("writing {}: {e}", path.display())))?;

    println!("Canvas saved: {}", path.display());
    Ok(path)
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
