// src/engine/texture.rs
use std::path::Path;

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::GameError;

// Size of the generated placeholder texture
const FALLBACK_SIZE: u32 = 8;

/// Where a sprite's pixels come from: an image file, or a flat colour when no
/// file is given or it cannot be read.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TextureSource {
    #[serde(default)]
    pub path: Option<String>,
    pub color: [u8; 4],
}

impl TextureSource {
    pub fn solid(color: [u8; 4]) -> Self {
        Self { path: None, color }
    }

    pub fn file(path: &str, color: [u8; 4]) -> Self {
        Self {
            path: Some(path.to_string()),
            color,
        }
    }

    /// Decode the image file into RGBA8.
    pub fn decode(&self) -> Result<RgbaImage, GameError> {
        match &self.path {
            Some(path) => load_rgba(Path::new(path)),
            None => Ok(self.placeholder()),
        }
    }

    /// Like [`decode`](Self::decode), but never fails.
    pub fn decode_or_placeholder(&self) -> RgbaImage {
        match self.decode() {
            Ok(img) => img,
            Err(e) => {
                log::warn!(
                    "Falling back to solid colour for {:?}: {}",
                    self.path.as_deref().unwrap_or("<none>"),
                    e
                );
                self.placeholder()
            }
        }
    }

    fn placeholder(&self) -> RgbaImage {
        RgbaImage::from_pixel(FALLBACK_SIZE, FALLBACK_SIZE, Rgba(self.color))
    }
}

fn load_rgba(path: &Path) -> Result<RgbaImage, GameError> {
    let img = image::open(path)?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_source_decodes_to_colour() {
        let img = TextureSource::solid([10, 20, 30, 255]).decode().unwrap();
        assert_eq!(img.dimensions(), (FALLBACK_SIZE, FALLBACK_SIZE));
        assert!(img.pixels().all(|p| p.0 == [10, 20, 30, 255]));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let source = TextureSource::file("does/not/exist.png", [0, 0, 0, 255]);
        assert!(matches!(source.decode(), Err(GameError::Image(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_placeholder() {
        let source = TextureSource::file("does/not/exist.png", [255, 0, 0, 255]);
        let img = source.decode_or_placeholder();
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }
}
