use crate::error::FloraError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Decoded RGBA8 image ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Load and decode an image for display. The file picker already filters on
/// extension, but the check is repeated here so paths arriving by other
/// routes get the same treatment.
pub fn load_image(path: impl AsRef<Path>) -> Result<LoadedImage, FloraError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FloraError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if !is_supported_image(path) {
        return Err(FloraError::UnsupportedOrCorruptImage {
            path: path.to_path_buf(),
            reason: "unsupported extension (expected png, jpg or jpeg)".to_string(),
        });
    }

    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FloraError::FileNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => FloraError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => FloraError::UnsupportedOrCorruptImage {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    let img = image::load_from_memory(&bytes).map_err(|e| {
        FloraError::UnsupportedOrCorruptImage {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LoadedImage::from_rgba(width, height, rgba.into_raw()))
}

pub(crate) fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => {
            let ext = ext.to_ascii_lowercase();
            matches!(ext.as_str(), "jpg" | "jpeg" | "png")
        }
        None => false,
    }
}
