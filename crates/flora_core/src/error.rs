use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while loading images or reading camera
/// frames. None of these are fatal to the application; the GUI surfaces
/// file errors in a modal and skips failed camera frames.
#[derive(Debug, Error)]
pub enum FloraError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("unsupported or corrupt image: {path} ({reason})")]
    UnsupportedOrCorruptImage { path: PathBuf, reason: String },

    #[error("camera frame read failure: {0}")]
    CameraFrameReadFailure(String),
}

impl FloraError {
    /// Short kind name shown in the error dialog alongside the full message.
    pub fn kind(&self) -> &'static str {
        match self {
            FloraError::FileNotFound { .. } => "FileNotFound",
            FloraError::PermissionDenied { .. } => "PermissionDenied",
            FloraError::UnsupportedOrCorruptImage { .. } => "UnsupportedOrCorruptImage",
            FloraError::CameraFrameReadFailure(_) => "CameraFrameReadFailure",
        }
    }

    /// Path the error refers to, when it concerns a file on disk.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            FloraError::FileNotFound { path }
            | FloraError::PermissionDenied { path }
            | FloraError::UnsupportedOrCorruptImage { path, .. } => Some(path),
            FloraError::CameraFrameReadFailure(_) => None,
        }
    }
}
