//! Camera frame sources. The session only sees the [`FrameSource`] trait;
//! dropping a source releases the underlying device.

use crate::error::FloraError;
use crate::image_load::LoadedImage;

/// A live source of display frames. Implementations own the capture device
/// exclusively and release it on drop.
pub trait FrameSource {
    fn read_frame(&mut self) -> Result<LoadedImage, FloraError>;
}

/// Synthetic frame source producing a slowly shifting gradient. Used as the
/// default backend when the `camera` feature is off, and by tests.
pub struct TestPatternSource {
    width: u32,
    height: u32,
    tick: u32,
}

impl TestPatternSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tick: 0,
        }
    }
}

impl Default for TestPatternSource {
    fn default() -> Self {
        Self::new(320, 240)
    }
}

impl FrameSource for TestPatternSource {
    fn read_frame(&mut self) -> Result<LoadedImage, FloraError> {
        self.tick = self.tick.wrapping_add(1);
        let mut pixels = Vec::with_capacity((self.width * self.height * 4) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let r = ((x * 255 / self.width.max(1)) + self.tick) % 256;
                let g = (y * 255 / self.height.max(1)) % 256;
                let b = (self.tick * 2) % 256;
                pixels.extend_from_slice(&[r as u8, g as u8, b as u8, 255]);
            }
        }
        Ok(LoadedImage::from_rgba(self.width, self.height, pixels))
    }
}

#[cfg(feature = "camera")]
pub use self::opencv_backend::OpenCvSource;

#[cfg(feature = "camera")]
mod opencv_backend {
    use super::FrameSource;
    use crate::error::FloraError;
    use crate::image_load::LoadedImage;
    use opencv::{core::Mat, imgproc, prelude::*, videoio};

    /// Webcam capture via OpenCV. `VideoCapture` releases the device when
    /// dropped, which gives the toggle-off semantics the session relies on.
    pub struct OpenCvSource {
        capture: videoio::VideoCapture,
    }

    impl OpenCvSource {
        /// Open device 0 (the default webcam).
        pub fn open() -> Result<Self, FloraError> {
            let capture = videoio::VideoCapture::new(0, videoio::CAP_ANY)
                .map_err(|e| FloraError::CameraFrameReadFailure(e.to_string()))?;
            let opened = capture
                .is_opened()
                .map_err(|e| FloraError::CameraFrameReadFailure(e.to_string()))?;
            if !opened {
                return Err(FloraError::CameraFrameReadFailure(
                    "could not open capture device 0".to_string(),
                ));
            }
            Ok(Self { capture })
        }
    }

    impl FrameSource for OpenCvSource {
        fn read_frame(&mut self) -> Result<LoadedImage, FloraError> {
            let mut bgr = Mat::default();
            let ok = self
                .capture
                .read(&mut bgr)
                .map_err(|e| FloraError::CameraFrameReadFailure(e.to_string()))?;
            if !ok || bgr.empty() {
                return Err(FloraError::CameraFrameReadFailure(
                    "device returned an empty frame".to_string(),
                ));
            }

            let mut rgba = Mat::default();
            imgproc::cvt_color_def(&bgr, &mut rgba, imgproc::COLOR_BGR2RGBA)
                .map_err(|e| FloraError::CameraFrameReadFailure(e.to_string()))?;

            let width = rgba.cols() as u32;
            let height = rgba.rows() as u32;
            let pixels = rgba
                .data_bytes()
                .map_err(|e| FloraError::CameraFrameReadFailure(e.to_string()))?
                .to_vec();
            Ok(LoadedImage::from_rgba(width, height, pixels))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_frames_have_expected_size() {
        let mut src = TestPatternSource::new(8, 4);
        let frame = src.read_frame().unwrap();
        assert_eq!((frame.width, frame.height), (8, 4));
        assert_eq!(frame.pixels.len(), 8 * 4 * 4);
    }

    #[test]
    fn test_pattern_moves_between_ticks() {
        let mut src = TestPatternSource::new(8, 4);
        let a = src.read_frame().unwrap();
        let b = src.read_frame().unwrap();
        assert_ne!(a.pixels, b.pixels);
    }
}
