//! Core logic for the FloraView demo classifier: mock result synthesis,
//! result presentation, image loading, camera frame sources, and the
//! event-driven session state machine the GUI renders from.

pub mod camera;
pub mod error;
pub mod export;
pub mod image_load;
pub mod model;
pub mod present;
pub mod session;
pub mod synth;

pub use camera::{FrameSource, TestPatternSource};
pub use error::FloraError;
pub use export::export_csv;
pub use image_load::{LoadedImage, load_image};
pub use model::{CLASS_LABELS, ModelProfile, ModelRegistry};
pub use present::{PairingPolicy, ResultRow, confidence_hue, format_confidence};
pub use session::{CameraOpener, Effect, Event, Session, SessionConfig};
pub use synth::{SynthesisMode, synthesize, synthesize_uniform, synthesize_weighted};

#[cfg(feature = "camera")]
pub use camera::OpenCvSource;
