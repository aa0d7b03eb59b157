//! Application state machine. UI events come in as [`Event`] values, state
//! transitions happen here, and [`Effect`]s go back out so the rendering
//! layer knows what changed. No widget code lives in this module.

use crate::camera::FrameSource;
use crate::error::FloraError;
use crate::image_load::{self, LoadedImage};
use crate::model::ModelRegistry;
use crate::present::{self, PairingPolicy, ResultRow};
use crate::synth::{self, SynthesisMode};
use rand::Rng;
use std::path::PathBuf;

/// Opens the capture device on camera toggle-on. Injected so the GUI can
/// plug in OpenCV or a test pattern and tests can plug in fakes.
pub type CameraOpener = Box<dyn FnMut() -> Result<Box<dyn FrameSource>, FloraError> + Send>;

/// Discrete UI events the session reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    LoadImage(PathBuf),
    SelectModel(String),
    SetPairing(PairingPolicy),
    ToggleCamera,
    FrameTick,
}

/// What the rendering layer must refresh after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ImageShown,
    ImageCleared,
    ResultsUpdated,
    ResultsCleared,
    CameraStarted,
    CameraStopped,
}

/// The two knobs the historical UI variants disagreed on, promoted to
/// explicit configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub pairing: PairingPolicy,
    pub synthesis: SynthesisMode,
}

/// All mutable application state: current model, current display image,
/// result rows, and the camera handle. One instance per window, driven
/// from a single thread; event handlers never overlap.
pub struct Session<R: Rng> {
    registry: ModelRegistry,
    labels: Vec<String>,
    config: SessionConfig,
    current_model: String,
    rng: R,
    rows: Vec<ResultRow>,
    display: Option<LoadedImage>,
    camera: Option<Box<dyn FrameSource>>,
    open_camera: CameraOpener,
}

impl<R: Rng> Session<R> {
    pub fn new(
        registry: ModelRegistry,
        labels: Vec<String>,
        config: SessionConfig,
        rng: R,
        open_camera: CameraOpener,
    ) -> Self {
        let current_model = registry.default_name().to_string();
        Self {
            registry,
            labels,
            config,
            current_model,
            rng,
            rows: Vec::new(),
            display: None,
            camera: None,
            open_camera,
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn current_model(&self) -> &str {
        &self.current_model
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn display(&self) -> Option<&LoadedImage> {
        self.display.as_ref()
    }

    pub fn camera_active(&self) -> bool {
        self.camera.is_some()
    }

    /// Apply one event. On an `Err` from `LoadImage` the display and the
    /// result rows have already been cleared; the caller only has to show
    /// the error to the user.
    pub fn apply(&mut self, event: Event) -> Result<Vec<Effect>, FloraError> {
        match event {
            Event::LoadImage(path) => self.load_image(path),
            Event::SelectModel(name) => Ok(self.select_model(name)),
            Event::SetPairing(policy) => Ok(self.set_pairing(policy)),
            Event::ToggleCamera => self.toggle_camera(),
            Event::FrameTick => Ok(self.frame_tick()),
        }
    }

    fn load_image(&mut self, path: PathBuf) -> Result<Vec<Effect>, FloraError> {
        match image_load::load_image(&path) {
            Ok(img) => {
                self.display = Some(img);
                self.synthesize();
                Ok(vec![Effect::ImageShown, Effect::ResultsUpdated])
            }
            Err(e) => {
                self.display = None;
                self.rows.clear();
                Err(e)
            }
        }
    }

    fn select_model(&mut self, name: String) -> Vec<Effect> {
        if self.registry.get(&name).is_none() {
            tracing::warn!("ignoring unknown model selection: {name}");
            return Vec::new();
        }
        self.current_model = name;
        if self.display.is_some() {
            self.synthesize();
            vec![Effect::ResultsUpdated]
        } else {
            Vec::new()
        }
    }

    fn set_pairing(&mut self, policy: PairingPolicy) -> Vec<Effect> {
        self.config.pairing = policy;
        if self.display.is_some() {
            self.synthesize();
            vec![Effect::ResultsUpdated]
        } else {
            Vec::new()
        }
    }

    fn toggle_camera(&mut self) -> Result<Vec<Effect>, FloraError> {
        if self.camera.is_none() {
            let source = (self.open_camera)()?;
            self.camera = Some(source);
            Ok(vec![Effect::CameraStarted])
        } else {
            // Dropping the source releases the device before the next tick
            // could run; handlers never overlap on the UI thread.
            self.camera = None;
            self.display = None;
            Ok(vec![Effect::CameraStopped, Effect::ImageCleared])
        }
    }

    fn frame_tick(&mut self) -> Vec<Effect> {
        let Some(camera) = self.camera.as_mut() else {
            return Vec::new();
        };
        match camera.read_frame() {
            Ok(frame) => {
                self.display = Some(frame);
                self.synthesize();
                vec![Effect::ImageShown, Effect::ResultsUpdated]
            }
            Err(e) => {
                // Keep the previous frame and rows; the capture loop goes on.
                tracing::warn!("camera frame skipped: {e}");
                Vec::new()
            }
        }
    }

    fn synthesize(&mut self) {
        let factor = self
            .registry
            .get(&self.current_model)
            .map(|p| p.confidence_factor)
            .unwrap_or(1.0);
        let confidences = synth::synthesize(
            &mut self.rng,
            self.config.synthesis,
            factor,
            self.labels.len(),
        );
        self.rows = present::build_rows(
            &mut self.rng,
            self.config.pairing,
            &self.labels,
            &confidences,
        );
    }
}
