use serde::{Deserialize, Serialize};

/// A mock model entry shown in the model picker. The confidence factor
/// biases the synthetic distribution toward higher top-1 values; nothing
/// here loads an actual network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub name: String,
    pub description: String,
    /// Weighting constant in (0,1] used by the weighted synthesizer.
    pub confidence_factor: f64,
}

/// Read-only collection of model profiles, fixed after construction.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    profiles: Vec<ModelProfile>,
}

impl ModelRegistry {
    pub fn new(profiles: Vec<ModelProfile>) -> Self {
        Self { profiles }
    }

    /// The three demo profiles shipped with the application.
    pub fn builtin() -> Self {
        Self::new(vec![
            ModelProfile {
                name: "ResNet-50".to_string(),
                description: "Deep residual network\nTop-1 accuracy: 76.3%\nParameters: 25.6M"
                    .to_string(),
                confidence_factor: 0.8,
            },
            ModelProfile {
                name: "EfficientNet-B4".to_string(),
                description: "Efficient convolutional network\nTop-1 accuracy: 82.9%\nParameters: 19.3M"
                    .to_string(),
                confidence_factor: 0.9,
            },
            ModelProfile {
                name: "Vision Transformer".to_string(),
                description: "Vision transformer\nTop-1 accuracy: 81.8%\nParameters: 86.6M"
                    .to_string(),
                confidence_factor: 0.85,
            },
        ])
    }

    pub fn get(&self, name: &str) -> Option<&ModelProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn profiles(&self) -> &[ModelProfile] {
        &self.profiles
    }

    /// Name of the profile selected when the application starts.
    pub fn default_name(&self) -> &str {
        &self.profiles[0].name
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The flower categories presented as classification candidates.
pub const CLASS_LABELS: [&str; 5] = ["Rose", "Tulip", "Sunflower", "Daisy", "Orchid"];
