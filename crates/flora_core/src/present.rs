//! Turns a synthesized distribution into the rows shown in the results
//! table.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// One line of the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub label: String,
    /// Normalized confidence in [0,1].
    pub confidence: f64,
}

/// How labels are attached to the sorted confidence sequence. The two
/// historical UI variants disagreed on this, so both ship as options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairingPolicy {
    /// Zip labels with confidences and sort the pairs together; every label
    /// appears exactly once and the ranking is coherent.
    #[default]
    Paired,
    /// Keep the confidences in sorted order but pick each row's label
    /// uniformly at random; duplicates are possible and label identity
    /// carries no meaning.
    Independent,
}

impl PairingPolicy {
    pub fn display_name(&self) -> &'static str {
        match self {
            PairingPolicy::Paired => "Paired ranking",
            PairingPolicy::Independent => "Independent labels",
        }
    }
}

/// Build display rows from labels and a descending confidence sequence.
/// `confidences` is expected sorted descending; the paired policy re-sorts
/// after zipping so the pairing survives intact either way.
pub fn build_rows<R: Rng>(
    rng: &mut R,
    policy: PairingPolicy,
    labels: &[String],
    confidences: &[f64],
) -> Vec<ResultRow> {
    match policy {
        PairingPolicy::Paired => {
            let mut rows: Vec<ResultRow> = labels
                .iter()
                .zip(confidences)
                .map(|(label, &confidence)| ResultRow {
                    label: label.clone(),
                    confidence,
                })
                .collect();
            rows.sort_by(|a, b| {
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            rows
        }
        PairingPolicy::Independent => confidences
            .iter()
            .map(|&confidence| ResultRow {
                label: labels
                    .choose(rng)
                    .cloned()
                    .unwrap_or_default(),
                confidence,
            })
            .collect(),
    }
}

/// Hue in degrees for the confidence color cue: 0 is red, 120 is green.
pub fn confidence_hue(confidence: f64) -> f32 {
    (120.0 * confidence.clamp(0.0, 1.0)) as f32
}

/// Percentage string shown in the table, e.g. "87.32%".
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}
