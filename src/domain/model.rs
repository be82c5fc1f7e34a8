// ============================================================
// MODEL TYPES
// ============================================================
// Persisted classifier formats and the capability tag that decides,
// once at load time, how a raw model output becomes a probability.

use serde::{Deserialize, Serialize};

/// A persisted linear classifier tagged with its output capability.
///
/// The tag replaces runtime probing of the model object: a
/// `probability` model yields a class-1 probability directly, a
/// `margin` model yields a decision margin that still needs the
/// logistic transform, and a `label` model only emits a raw
/// prediction, which is reported as the probability unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    Probability { weights: Vec<f64>, intercept: f64 },
    Margin { weights: Vec<f64>, intercept: f64 },
    Label { weights: Vec<f64>, intercept: f64 },
}

impl Classifier {
    fn raw_score(&self, input: &[f64]) -> f64 {
        let (weights, intercept) = match self {
            Classifier::Probability { weights, intercept }
            | Classifier::Margin { weights, intercept }
            | Classifier::Label { weights, intercept } => (weights, intercept),
        };
        weights
            .iter()
            .zip(input.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + intercept
    }

    /// Score an input vector, applying the transform this model's
    /// capability calls for.
    pub fn probability(&self, input: &[f64]) -> f64 {
        let raw = self.raw_score(input);
        match self {
            Classifier::Probability { .. } | Classifier::Margin { .. } => sigmoid(raw),
            Classifier::Label { .. } => raw,
        }
    }
}

/// A loaded classifier plus the feature order its input vector expects.
/// Built once at startup and never mutated or reloaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    pub classifier: Classifier,
    pub feature_names: Vec<String>,
}

/// Dict-style artifact consumed by the batch scorer: classifier plus
/// the label list (class index to class name) and feature columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchBundle {
    #[serde(default = "unknown_model_name")]
    pub model_name: String,
    pub model: Classifier,
    pub labels: Vec<String>,
    pub feature_cols: Vec<String>,
}

fn unknown_model_name() -> String {
    "unknown_model".to_string()
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
