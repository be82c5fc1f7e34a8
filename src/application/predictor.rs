// ============================================================
// PREDICTOR
// ============================================================
// Scores a feature set with the loaded bundle when one exists,
// otherwise with a fixed heuristic over four KOI measurements.

use serde_json::{Map, Value};

use crate::domain::model::{sigmoid, ModelBundle};

// Heuristic design parameters. Each contribution is weighted and
// independently clamped to its cap before normalization; they are not
// learned values.
const SNR_WEIGHT: f64 = 0.15;
const SNR_CAP: f64 = 100.0;
const DURATION_WEIGHT: f64 = 0.10;
const DURATION_CAP: f64 = 10.0; // hours
const DEPTH_WEIGHT: f64 = 0.10;
const DEPTH_CAP: f64 = 20_000.0; // ppm
const PRAD_WEIGHT: f64 = 0.05;
const PRAD_CENTER: f64 = 2.0; // Earth radii
const SCORE_OFFSET: f64 = -0.8;

pub const DECISION_THRESHOLD: f64 = 0.5;

pub struct Predictor {
    bundle: Option<ModelBundle>,
}

impl Predictor {
    pub fn new(bundle: Option<ModelBundle>) -> Self {
        Self { bundle }
    }

    pub fn model_loaded(&self) -> bool {
        self.bundle.is_some()
    }

    /// Probability in [0,1] for the given feature set. Missing or
    /// non-numeric features contribute 0.0; this path never fails.
    pub fn score(&self, features: &Map<String, Value>) -> f64 {
        match &self.bundle {
            Some(bundle) => {
                let input: Vec<f64> = bundle
                    .feature_names
                    .iter()
                    .map(|name| numeric(features.get(name)))
                    .collect();
                bundle.classifier.probability(&input)
            }
            None => heuristic_score(features),
        }
    }
}

/// Binary label at the 0.5 threshold.
pub fn decide(proba: f64) -> i32 {
    i32::from(proba >= DECISION_THRESHOLD)
}

/// Fallback scorer used when no bundle is loaded.
pub fn heuristic_score(features: &Map<String, Value>) -> f64 {
    let snr = numeric(features.get("koi_model_snr"));
    let duration = numeric(features.get("koi_duration"));
    let depth = numeric(features.get("koi_depth"));
    let prad = numeric(features.get("koi_prad"));

    let mut score = 0.0;
    score += SNR_WEIGHT * snr.min(SNR_CAP) / SNR_CAP;
    score += DURATION_WEIGHT * duration.min(DURATION_CAP) / DURATION_CAP;
    score += DEPTH_WEIGHT * depth.min(DEPTH_CAP) / DEPTH_CAP;
    // Peaks at the center radius, falls off linearly, and vanishes at
    // zero and at twice the center radius.
    score += PRAD_WEIGHT * (1.0 - (prad - PRAD_CENTER).abs() / PRAD_CENTER).max(0.0);
    sigmoid(score + SCORE_OFFSET)
}

/// Coerce a JSON value to f64: numbers and numeric strings pass,
/// booleans map to 0/1, everything else degrades to 0.0.
fn numeric(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Bool(b)) => f64::from(*b),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Classifier;
    use serde_json::json;

    fn features(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_heuristic_all_zero_features() {
        let proba = heuristic_score(&Map::new());
        assert!((proba - sigmoid(-0.8)).abs() < 1e-12);
        assert!((proba - 0.3100).abs() < 1e-4);
        assert_eq!(decide(proba), 0);
    }

    #[test]
    fn test_heuristic_saturated_contributions() {
        let input = features(json!({
            "koi_model_snr": 100,
            "koi_duration": 10,
            "koi_depth": 20000,
            "koi_prad": 2.0
        }));
        let proba = heuristic_score(&input);
        assert!((proba - sigmoid(-0.40)).abs() < 1e-12);
        assert!((proba - 0.401).abs() < 1e-3);
        assert_eq!(decide(proba), 0);
    }

    #[test]
    fn test_prad_contributes_nothing_at_zero() {
        let at_zero = features(json!({"koi_prad": 0.0}));
        assert_eq!(heuristic_score(&at_zero), heuristic_score(&Map::new()));

        let centered = features(json!({"koi_prad": 2.0}));
        assert!((heuristic_score(&centered) - sigmoid(0.05 - 0.8)).abs() < 1e-12);

        let far_out = features(json!({"koi_prad": 11.9}));
        assert_eq!(heuristic_score(&far_out), heuristic_score(&Map::new()));
    }

    #[test]
    fn test_heuristic_caps_large_values() {
        let capped = features(json!({"koi_model_snr": 100}));
        let excessive = features(json!({"koi_model_snr": 100000}));
        assert_eq!(heuristic_score(&capped), heuristic_score(&excessive));
    }

    #[test]
    fn test_non_numeric_features_degrade_to_zero() {
        let input = features(json!({
            "koi_model_snr": "not a number",
            "koi_duration": null,
            "koi_depth": [1, 2],
            "koi_prad": {"nested": true}
        }));
        assert_eq!(heuristic_score(&input), heuristic_score(&Map::new()));
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let text = features(json!({"koi_model_snr": "50"}));
        let number = features(json!({"koi_model_snr": 50}));
        assert_eq!(heuristic_score(&text), heuristic_score(&number));
    }

    #[test]
    fn test_bundle_orders_features_and_defaults_missing() {
        let predictor = Predictor::new(Some(ModelBundle {
            classifier: Classifier::Margin {
                weights: vec![1.0, 2.0],
                intercept: 0.0,
            },
            feature_names: vec!["a".into(), "b".into()],
        }));
        // b is absent, so the margin is 1.0 * 3.0 + 2.0 * 0.0.
        let proba = predictor.score(&features(json!({"a": 3.0, "unrelated": 9.0})));
        assert!((proba - sigmoid(3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_label_bundle_returns_raw_output() {
        let predictor = Predictor::new(Some(ModelBundle {
            classifier: Classifier::Label {
                weights: vec![],
                intercept: 0.25,
            },
            feature_names: vec![],
        }));
        assert_eq!(predictor.score(&Map::new()), 0.25);
        assert_eq!(decide(0.25), 0);
        assert_eq!(decide(0.5), 1);
    }

    #[test]
    fn test_no_bundle_reports_model_not_loaded() {
        assert!(!Predictor::new(None).model_loaded());
    }
}
