// ============================================================
// MODEL STORE
// ============================================================
// Loads persisted classifier artifacts: the serving bundle (model
// plus feature-name list, split across two files) and the dict-style
// batch bundle used by the scoring tool.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::error::{AppError, Result};
use crate::domain::model::{BatchBundle, Classifier, ModelBundle};

/// Load the serving bundle. Every failure mode is swallowed here: a
/// missing or unreadable artifact just means the service runs in
/// heuristic mode, so the caller only sees `None`.
pub fn load_model_bundle(model_path: &Path, features_path: &Path) -> Option<ModelBundle> {
    if !model_path.exists() || !features_path.exists() {
        return None;
    }
    match read_model_bundle(model_path, features_path) {
        Ok(bundle) => {
            info!(
                features = bundle.feature_names.len(),
                model = %model_path.display(),
                "Model bundle loaded"
            );
            Some(bundle)
        }
        Err(err) => {
            warn!(error = %err, "Failed to load model bundle, using heuristic scorer");
            None
        }
    }
}

fn read_model_bundle(model_path: &Path, features_path: &Path) -> Result<ModelBundle> {
    let classifier: Classifier = serde_json::from_str(&fs::read_to_string(model_path)?)
        .map_err(|err| AppError::ParseError(format!("Invalid model file: {}", err)))?;
    let feature_names: Vec<String> = serde_json::from_str(&fs::read_to_string(features_path)?)
        .map_err(|_| {
            AppError::ParseError("feature_names.json must be a JSON list of strings".to_string())
        })?;
    Ok(ModelBundle {
        classifier,
        feature_names,
    })
}

/// Load a batch bundle. Unlike the serving path this is fatal on
/// failure; the scoring tool has nothing to fall back to.
pub fn load_batch_bundle(path: &Path) -> Result<BatchBundle> {
    if !path.exists() {
        return Err(AppError::NotFound(format!(
            "Model bundle not found: {}",
            path.display()
        )));
    }
    serde_json::from_str(&fs::read_to_string(path)?)
        .map_err(|err| AppError::ParseError(format!("Invalid model bundle: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_model_bundle_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let model = write(
            dir.path(),
            "model.json",
            r#"{"kind":"probability","weights":[0.4,-0.2],"intercept":0.1}"#,
        );
        let features = write(
            dir.path(),
            "feature_names.json",
            r#"["koi_model_snr","koi_prad"]"#,
        );
        let bundle = load_model_bundle(&model, &features).expect("bundle should load");
        assert_eq!(bundle.feature_names, vec!["koi_model_snr", "koi_prad"]);
        assert!(matches!(bundle.classifier, Classifier::Probability { .. }));
    }

    #[test]
    fn test_missing_artifact_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let model = write(
            dir.path(),
            "model.json",
            r#"{"kind":"label","weights":[],"intercept":1.0}"#,
        );
        assert!(load_model_bundle(&model, &dir.path().join("absent.json")).is_none());
        assert!(load_model_bundle(&dir.path().join("absent.json"), &model).is_none());
    }

    #[test]
    fn test_malformed_feature_list_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let model = write(
            dir.path(),
            "model.json",
            r#"{"kind":"label","weights":[],"intercept":1.0}"#,
        );
        let features = write(dir.path(), "feature_names.json", r#"{"not":"a list"}"#);
        assert!(load_model_bundle(&model, &features).is_none());
    }

    #[test]
    fn test_load_batch_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "gradient_boosting.json",
            r#"{
                "model_name": "gradient_boosting",
                "model": {"kind":"margin","weights":[0.5],"intercept":0.0},
                "labels": ["FALSE POSITIVE", "CANDIDATE"],
                "feature_cols": ["koi_model_snr"]
            }"#,
        );
        let bundle = load_batch_bundle(&path).unwrap();
        assert_eq!(bundle.model_name, "gradient_boosting");
        assert_eq!(bundle.feature_cols, vec!["koi_model_snr"]);
    }

    #[test]
    fn test_missing_batch_bundle_is_fatal() {
        let err = load_batch_bundle(Path::new("models/nope.json")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
