//! Model bundle: the four fitted artifacts, loaded and validated together.
//!
//! A bundle directory must contain `tfidf_vectorizer.json`,
//! `brand_encoder.json`, `sentiment_model.json` and `label_encoder.json`.
//! Every consistency check happens here so that a broken bundle fails at
//! startup rather than on the first prediction.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::classifier::{ClassifierArtifact, LinearClassifier};
use crate::encoder::{BrandEncoder, EncoderArtifact, UnknownBrand};
use crate::error::{Artifact, ConfigError};
use crate::features::FeatureLayout;
use crate::labels::{LabelArtifact, LabelDecoder};
use crate::tfidf::{TfidfVectorizer, VectorizerArtifact};

/// Immutable set of fitted artifacts shared by every prediction.
///
/// Holds only plain data, so it is `Send + Sync` and can sit behind an
/// `Arc` without locking.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    vectorizer: TfidfVectorizer,
    encoder: BrandEncoder,
    classifier: LinearClassifier,
    labels: LabelDecoder,
    layout: FeatureLayout,
}

/// Shape of a loaded bundle, for startup logs and `inspect-models`.
#[derive(Debug, Clone)]
pub struct BundleSummary {
    pub text_dim: usize,
    pub brand_dim: usize,
    pub n_features: usize,
    pub labels: Vec<String>,
    pub brands: Vec<String>,
    pub unknown_brand: UnknownBrand,
}

impl ModelBundle {
    /// Load and validate a bundle from `dir`.
    ///
    /// Checks that all four files exist before parsing any of them, so the
    /// error names the first missing artifact.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        for artifact in Artifact::ALL {
            let path = dir.join(artifact.file_name());
            if !path.is_file() {
                return Err(ConfigError::Missing { artifact, path });
            }
        }

        let vectorizer: VectorizerArtifact = read_artifact(dir, Artifact::Vectorizer)?;
        let encoder: EncoderArtifact = read_artifact(dir, Artifact::Encoder)?;
        let classifier: ClassifierArtifact = read_artifact(dir, Artifact::Classifier)?;
        let labels: LabelArtifact = read_artifact(dir, Artifact::LabelDecoder)?;

        let bundle = Self::from_parts(
            vectorizer.try_into()?,
            encoder.try_into()?,
            classifier.try_into()?,
            labels.try_into()?,
        )?;

        let layout = bundle.layout;
        info!(
            dir = %dir.display(),
            text_dim = layout.text_dim,
            brand_dim = layout.brand_dim,
            labels = bundle.labels.len(),
            "loaded model bundle"
        );
        Ok(bundle)
    }

    /// Assemble a bundle from already-built artifacts.
    ///
    /// Verifies that `V + B` equals the classifier input width and that
    /// every classifier class id has a label.
    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        encoder: BrandEncoder,
        classifier: LinearClassifier,
        labels: LabelDecoder,
    ) -> Result<Self, ConfigError> {
        let layout = FeatureLayout::new(&vectorizer, &encoder);
        if layout.width() != classifier.n_features() {
            return Err(ConfigError::DimensionMismatch {
                text_dim: layout.text_dim,
                brand_dim: layout.brand_dim,
                classifier_dim: classifier.n_features(),
            });
        }

        if let Some(&class_id) = classifier
            .classes()
            .iter()
            .find(|&&id| labels.decode(id).is_none())
        {
            return Err(ConfigError::UndecodableClass {
                class_id,
                n_labels: labels.len(),
            });
        }

        Ok(Self {
            vectorizer,
            encoder,
            classifier,
            labels,
            layout,
        })
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn encoder(&self) -> &BrandEncoder {
        &self.encoder
    }

    pub fn classifier(&self) -> &LinearClassifier {
        &self.classifier
    }

    pub fn labels(&self) -> &LabelDecoder {
        &self.labels
    }

    /// Block widths, fixed at load time.
    pub fn layout(&self) -> FeatureLayout {
        self.layout
    }

    pub fn summary(&self) -> BundleSummary {
        BundleSummary {
            text_dim: self.layout.text_dim,
            brand_dim: self.layout.brand_dim,
            n_features: self.classifier.n_features(),
            labels: self
                .classifier
                .classes()
                .iter()
                .filter_map(|&id| self.labels.decode(id))
                .map(str::to_string)
                .collect(),
            brands: self.encoder.categories().to_vec(),
            unknown_brand: self.encoder.unknown_policy().clone(),
        }
    }
}

fn read_artifact<T: DeserializeOwned>(dir: &Path, artifact: Artifact) -> Result<T, ConfigError> {
    let path = dir.join(artifact.file_name());
    let bytes = std::fs::read(&path).map_err(|source| ConfigError::Read {
        artifact,
        path: path.clone(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
        artifact,
        path,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn write_bundle(dir: &Path) {
        let files = [
            (
                Artifact::Vectorizer,
                json!({"vocabulary": {"great": 0, "awful": 1}, "idf": [1.0, 1.0]}),
            ),
            (
                Artifact::Encoder,
                json!({"categories": ["nike", "unknown"], "handle_unknown": {"fallback": "unknown"}}),
            ),
            (
                Artifact::Classifier,
                json!({
                    "classes": [0, 1],
                    "coef": [[-2.0, 2.0, 0.0, 0.0], [2.0, -2.0, 0.0, 0.0]],
                    "intercept": [0.1, 0.0]
                }),
            ),
            (
                Artifact::LabelDecoder,
                json!({"classes": ["negative", "positive"]}),
            ),
        ];
        for (artifact, value) in files {
            fs::write(dir.join(artifact.file_name()), value.to_string()).unwrap();
        }
    }

    #[test]
    fn loads_consistent_bundle() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());

        let bundle = ModelBundle::load(dir.path()).unwrap();
        assert_eq!(bundle.layout().text_dim, 2);
        assert_eq!(bundle.layout().brand_dim, 2);
        assert_eq!(bundle.classifier().n_features(), 4);

        let summary = bundle.summary();
        assert_eq!(summary.labels, vec!["negative", "positive"]);
        assert_eq!(summary.unknown_brand, UnknownBrand::Fallback("unknown".into()));
    }

    #[test]
    fn each_missing_artifact_is_reported() {
        for missing in Artifact::ALL {
            let dir = tempfile::tempdir().unwrap();
            write_bundle(dir.path());
            fs::remove_file(dir.path().join(missing.file_name())).unwrap();

            match ModelBundle::load(dir.path()) {
                Err(ConfigError::Missing { artifact, .. }) => assert_eq!(artifact, missing),
                other => panic!("expected Missing for {missing}, got {other:?}"),
            }
        }
    }

    #[test]
    fn each_corrupt_artifact_is_reported() {
        for corrupt in Artifact::ALL {
            let dir = tempfile::tempdir().unwrap();
            write_bundle(dir.path());
            fs::write(dir.path().join(corrupt.file_name()), b"\x80not json").unwrap();

            match ModelBundle::load(dir.path()) {
                Err(ConfigError::Parse { artifact, .. }) => assert_eq!(artifact, corrupt),
                other => panic!("expected Parse for {corrupt}, got {other:?}"),
            }
        }
    }

    #[test]
    fn width_mismatch_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        // Classifier trained on a wider vocabulary than the vectoriser provides.
        fs::write(
            dir.path().join(Artifact::Classifier.file_name()),
            json!({
                "classes": [0, 1],
                "coef": [[1.0, 0.0, 0.0, 0.0, 0.0]],
                "intercept": [0.0]
            })
            .to_string(),
        )
        .unwrap();

        match ModelBundle::load(dir.path()) {
            Err(ConfigError::DimensionMismatch {
                text_dim,
                brand_dim,
                classifier_dim,
            }) => {
                assert_eq!((text_dim, brand_dim, classifier_dim), (2, 2, 5));
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn class_without_label_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        fs::write(
            dir.path().join(Artifact::LabelDecoder.file_name()),
            json!({"classes": ["negative"]}).to_string(),
        )
        .unwrap();

        assert!(matches!(
            ModelBundle::load(dir.path()),
            Err(ConfigError::UndecodableClass {
                class_id: 1,
                n_labels: 1
            })
        ));
    }

    #[test]
    fn invalid_artifact_content_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        fs::write(
            dir.path().join(Artifact::Encoder.file_name()),
            json!({"categories": ["nike"], "handle_unknown": {"fallback": "other"}}).to_string(),
        )
        .unwrap();

        let err = ModelBundle::load(dir.path()).unwrap_err();
        assert_eq!(err.artifact(), Some(Artifact::Encoder));
    }

    #[test]
    fn bundle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ModelBundle>();
    }
}
