//! Sentiment prediction over a shared model bundle.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bundle::ModelBundle;
use crate::error::ConfigError;
use crate::features::compose;
use crate::normalize::normalize;
use crate::sparse::SparseVector;

/// Brand used when the caller does not supply one.
pub const DEFAULT_BRAND: &str = "unknown";

/// One prediction input. Both fields may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
}

impl PredictionRequest {
    pub fn new(text: impl Into<String>, brand: Option<&str>) -> Self {
        Self {
            text: Some(text.into()),
            brand: brand.map(str::to_string),
        }
    }
}

/// Sentiment predictor.
///
/// Cheap to clone; clones share the same [`ModelBundle`]. Prediction is pure
/// and takes `&self`, so one predictor can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Predictor {
    bundle: Arc<ModelBundle>,
}

impl Predictor {
    pub fn new(bundle: Arc<ModelBundle>) -> Self {
        Self { bundle }
    }

    /// Load a bundle from `dir` and wrap it.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        Ok(Self::new(Arc::new(ModelBundle::load(dir)?)))
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    /// Feature vector for already-normalised text, `V + B` wide.
    pub fn compose(&self, normalized_text: &str, brand: &str) -> SparseVector {
        compose(
            self.bundle.vectorizer(),
            self.bundle.encoder(),
            normalized_text,
            brand,
        )
    }

    /// Predict the sentiment label of `text` for `brand`
    /// (default [`DEFAULT_BRAND`]).
    ///
    /// Never fails: empty text and unseen brands still map to whatever label
    /// the model assigns to that region of feature space.
    pub fn predict(&self, text: &str, brand: Option<&str>) -> &str {
        let brand = brand.unwrap_or(DEFAULT_BRAND);
        let clean = normalize(text);
        let features = self.compose(&clean, brand);
        let class_id = self.bundle.classifier().predict(&features);

        // Every classifier class id decodes; checked in ModelBundle::from_parts.
        let label = self.bundle.labels().decode(class_id).unwrap_or_default();
        debug!(
            brand,
            known_brand = self.bundle.encoder().is_known(brand),
            nnz = features.nnz(),
            class_id,
            label,
            "predicted sentiment"
        );
        label
    }

    /// Predict for a request whose fields may be absent.
    pub fn predict_request(&self, request: &PredictionRequest) -> &str {
        self.predict(
            request.text.as_deref().unwrap_or_default(),
            request.brand.as_deref(),
        )
    }

    /// Predict one label per request, in input order.
    pub fn predict_batch(&self, requests: &[PredictionRequest]) -> Vec<&str> {
        requests.iter().map(|r| self.predict_request(r)).collect()
    }
}
