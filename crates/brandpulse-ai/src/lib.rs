//! Sentiment inference: a fixed feature pipeline over a pre-trained linear model.
//!
//! `normalize` → [`compose`] (TF-IDF text block, then one-hot brand block) →
//! [`LinearClassifier`] → [`LabelDecoder`]. The four fitted artifacts travel
//! together as a [`ModelBundle`], loaded once and shared read-only.

mod bundle;
mod classifier;
mod encoder;
mod error;
mod features;
mod labels;
mod normalize;
mod predictor;
mod sparse;
mod tfidf;

pub use bundle::{BundleSummary, ModelBundle};
pub use classifier::{ClassifierArtifact, LinearClassifier};
pub use encoder::{BrandEncoder, EncoderArtifact, UnknownBrand};
pub use error::{Artifact, ConfigError};
pub use features::{FEATURE_BLOCKS, FeatureBlock, FeatureLayout, compose};
pub use labels::{LabelArtifact, LabelDecoder};
pub use normalize::normalize;
pub use predictor::{DEFAULT_BRAND, PredictionRequest, Predictor};
pub use sparse::SparseVector;
pub use tfidf::{Norm, TfidfVectorizer, VectorizerArtifact};
