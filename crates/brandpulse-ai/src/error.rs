use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// One of the four fitted artifacts that make up a model bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Vectorizer,
    Encoder,
    Classifier,
    LabelDecoder,
}

impl Artifact {
    /// All artifacts, in load order.
    pub const ALL: [Artifact; 4] = [
        Artifact::Vectorizer,
        Artifact::Encoder,
        Artifact::Classifier,
        Artifact::LabelDecoder,
    ];

    /// File name of the artifact inside a bundle directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Vectorizer => "tfidf_vectorizer.json",
            Self::Encoder => "brand_encoder.json",
            Self::Classifier => "sentiment_model.json",
            Self::LabelDecoder => "label_encoder.json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vectorizer => "text vectorizer",
            Self::Encoder => "brand encoder",
            Self::Classifier => "classifier",
            Self::LabelDecoder => "label decoder",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal model bundle problem, surfaced at load time and never per prediction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{artifact} artifact not found: {}", path.display())]
    Missing { artifact: Artifact, path: PathBuf },

    #[error("failed to read {artifact} artifact {}: {source}", path.display())]
    Read {
        artifact: Artifact,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {artifact} artifact {}: {source}", path.display())]
    Parse {
        artifact: Artifact,
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid {artifact} artifact: {reason}")]
    Invalid { artifact: Artifact, reason: String },

    #[error(
        "feature width mismatch: vectorizer ({text_dim}) + encoder ({brand_dim}) = {}, classifier expects {classifier_dim}",
        text_dim + brand_dim
    )]
    DimensionMismatch {
        text_dim: usize,
        brand_dim: usize,
        classifier_dim: usize,
    },

    #[error("classifier class id {class_id} has no label (decoder knows {n_labels})")]
    UndecodableClass { class_id: usize, n_labels: usize },
}

impl ConfigError {
    pub(crate) fn invalid(artifact: Artifact, reason: impl Into<String>) -> Self {
        Self::Invalid {
            artifact,
            reason: reason.into(),
        }
    }

    /// The artifact at fault, if the error concerns a single one.
    pub fn artifact(&self) -> Option<Artifact> {
        match self {
            Self::Missing { artifact, .. }
            | Self::Read { artifact, .. }
            | Self::Parse { artifact, .. }
            | Self::Invalid { artifact, .. } => Some(*artifact),
            Self::DimensionMismatch { .. } | Self::UndecodableClass { .. } => None,
        }
    }
}
