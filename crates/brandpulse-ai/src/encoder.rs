//! Fitted one-hot brand encoder.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Artifact, ConfigError};
use crate::sparse::SparseVector;

/// What to emit for a brand outside the fitted categories.
///
/// Part of the artifact, not a pipeline assumption. No "error" policy exists:
/// an unseen brand must still produce a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownBrand {
    /// All-zero brand block.
    Ignore,
    /// Encode as the named category, which must be one of the fitted ones.
    Fallback(String),
}

/// Serialized form of a fitted encoder (`brand_encoder.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderArtifact {
    /// Fitted categories; position is the output column.
    pub categories: Vec<String>,
    pub handle_unknown: UnknownBrand,
}

#[derive(Debug, Clone)]
pub struct BrandEncoder {
    categories: Vec<String>,
    columns: HashMap<String, usize>,
    unknown: UnknownBrand,
    fallback_column: Option<usize>,
}

impl TryFrom<EncoderArtifact> for BrandEncoder {
    type Error = ConfigError;

    fn try_from(artifact: EncoderArtifact) -> Result<Self, Self::Error> {
        if artifact.categories.is_empty() {
            return Err(ConfigError::invalid(Artifact::Encoder, "no categories"));
        }

        let mut columns = HashMap::with_capacity(artifact.categories.len());
        for (col, category) in artifact.categories.iter().enumerate() {
            if columns.insert(category.clone(), col).is_some() {
                return Err(ConfigError::invalid(
                    Artifact::Encoder,
                    format!("duplicate category {category:?}"),
                ));
            }
        }

        let fallback_column = match &artifact.handle_unknown {
            UnknownBrand::Ignore => None,
            UnknownBrand::Fallback(category) => match columns.get(category) {
                Some(&col) => Some(col),
                None => {
                    return Err(ConfigError::invalid(
                        Artifact::Encoder,
                        format!("fallback category {category:?} is not a fitted category"),
                    ));
                }
            },
        };

        Ok(Self {
            categories: artifact.categories,
            columns,
            unknown: artifact.handle_unknown,
            fallback_column,
        })
    }
}

impl BrandEncoder {
    /// Output width (number of fitted categories).
    pub fn dim(&self) -> usize {
        self.categories.len()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn unknown_policy(&self) -> &UnknownBrand {
        &self.unknown
    }

    pub fn is_known(&self, brand: &str) -> bool {
        self.columns.contains_key(brand)
    }

    /// One-hot encode `brand`. Matching is exact.
    pub fn encode(&self, brand: &str) -> SparseVector {
        let col = self.columns.get(brand).copied().or(self.fallback_column);
        match col {
            Some(col) => SparseVector::from_entries(self.dim(), vec![(col, 1.0)]),
            None => SparseVector::zeros(self.dim()),
        }
    }
}
