//! Class id → label decoding.

use serde::{Deserialize, Serialize};

use crate::error::{Artifact, ConfigError};

/// Serialized form of a fitted label decoder (`label_encoder.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelArtifact {
    /// Label for each class id, indexed by id.
    pub classes: Vec<String>,
}

/// Maps classifier class ids back to human-readable labels.
///
/// The label set comes from the artifact; nothing here knows about
/// "positive" or "negative".
#[derive(Debug, Clone)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl TryFrom<LabelArtifact> for LabelDecoder {
    type Error = ConfigError;

    fn try_from(artifact: LabelArtifact) -> Result<Self, Self::Error> {
        if artifact.classes.is_empty() {
            return Err(ConfigError::invalid(Artifact::LabelDecoder, "no labels"));
        }
        Ok(Self {
            classes: artifact.classes,
        })
    }
}

impl LabelDecoder {
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.classes
    }

    /// Label for `class_id`, or `None` if the decoder does not know it.
    pub fn decode(&self, class_id: usize) -> Option<&str> {
        self.classes.get(class_id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_by_index() {
        let dec = LabelDecoder::try_from(LabelArtifact {
            classes: vec!["negative".into(), "neutral".into(), "positive".into()],
        })
        .unwrap();
        assert_eq!(dec.len(), 3);
        assert_eq!(dec.decode(2), Some("positive"));
        assert_eq!(dec.decode(3), None);
    }

    #[test]
    fn rejects_empty_label_set() {
        let err = LabelDecoder::try_from(LabelArtifact { classes: vec![] }).unwrap_err();
        assert_eq!(err.artifact(), Some(Artifact::LabelDecoder));
    }
}
