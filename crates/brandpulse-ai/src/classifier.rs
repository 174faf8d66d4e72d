//! Fitted linear classifier over the composed feature vector.
//!
//! Scores each class as `coef[row] · x + intercept[row]`. A single row with
//! two classes is a binary model: a positive score selects the second class.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Artifact, ConfigError};
use crate::sparse::SparseVector;

/// Serialized form of a fitted linear model (`sentiment_model.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    /// Class ids understood by the label decoder.
    pub classes: Vec<usize>,
    /// `n_rows × n_features` weights.
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    classes: Vec<usize>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    n_features: usize,
}

impl TryFrom<ClassifierArtifact> for LinearClassifier {
    type Error = ConfigError;

    fn try_from(artifact: ClassifierArtifact) -> Result<Self, Self::Error> {
        let invalid = |reason: String| ConfigError::invalid(Artifact::Classifier, reason);
        let ClassifierArtifact {
            classes,
            coef,
            intercept,
        } = artifact;

        if classes.len() < 2 {
            return Err(invalid(format!("need at least 2 classes, got {}", classes.len())));
        }
        if classes.iter().collect::<HashSet<_>>().len() != classes.len() {
            return Err(invalid("duplicate class ids".into()));
        }

        let expected_rows = if classes.len() == 2 && coef.len() == 1 {
            1
        } else {
            classes.len()
        };
        if coef.len() != expected_rows {
            return Err(invalid(format!(
                "{} coefficient rows for {} classes",
                coef.len(),
                classes.len()
            )));
        }
        if intercept.len() != coef.len() {
            return Err(invalid(format!(
                "{} intercepts for {} coefficient rows",
                intercept.len(),
                coef.len()
            )));
        }

        let n_features = coef[0].len();
        if n_features == 0 {
            return Err(invalid("zero-width coefficient rows".into()));
        }
        if let Some(row) = coef.iter().position(|r| r.len() != n_features) {
            return Err(invalid(format!(
                "coefficient row {row} has {} weights, row 0 has {n_features}",
                coef[row].len()
            )));
        }
        if coef.iter().flatten().chain(&intercept).any(|w| !w.is_finite()) {
            return Err(invalid("non-finite weights".into()));
        }

        Ok(Self {
            classes,
            coef,
            intercept,
            n_features,
        })
    }
}

impl LinearClassifier {
    /// Expected input width.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    /// Raw score per coefficient row.
    pub fn decision_function(&self, x: &SparseVector) -> Vec<f64> {
        debug_assert_eq!(x.dim(), self.n_features);
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| x.dot(row) + b)
            .collect()
    }

    /// Predicted class id. Ties go to the earliest class.
    pub fn predict(&self, x: &SparseVector) -> usize {
        let scores = self.decision_function(x);

        if let [score] = scores.as_slice() {
            return if *score > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            };
        }

        let mut best = 0;
        for (i, &s) in scores.iter().enumerate().skip(1) {
            if s > scores[best] {
                best = i;
            }
        }
        self.classes[best]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classifier(value: serde_json::Value) -> Result<LinearClassifier, ConfigError> {
        let artifact: ClassifierArtifact = serde_json::from_value(value).unwrap();
        LinearClassifier::try_from(artifact)
    }

    fn x(dense: &[f64]) -> SparseVector {
        SparseVector::from_entries(dense.len(), dense.iter().copied().enumerate().collect())
    }

    #[test]
    fn multiclass_argmax() {
        let clf = classifier(json!({
            "classes": [0, 1, 2],
            "coef": [[1.0, 0.0], [0.0, 1.0], [-1.0, -1.0]],
            "intercept": [0.0, 0.0, 0.5]
        }))
        .unwrap();
        assert_eq!(clf.n_features(), 2);
        assert_eq!(clf.predict(&x(&[2.0, 1.0])), 0);
        assert_eq!(clf.predict(&x(&[0.0, 3.0])), 1);
        assert_eq!(clf.predict(&x(&[0.0, 0.0])), 2);
    }

    #[test]
    fn ties_go_to_first_class() {
        let clf = classifier(json!({
            "classes": [4, 7, 9],
            "coef": [[1.0], [1.0], [0.0]],
            "intercept": [0.0, 0.0, 0.0]
        }))
        .unwrap();
        assert_eq!(clf.predict(&x(&[1.0])), 4);
    }

    #[test]
    fn binary_single_row() {
        let clf = classifier(json!({
            "classes": [0, 1],
            "coef": [[2.0, -1.0]],
            "intercept": [0.0]
        }))
        .unwrap();
        assert_eq!(clf.predict(&x(&[1.0, 0.0])), 1);
        assert_eq!(clf.predict(&x(&[0.0, 1.0])), 0);
        // Zero score is not positive.
        assert_eq!(clf.predict(&x(&[0.0, 0.0])), 0);
    }

    #[test]
    fn decision_function_uses_intercept() {
        let clf = classifier(json!({
            "classes": [0, 1],
            "coef": [[1.0, 1.0], [0.0, 0.0]],
            "intercept": [0.25, -0.5]
        }))
        .unwrap();
        assert_eq!(clf.decision_function(&x(&[1.0, 2.0])), vec![3.25, -0.5]);
    }

    #[test]
    fn rejects_inconsistent_shapes() {
        // Ragged rows.
        assert!(classifier(json!({
            "classes": [0, 1, 2],
            "coef": [[1.0, 0.0], [0.0], [1.0, 1.0]],
            "intercept": [0.0, 0.0, 0.0]
        }))
        .is_err());
        // Intercept count.
        assert!(classifier(json!({
            "classes": [0, 1, 2],
            "coef": [[1.0], [0.0], [1.0]],
            "intercept": [0.0]
        }))
        .is_err());
        // Row count vs classes.
        assert!(classifier(json!({
            "classes": [0, 1, 2],
            "coef": [[1.0], [0.0]],
            "intercept": [0.0, 0.0]
        }))
        .is_err());
    }

    #[test]
    fn rejects_degenerate_class_lists() {
        assert!(classifier(json!({"classes": [0], "coef": [[1.0]], "intercept": [0.0]})).is_err());
        assert!(classifier(json!({
            "classes": [1, 1],
            "coef": [[1.0]],
            "intercept": [0.0]
        }))
        .is_err());
    }
}
