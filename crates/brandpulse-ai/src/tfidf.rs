//! Fitted TF-IDF text vectoriser.
//!
//! Mirrors the usual TF-IDF transform: tokens are runs of two or more word
//! characters, word n-grams are joined by a single space, out-of-vocabulary
//! terms are ignored, counts are optionally log-scaled, weighted by IDF and
//! normalised.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Artifact, ConfigError};
use crate::sparse::SparseVector;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

/// Output normalisation of the TF-IDF vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized form of a fitted vectoriser (`tfidf_vectorizer.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// Term → output column.
    pub vocabulary: HashMap<String, usize>,
    /// One weight per column. Absent when the model was fitted without IDF.
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    /// `null` disables normalisation.
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default)]
    pub stop_words: Vec<String>,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_lowercase() -> bool {
    true
}

/// TF-IDF vectoriser producing sparse vectors of a fixed width.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
    lowercase: bool,
    stop_words: HashSet<String>,
}

impl TryFrom<VectorizerArtifact> for TfidfVectorizer {
    type Error = ConfigError;

    fn try_from(artifact: VectorizerArtifact) -> Result<Self, Self::Error> {
        let invalid = |reason: String| ConfigError::invalid(Artifact::Vectorizer, reason);
        let dim = artifact.vocabulary.len();

        if dim == 0 {
            return Err(invalid("empty vocabulary".into()));
        }

        let mut seen = vec![false; dim];
        for (term, &col) in &artifact.vocabulary {
            if col >= dim {
                return Err(invalid(format!(
                    "term {term:?} maps to column {col}, vocabulary has {dim} terms"
                )));
            }
            if std::mem::replace(&mut seen[col], true) {
                return Err(invalid(format!("column {col} assigned to more than one term")));
            }
        }

        if let Some(idf) = &artifact.idf {
            if idf.len() != dim {
                return Err(invalid(format!(
                    "idf has {} weights, vocabulary has {dim} terms",
                    idf.len()
                )));
            }
            if idf.iter().any(|w| !w.is_finite()) {
                return Err(invalid("idf contains non-finite weights".into()));
            }
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(invalid(format!("bad ngram_range ({min_n}, {max_n})")));
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            lowercase: artifact.lowercase,
            stop_words: artifact.stop_words.into_iter().collect(),
        })
    }
}

impl TfidfVectorizer {
    /// Output width (vocabulary size).
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    /// Transform one document. Empty or fully out-of-vocabulary text gives
    /// the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let dim = self.dim();
        let text = if self.lowercase {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        };

        let tokens: Vec<&str> = TOKEN
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut hits = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&col) = self.vocabulary.get(&term) {
                    hits.push((col, 1.0));
                }
            }
        }

        let counts = SparseVector::from_entries(dim, hits);
        let weighted = counts
            .iter()
            .map(|(col, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                let weight = self.idf.as_ref().map_or(1.0, |idf| idf[col]);
                (col, tf * weight)
            })
            .collect();

        let mut vector = SparseVector::from_entries(dim, weighted);
        match self.norm {
            Some(Norm::L2) => vector.normalize_l2(),
            Some(Norm::L1) => vector.normalize_l1(),
            None => {}
        }
        vector
    }
}
