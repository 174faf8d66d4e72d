//! Feature composition: text block and brand block joined into one vector.
//!
//! The classifier was trained on `[tfidf(text) | one_hot(brand)]`. Swapping
//! the blocks would not fail, it would silently give wrong predictions, so
//! the order lives in one place: [`FEATURE_BLOCKS`].

use std::ops::Range;

use crate::encoder::BrandEncoder;
use crate::sparse::SparseVector;
use crate::tfidf::TfidfVectorizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureBlock {
    /// TF-IDF of the normalised text, width V.
    Text,
    /// One-hot brand, width B.
    Brand,
}

/// Column order of the composed vector. Must match training.
pub const FEATURE_BLOCKS: [FeatureBlock; 2] = [FeatureBlock::Text, FeatureBlock::Brand];

/// Widths of the feature blocks, fixed when the bundle is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLayout {
    pub text_dim: usize,
    pub brand_dim: usize,
}

impl FeatureLayout {
    pub fn new(vectorizer: &TfidfVectorizer, encoder: &BrandEncoder) -> Self {
        Self {
            text_dim: vectorizer.dim(),
            brand_dim: encoder.dim(),
        }
    }

    /// Total width V + B.
    pub fn width(&self) -> usize {
        self.text_dim + self.brand_dim
    }

    pub fn block_dim(&self, block: FeatureBlock) -> usize {
        match block {
            FeatureBlock::Text => self.text_dim,
            FeatureBlock::Brand => self.brand_dim,
        }
    }

    /// Columns occupied by `block` in the composed vector.
    pub fn range(&self, block: FeatureBlock) -> Range<usize> {
        let start: usize = FEATURE_BLOCKS
            .iter()
            .take_while(|&&b| b != block)
            .map(|&b| self.block_dim(b))
            .sum();
        start..start + self.block_dim(block)
    }
}

/// Build the classifier input for already-normalised text and a brand.
///
/// Always `V + B` wide. Unknown brands follow the encoder's policy; empty
/// text gives an all-zero text block.
pub fn compose(
    vectorizer: &TfidfVectorizer,
    encoder: &BrandEncoder,
    normalized_text: &str,
    brand: &str,
) -> SparseVector {
    let blocks: Vec<SparseVector> = FEATURE_BLOCKS
        .iter()
        .map(|block| match block {
            FeatureBlock::Text => vectorizer.transform(normalized_text),
            FeatureBlock::Brand => encoder.encode(brand),
        })
        .collect();
    SparseVector::concat(&blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::EncoderArtifact;
    use crate::tfidf::VectorizerArtifact;
    use serde_json::json;

    fn parts() -> (TfidfVectorizer, BrandEncoder) {
        let v: VectorizerArtifact = serde_json::from_value(json!({
            "vocabulary": {"love": 0, "hate": 1, "shoes": 2},
            "norm": null
        }))
        .unwrap();
        let e: EncoderArtifact = serde_json::from_value(json!({
            "categories": ["adidas", "nike"],
            "handle_unknown": "ignore"
        }))
        .unwrap();
        (v.try_into().unwrap(), e.try_into().unwrap())
    }

    #[test]
    fn text_block_first_brand_block_second() {
        let (v, e) = parts();
        let x = compose(&v, &e, "love shoes", "nike");
        assert_eq!(x.to_dense(), vec![1.0, 0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn width_is_constant() {
        let (v, e) = parts();
        let layout = FeatureLayout::new(&v, &e);
        let inputs = [
            ("", ""),
            ("love", "nike"),
            ("zzz yyy", "reebok"),
            ("hate", "adidas"),
        ];
        for (text, brand) in inputs {
            assert_eq!(compose(&v, &e, text, brand).dim(), layout.width());
        }
    }

    #[test]
    fn text_only_changes_text_columns() {
        let (v, e) = parts();
        let layout = FeatureLayout::new(&v, &e);
        let a = compose(&v, &e, "love", "nike").to_dense();
        let b = compose(&v, &e, "hate shoes", "nike").to_dense();
        let brand = layout.range(FeatureBlock::Brand);
        assert_eq!(a[brand.clone()], b[brand]);
    }

    #[test]
    fn brand_only_changes_brand_columns() {
        let (v, e) = parts();
        let layout = FeatureLayout::new(&v, &e);
        let a = compose(&v, &e, "love", "nike").to_dense();
        let b = compose(&v, &e, "love", "adidas").to_dense();
        let text = layout.range(FeatureBlock::Text);
        assert_eq!(a[text.clone()], b[text]);
        assert_ne!(a, b);
    }

    #[test]
    fn layout_ranges_follow_block_order() {
        let (v, e) = parts();
        let layout = FeatureLayout::new(&v, &e);
        assert_eq!(layout.range(FeatureBlock::Text), 0..3);
        assert_eq!(layout.range(FeatureBlock::Brand), 3..5);
        assert_eq!(layout.width(), 5);
    }
}
