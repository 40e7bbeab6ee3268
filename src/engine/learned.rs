//! Learned classifier seam: a frozen per-span label predictor.
//!
//! Training and persistence happen elsewhere; this module consumes the
//! artifact through a narrow interface. Any implementation that maps the
//! fixed feature vector to a label satisfies the arbiter's contract.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::engine::text::{is_all_caps, is_title_case, is_western};
use crate::error::{Error, Result};
use crate::model::{HeadingLevel, Span};

/// Fixed-order numeric/boolean features describing one span.
///
/// Case-shape features are computed only for text recognizable as a
/// Western-script run and are zeroed otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    /// Font size in points
    pub size: f32,
    /// Vertical position (top edge)
    pub top: f32,
    /// Index of the span's font in the model's font map
    pub font_index: usize,
    /// All letters uppercase
    pub is_upper: bool,
    /// Text ends with a colon
    pub ends_with_colon: bool,
    /// Text is title-cased
    pub is_title_case: bool,
    /// Whitespace-separated word count
    pub word_count: usize,
    /// Character count
    pub char_count: usize,
    /// First character is a digit
    pub starts_with_digit: bool,
}

impl FeatureVector {
    /// Build the feature vector for a span given its font index.
    pub fn from_span(span: &Span, font_index: usize) -> Self {
        let text = span.text.trim();
        let western = is_western(text);
        Self {
            size: span.size,
            top: span.top,
            font_index,
            is_upper: western && is_all_caps(text),
            ends_with_colon: text.ends_with(':'),
            is_title_case: western && is_title_case(text),
            word_count: text.split_whitespace().count(),
            char_count: text.chars().count(),
            starts_with_digit: text.chars().next().is_some_and(|c| c.is_ascii_digit()),
        }
    }

    /// Flatten into the fixed numeric order the artifact was trained on.
    pub fn to_array(&self) -> [f32; 9] {
        [
            self.size,
            self.top,
            self.font_index as f32,
            self.is_upper as u8 as f32,
            self.ends_with_colon as u8 as f32,
            self.is_title_case as u8 as f32,
            self.word_count as f32,
            self.char_count as f32,
            self.starts_with_digit as u8 as f32,
        ]
    }
}

/// Label returned by a learned classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelVerdict {
    /// A heading label
    Label(HeadingLevel),
    /// The span looks like the document title, not a heading
    Title,
    /// Explicitly not a heading
    NotHeading,
    /// The span's font was unseen during training; abstain
    UnknownFont,
}

/// A frozen inference artifact: feature vector in, label out.
pub trait LearnedClassifier: Send + Sync {
    /// Index of a font in the artifact's font map, `None` for fonts unseen
    /// during training.
    fn font_index(&self, font: &str) -> Option<usize>;

    /// Predict a label for a feature vector.
    fn predict(&self, features: &FeatureVector) -> ModelVerdict;

    /// Classify a span end to end, abstaining on unknown fonts.
    fn classify(&self, span: &Span) -> ModelVerdict {
        match self.font_index(&span.font) {
            Some(idx) => self.predict(&FeatureVector::from_span(span, idx)),
            None => ModelVerdict::UnknownFont,
        }
    }
}

/// A linear argmax model loaded from a JSON artifact.
///
/// The artifact carries one weight row (plus bias) per label and the font
/// map the model was trained with. Labels use the training vocabulary:
/// `"H1"`, `"H2"`, `"H3"`, `"title"`, and `"O"` for non-headings.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    labels: Vec<String>,
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
    fonts: Vec<String>,
}

impl LinearModel {
    /// Load a model from a JSON file, validating the shape.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let model: LinearModel = serde_json::from_str(&data)
            .map_err(|e| Error::Model(format!("invalid model artifact: {}", e)))?;
        model.validate()?;
        Ok(model)
    }

    /// Build a model from parts (used by tests and embedders).
    pub fn from_parts(
        labels: Vec<String>,
        weights: Vec<Vec<f32>>,
        bias: Vec<f32>,
        fonts: Vec<String>,
    ) -> Result<Self> {
        let model = Self {
            labels,
            weights,
            bias,
            fonts,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.labels.is_empty() {
            return Err(Error::Model("model has no labels".to_string()));
        }
        if self.weights.len() != self.labels.len() || self.bias.len() != self.labels.len() {
            return Err(Error::Model(
                "label, weight, and bias counts disagree".to_string(),
            ));
        }
        if self.weights.iter().any(|row| row.len() != 9) {
            return Err(Error::Model(
                "weight rows must have 9 entries (one per feature)".to_string(),
            ));
        }
        Ok(())
    }

    fn label_verdict(label: &str) -> ModelVerdict {
        match label {
            "H1" => ModelVerdict::Label(HeadingLevel::H1),
            "H2" => ModelVerdict::Label(HeadingLevel::H2),
            "H3" => ModelVerdict::Label(HeadingLevel::H3),
            "title" => ModelVerdict::Title,
            _ => ModelVerdict::NotHeading,
        }
    }
}

impl LearnedClassifier for LinearModel {
    fn font_index(&self, font: &str) -> Option<usize> {
        self.fonts.iter().position(|f| f == font)
    }

    fn predict(&self, features: &FeatureVector) -> ModelVerdict {
        let x = features.to_array();
        let mut best = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (i, row) in self.weights.iter().enumerate() {
            let score: f32 = row.iter().zip(x.iter()).map(|(w, v)| w * v).sum::<f32>()
                + self.bias[i];
            if score > best_score {
                best_score = score;
                best = i;
            }
        }
        Self::label_verdict(&self.labels[best])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, font: &str, size: f32, top: f32) -> Span {
        Span {
            text: text.to_string(),
            font: font.to_string(),
            size,
            page: 1,
            top,
            left: 0.0,
            right: 100.0,
        }
    }

    #[test]
    fn test_feature_vector_order() {
        let f = FeatureVector::from_span(&span("1. Scope:", "Helvetica", 14.0, 80.0), 2);
        let arr = f.to_array();
        assert_eq!(arr[0], 14.0); // size
        assert_eq!(arr[1], 80.0); // top
        assert_eq!(arr[2], 2.0); // font index
        assert_eq!(arr[4], 1.0); // ends with colon
        assert_eq!(arr[8], 1.0); // starts with digit
        assert_eq!(f.word_count, 2);
    }

    #[test]
    fn test_case_features_zeroed_for_non_western() {
        let f = FeatureVector::from_span(&span("第一章", "Mincho", 14.0, 80.0), 0);
        assert!(!f.is_upper);
        assert!(!f.is_title_case);
        assert_eq!(f.char_count, 3);
    }

    #[test]
    fn test_unknown_font_abstains() {
        let model = LinearModel::from_parts(
            vec!["O".to_string()],
            vec![vec![0.0; 9]],
            vec![0.0],
            vec!["Helvetica".to_string()],
        )
        .unwrap();

        let verdict = model.classify(&span("Anything", "Wingdings", 20.0, 10.0));
        assert_eq!(verdict, ModelVerdict::UnknownFont);
    }

    #[test]
    fn test_argmax_prediction() {
        // Two labels: "H1" scores the size feature, "O" is flat
        let model = LinearModel::from_parts(
            vec!["H1".to_string(), "O".to_string()],
            vec![
                vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                vec![0.0; 9],
            ],
            vec![-12.0, 0.0],
            vec!["Helvetica".to_string()],
        )
        .unwrap();

        assert_eq!(
            model.classify(&span("Big", "Helvetica", 20.0, 10.0)),
            ModelVerdict::Label(HeadingLevel::H1)
        );
        assert_eq!(
            model.classify(&span("small", "Helvetica", 9.0, 10.0)),
            ModelVerdict::NotHeading
        );
    }

    #[test]
    fn test_shape_validation() {
        let bad = LinearModel::from_parts(
            vec!["H1".to_string()],
            vec![vec![0.0; 4]],
            vec![0.0],
            vec![],
        );
        assert!(bad.is_err());
    }
}
