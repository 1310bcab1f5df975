use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::Index;


/// The scores a classifier assigns to one document.
/// `categories[i]` is scored `scores[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Document id in the classified index.
    pub document: usize,
    /// Category ids, in the classifier's own numbering.
    pub categories: Vec<usize>,
    /// One score per entry of `categories`.
    pub scores: Vec<f64>,
}


impl ClassificationResult {
    /// Construct an empty result for `document`.
    #[inline]
    pub fn new(document: usize) -> Self {
        Self { document, categories: Vec::new(), scores: Vec::new() }
    }


    /// Construct a result scoring the categories `0..scores.len()`.
    #[inline]
    pub fn dense(document: usize, scores: Vec<f64>) -> Self {
        let categories = (0..scores.len()).collect();
        Self { document, categories, scores }
    }


    /// Append the score of `category`.
    #[inline]
    pub fn push(&mut self, category: usize, score: f64) {
        self.categories.push(category);
        self.scores.push(score);
    }


    /// Number of scored categories.
    #[inline]
    pub fn len(&self) -> usize {
        self.categories.len()
    }


    /// Returns `true` if no category is scored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }


    /// Iterate over `(category, score)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.categories.iter()
            .copied()
            .zip(self.scores.iter().copied())
    }


    /// Returns the score of `category`, if it was scored.
    pub fn score_of(&self, category: usize) -> Option<f64> {
        self.iter()
            .find(|(c, _)| *c == category)
            .map(|(_, s)| s)
    }
}


/// The decision border and the score range of one category.
/// A document is assigned to the category iff `score >= border`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierRange {
    /// Decision threshold.
    pub border: f64,
    /// Smallest attainable score.
    pub minimum: f64,
    /// Largest attainable score.
    pub maximum: f64,
}


impl ClassifierRange {
    /// Border `0` over `(-∞, +∞)`, the range of a boosting margin.
    pub fn unbounded() -> Self {
        Self {
            border: 0f64,
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
        }
    }


    /// Returns `true` if `score` is on the positive side of the border.
    #[inline]
    pub fn accepts(&self, score: f64) -> bool {
        score >= self.border
    }
}


/// A trait that defines the behavor of classifier.
/// You need to implement `n_categories`, `classify`
/// and `classifier_range`.
pub trait Classifier {
    /// Number of categories this classifier scores.
    fn n_categories(&self) -> usize;


    /// Scores `document` of `index`.
    fn classify(&self, index: &dyn Index, document: usize)
        -> ClassificationResult;


    /// Decision border and score range of `category`.
    fn classifier_range(&self, category: usize) -> ClassifierRange;


    /// Set the number of boosting rounds used at classification time.
    /// Classifiers without rounds ignore it.
    fn set_iterations(&mut self, _iterations: usize) {}


    /// Categories of `result` whose score passes the border.
    fn accepted(&self, result: &ClassificationResult) -> Vec<usize> {
        result.iter()
            .filter(|&(c, s)| self.classifier_range(c).accepts(s))
            .map(|(c, _)| c)
            .collect()
    }


    /// Scores every document of `index`.
    fn classify_all(&self, index: &dyn Index) -> Vec<ClassificationResult>
        where Self: Sync,
    {
        (0..index.n_documents()).into_par_iter()
            .map(|d| self.classify(index, d))
            .collect()
    }
}
