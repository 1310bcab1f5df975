//! Defines `AdaBoost` (AdaBoost.MH) and its additive classifier.
//! This struct is based on the paper:
//! "BoosTexter: A Boosting-based System for Text Categorization"
//! by Robert E. Schapire and Yoram Singer.
pub mod adaboost_algorithm;
pub mod adaboost_classifier;

pub use adaboost_algorithm::{AdaBoost, AdaBoostTrainer};
pub use adaboost_classifier::AdaBoostClassifier;
