//! Defines `TreeBoost`, which decomposes a category tree into
//! one boosting problem per internal node.
pub mod address;
pub mod negatives;
pub mod treeboost_algorithm;
pub mod treeboost_classifier;

pub use address::{Address, Level};
pub use negatives::{
    NegativesChooser,
    AllNegatives,
    SiblingNegatives,
    CentroidNegatives,
    KnnNegatives,
    ClusterNegatives,
};
pub use treeboost_algorithm::TreeBoost;
pub use treeboost_classifier::{LevelNode, TreeBoostClassifier};
