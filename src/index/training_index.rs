//! Defines [`TrainingIndex`], the posting-list form of an index
//! used during one training run.
use fixedbitset::FixedBitSet;

use super::core::Index;


/// Posting lists and label bit sets collected once per `build` call.
/// Weak learners scan `postings` every round,
/// and the distribution update looks labels up in `labels`.
#[derive(Debug, Clone)]
pub struct TrainingIndex {
    n_documents: usize,
    n_features: usize,
    postings: Vec<Vec<usize>>,
    labels: Vec<FixedBitSet>,
}


impl TrainingIndex {
    /// Collect the posting lists and labels of `index`.
    pub fn from_index(index: &dyn Index) -> Self {
        let n_documents = index.n_documents();
        let n_features = index.n_features();
        let n_categories = index.n_categories();

        let mut postings = vec![Vec::new(); n_features];
        let mut labels = vec![FixedBitSet::with_capacity(n_documents); n_categories];
        for d in 0..n_documents {
            for f in index.document_features(d) {
                if let Some(list) = postings.get_mut(f) { list.push(d); }
            }
            for c in index.document_categories(d) {
                labels[c].insert(d);
            }
        }

        Self { n_documents, n_features, postings, labels }
    }


    /// Number of documents.
    #[inline]
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }


    /// Number of categories.
    #[inline]
    pub fn n_categories(&self) -> usize {
        self.labels.len()
    }


    /// Number of features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }


    /// Documents containing `feature`, in increasing order.
    #[inline]
    pub fn postings(&self, feature: usize) -> &[usize] {
        &self.postings[feature]
    }


    /// Returns `true` if `document` is labeled with `category`.
    #[inline]
    pub fn is_positive(&self, category: usize, document: usize) -> bool {
        self.labels[category].contains(document)
    }


    /// Bit set of the documents labeled with `category`.
    #[inline]
    pub fn labels(&self, category: usize) -> &FixedBitSet {
        &self.labels[category]
    }


    /// Number of documents labeled with `category`.
    #[inline]
    pub fn n_positives(&self, category: usize) -> usize {
        self.labels[category].count_ones(..)
    }


    /// Bit set of the documents containing `feature`.
    /// `None` (no pivot) yields the empty set.
    pub fn feature_set(&self, feature: Option<usize>) -> FixedBitSet {
        let mut set = FixedBitSet::with_capacity(self.n_documents);
        if let Some(list) = feature.and_then(|f| self.postings.get(f)) {
            list.iter().for_each(|&d| set.insert(d));
        }
        set
    }
}
