//! Strategies choosing the negative examples of a tree node.
use fixedbitset::FixedBitSet;
use rand::prelude::*;

use crate::{Index, Result};
use crate::common::{checkers, utils};
use crate::common::constants::DEFAULT_SEED;

use std::cmp::Ordering;
use std::collections::BTreeSet;


/// Chooses the negative training documents of one child category.
///
/// `positives` are the node documents labeled with `category`,
/// `candidates` the other node documents.
/// The returned ids are a subset of `candidates`, in increasing order.
pub trait NegativesChooser: Send + Sync {
    /// The name of the strategy.
    fn name(&self) -> &str;


    /// Select negatives for `category` among `candidates`.
    fn select(
        &self,
        index: &dyn Index,
        category: usize,
        positives: &[usize],
        candidates: &[usize],
    ) -> Vec<usize>;
}


/// Every candidate is a negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllNegatives;


impl NegativesChooser for AllNegatives {
    fn name(&self) -> &str {
        "all"
    }


    fn select(&self, _: &dyn Index, _: usize, _: &[usize], candidates: &[usize])
        -> Vec<usize>
    {
        sorted(candidates.to_vec())
    }
}


/// Candidates labeled with a sibling of the category.
/// Candidates of no sibling are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiblingNegatives;


impl NegativesChooser for SiblingNegatives {
    fn name(&self) -> &str {
        "siblings"
    }


    fn select(
        &self,
        index: &dyn Index,
        category: usize,
        _positives: &[usize],
        candidates: &[usize],
    ) -> Vec<usize>
    {
        let siblings = index.sibling_categories(category);
        let negatives = candidates.iter()
            .copied()
            .filter(|&d| {
                siblings.iter().any(|&s| index.has_document_category(d, s))
            })
            .collect();
        sorted(negatives)
    }
}


/// The candidates closest (cosine) to the centroid of the positives,
/// i.e., the hardest negatives.
/// Keeps `max(min_count, ⌈ratio · |candidates|⌉)` of them.
#[derive(Debug, Clone, Copy)]
pub struct CentroidNegatives {
    ratio: f64,
    min_count: usize,
}


impl Default for CentroidNegatives {
    fn default() -> Self {
        Self { ratio: 0.5, min_count: 1 }
    }
}


impl CentroidNegatives {
    /// Construct a chooser keeping half of the candidates.
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the share of candidates to keep, in `(0, 1]`.
    pub fn ratio(mut self, ratio: f64) -> Result<Self> {
        checkers::percentage(ratio)?;
        self.ratio = ratio;
        Ok(self)
    }


    /// Keep at least `min_count` candidates.
    pub fn min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }
}


impl NegativesChooser for CentroidNegatives {
    fn name(&self) -> &str {
        "centroid"
    }


    fn select(
        &self,
        index: &dyn Index,
        _category: usize,
        positives: &[usize],
        candidates: &[usize],
    ) -> Vec<usize>
    {
        let n_keep = keep_count(self.ratio, candidates.len())
            .max(self.min_count)
            .min(candidates.len());
        let centroid = Centroid::of(index, positives);
        let ranked = rank_by(candidates, |d| {
            centroid.cosine(&index.document_features(d))
        });
        sorted(ranked.into_iter().take(n_keep).collect())
    }
}


/// For every positive, its `k` nearest (cosine) candidates.
#[derive(Debug, Clone, Copy)]
pub struct KnnNegatives {
    k: usize,
}


impl KnnNegatives {
    /// Construct a chooser keeping `k` neighbors per positive.
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}


impl NegativesChooser for KnnNegatives {
    fn name(&self) -> &str {
        "k-nearest"
    }


    fn select(
        &self,
        index: &dyn Index,
        _category: usize,
        positives: &[usize],
        candidates: &[usize],
    ) -> Vec<usize>
    {
        let n_features = index.n_features();
        let candidate_sets = candidates.iter()
            .map(|&d| (d, feature_set(index, d, n_features)))
            .collect::<Vec<_>>();

        let mut chosen = BTreeSet::new();
        for &p in positives {
            let target = feature_set(index, p, n_features);
            let mut scored = candidate_sets.iter()
                .map(|(d, set)| (*d, utils::binary_cosine(&target, set)))
                .collect::<Vec<_>>();
            scored.sort_by(by_similarity);
            chosen.extend(scored.into_iter().take(self.k).map(|(d, _)| d));
        }
        chosen.into_iter().collect()
    }
}


/// Clusters the candidates (spherical k-means) and keeps, in every
/// cluster, the `ratio` share closest to the centroid of the positives,
/// so that every region of the negative space is represented.
#[derive(Debug, Clone, Copy)]
pub struct ClusterNegatives {
    n_clusters: usize,
    ratio: f64,
    seed: u64,
    max_iter: usize,
}


impl ClusterNegatives {
    /// Construct a chooser with `n_clusters` clusters,
    /// keeping half of every cluster.
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters: n_clusters.max(1),
            ratio: 0.5,
            seed: DEFAULT_SEED,
            max_iter: 20,
        }
    }


    /// Set the share of each cluster to keep, in `(0, 1]`.
    pub fn ratio(mut self, ratio: f64) -> Result<Self> {
        checkers::percentage(ratio)?;
        self.ratio = ratio;
        Ok(self)
    }


    /// Set the seed of the initial centroids.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the maximum number of k-means passes.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }


    fn clusters(&self, index: &dyn Index, candidates: &[usize])
        -> Vec<Vec<usize>>
    {
        let features = candidates.iter()
            .map(|&d| index.document_features(d))
            .collect::<Vec<_>>();
        let n_clusters = self.n_clusters.min(candidates.len());

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids = (0..candidates.len())
            .choose_multiple(&mut rng, n_clusters)
            .into_iter()
            .map(|i| Centroid::of_features(index.n_features(), &features[i..=i]))
            .collect::<Vec<_>>();

        let mut assignment = vec![usize::MAX; candidates.len()];
        for _ in 0..self.max_iter {
            let mut changed = false;
            for (i, f) in features.iter().enumerate() {
                let nearest = (0..centroids.len())
                    .map(|k| (k, centroids[k].cosine(f)))
                    .max_by(|a, b| a.1.total_cmp(&b.1).then(b.0.cmp(&a.0)))
                    .map(|(k, _)| k)
                    .unwrap_or(0);
                if assignment[i] != nearest {
                    assignment[i] = nearest;
                    changed = true;
                }
            }
            if !changed { break; }

            centroids = (0..centroids.len())
                .map(|k| {
                    let members = features.iter()
                        .zip(&assignment)
                        .filter(|(_, a)| **a == k)
                        .map(|(f, _)| f.clone())
                        .collect::<Vec<_>>();
                    Centroid::of_features(index.n_features(), &members)
                })
                .collect();
        }

        let mut clusters = vec![Vec::new(); centroids.len()];
        for (&d, &k) in candidates.iter().zip(&assignment) {
            clusters[k].push(d);
        }
        clusters
    }
}


impl NegativesChooser for ClusterNegatives {
    fn name(&self) -> &str {
        "clusters"
    }


    fn select(
        &self,
        index: &dyn Index,
        _category: usize,
        positives: &[usize],
        candidates: &[usize],
    ) -> Vec<usize>
    {
        if candidates.is_empty() { return Vec::new(); }

        let centroid = Centroid::of(index, positives);
        let negatives = self.clusters(index, candidates)
            .into_iter()
            .flat_map(|members| {
                let n_keep = keep_count(self.ratio, members.len());
                rank_by(&members, |d| {
                    centroid.cosine(&index.document_features(d))
                })
                .into_iter()
                .take(n_keep)
            })
            .collect();
        sorted(negatives)
    }
}


/// Mean of binary feature vectors.
struct Centroid {
    values: Vec<f64>,
    norm: f64,
}


impl Centroid {
    fn of(index: &dyn Index, documents: &[usize]) -> Self {
        let features = documents.iter()
            .map(|&d| index.document_features(d))
            .collect::<Vec<_>>();
        Self::of_features(index.n_features(), &features)
    }


    fn of_features(n_features: usize, documents: &[Vec<usize>]) -> Self {
        let mut values = vec![0f64; n_features];
        for features in documents {
            for &f in features {
                values[f] += 1f64;
            }
        }
        let n = documents.len().max(1) as f64;
        values.iter_mut().for_each(|v| { *v /= n; });
        let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        Self { values, norm }
    }


    /// Cosine with a binary vector given by its features.
    fn cosine(&self, features: &[usize]) -> f64 {
        if self.norm == 0f64 || features.is_empty() { return 0f64; }
        let dot = features.iter()
            .map(|&f| self.values[f])
            .sum::<f64>();
        dot / (self.norm * (features.len() as f64).sqrt())
    }
}


fn feature_set(index: &dyn Index, document: usize, n_features: usize)
    -> FixedBitSet
{
    let mut set = FixedBitSet::with_capacity(n_features);
    set.extend(index.document_features(document));
    set
}


#[inline(always)]
fn keep_count(ratio: f64, n: usize) -> usize {
    ((ratio * n as f64).ceil() as usize).min(n)
}


// Most similar first, smaller id first on ties.
fn by_similarity(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}


fn rank_by<F>(documents: &[usize], similarity: F) -> Vec<usize>
    where F: Fn(usize) -> f64,
{
    let mut scored = documents.iter()
        .map(|&d| (d, similarity(d)))
        .collect::<Vec<_>>();
    scored.sort_by(by_similarity);
    scored.into_iter().map(|(d, _)| d).collect()
}


fn sorted(mut documents: Vec<usize>) -> Vec<usize> {
    documents.sort_unstable();
    documents
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryIndex;

    // doc 0, 1: positives of `a`; doc 2: labeled with sibling `b`;
    // doc 3, 4: unlabeled, doc 3 close to the positives.
    fn index() -> MemoryIndex {
        let mut index = MemoryIndex::new(4);
        let a = index.add_category("a", None).unwrap();
        let b = index.add_category("b", None).unwrap();
        index.add_document(&[0, 1], &[a]).unwrap();
        index.add_document(&[0], &[a]).unwrap();
        index.add_document(&[2], &[b]).unwrap();
        index.add_document(&[0, 1], &[]).unwrap();
        index.add_document(&[3], &[]).unwrap();
        index
    }

    #[test]
    fn all_and_siblings() {
        let index = index();
        let candidates = [4, 2, 3];
        assert_eq!(AllNegatives.select(&index, 0, &[0, 1], &candidates), vec![2, 3, 4]);
        assert_eq!(SiblingNegatives.select(&index, 0, &[0, 1], &candidates), vec![2]);
    }

    #[test]
    fn centroid_keeps_hardest() {
        let index = index();
        let chooser = CentroidNegatives::new().ratio(0.3).unwrap();
        assert_eq!(chooser.select(&index, 0, &[0, 1], &[2, 3, 4]), vec![3]);
        assert!(CentroidNegatives::new().ratio(0.0).is_err());
    }

    #[test]
    fn nearest_neighbors() {
        let index = index();
        let chooser = KnnNegatives::new(1);
        assert_eq!(chooser.select(&index, 0, &[0, 1], &[2, 3, 4]), vec![3]);
    }

    #[test]
    fn clusters_cover_the_candidates() {
        let index = index();
        let chooser = ClusterNegatives::new(2).ratio(1.0).unwrap();
        assert_eq!(chooser.select(&index, 0, &[0, 1], &[2, 3, 4]), vec![2, 3, 4]);

        let half = ClusterNegatives::new(1).seed(7);
        let chosen = half.select(&index, 0, &[0, 1], &[2, 3, 4]);
        assert_eq!(chosen, vec![2, 3]);
    }
}
