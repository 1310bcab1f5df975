//! Defines [`MemoryIndex`], an in-memory [`Index`].
use fixedbitset::FixedBitSet;

use crate::{Error, Result};
use super::core::Index;

use std::collections::{HashMap, HashSet};


/// One document: the features it contains and the categories
/// it is labeled with.
#[derive(Debug, Clone, PartialEq)]
struct DocumentRow {
    features: FixedBitSet,
    categories: FixedBitSet,
}


/// An in-memory index over binary features.
/// The category tree allows at most one parent per category.
///
/// # Example
/// ```
/// use tcboost::prelude::*;
///
/// let mut index = MemoryIndex::new(3);
/// let sport = index.add_category("sport", None).unwrap();
/// let tennis = index.add_category("tennis", Some(sport)).unwrap();
/// index.add_document(&[0, 2], &[tennis]).unwrap();
/// index.propagate_labels_to_ancestors();
///
/// assert!(index.has_document_category(0, sport));
/// assert_eq!(index.child_categories(sport), vec![tennis]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryIndex {
    n_features: usize,
    category_names: Vec<String>,
    parents: Vec<Option<usize>>,
    documents: Vec<DocumentRow>,
}


impl MemoryIndex {
    /// Construct an empty index over `n_features` features.
    pub fn new(n_features: usize) -> Self {
        Self {
            n_features,
            category_names: Vec::new(),
            parents: Vec::new(),
            documents: Vec::new(),
        }
    }


    /// Append a category named `name` below `parent`
    /// and returns its id.
    /// The parent must already exist, so the tree never has cycles.
    pub fn add_category<S>(&mut self, name: S, parent: Option<usize>)
        -> Result<usize>
        where S: Into<String>,
    {
        let name = name.into();
        if self.category_names.contains(&name) {
            return Err(Error::Index(format!("duplicate category `{name}`")));
        }
        if let Some(p) = parent {
            if p >= self.category_names.len() {
                return Err(Error::Index(format!("unknown parent category {p}")));
            }
        }

        let id = self.category_names.len();
        self.category_names.push(name);
        self.parents.push(parent);
        self.documents.iter_mut()
            .for_each(|doc| doc.categories.grow(id + 1));
        Ok(id)
    }


    /// Append a document and returns its id.
    pub fn add_document(&mut self, features: &[usize], categories: &[usize])
        -> Result<usize>
    {
        let n_categories = self.n_categories();
        let mut row = DocumentRow {
            features: FixedBitSet::with_capacity(self.n_features),
            categories: FixedBitSet::with_capacity(n_categories),
        };
        for &f in features {
            if f >= self.n_features {
                return Err(Error::Index(format!("unknown feature {f}")));
            }
            row.features.insert(f);
        }
        for &c in categories {
            if c >= n_categories {
                return Err(Error::Index(format!("unknown category {c}")));
            }
            row.categories.insert(c);
        }

        self.documents.push(row);
        Ok(self.documents.len() - 1)
    }


    /// Label every document with all the ancestors
    /// of the categories it already has.
    pub fn propagate_labels_to_ancestors(&mut self) {
        let parents = &self.parents;
        for doc in self.documents.iter_mut() {
            let labeled = doc.categories.ones().collect::<Vec<_>>();
            for mut c in labeled {
                while let Some(p) = parents[c] {
                    doc.categories.insert(p);
                    c = p;
                }
            }
        }
    }


    /// Returns the id of the category named `name`.
    pub fn category_id(&self, name: &str) -> Option<usize> {
        self.category_names.iter().position(|n| n == name)
    }


    /// Returns the name of `category`.
    pub fn category_name(&self, category: usize) -> &str {
        &self.category_names[category]
    }


    /// Remove the documents `ids`.
    /// With `keep_order`, surviving documents keep their relative order;
    /// otherwise the last documents are swapped into the freed slots.
    pub fn remove_documents(&mut self, ids: &[usize], keep_order: bool) {
        let mut ids = ids.iter()
            .copied()
            .filter(|&d| d < self.documents.len())
            .collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();

        if keep_order {
            let removed = ids.into_iter().collect::<HashSet<_>>();
            let mut position = 0;
            self.documents.retain(|_| {
                let keep = !removed.contains(&position);
                position += 1;
                keep
            });
        } else {
            for d in ids.into_iter().rev() {
                self.documents.swap_remove(d);
            }
        }
    }


    /// Remove the categories `ids` and compact the remaining ids.
    /// Children of a removed category are attached
    /// to its closest surviving ancestor.
    pub fn remove_categories(&mut self, ids: &[usize]) {
        let n_categories = self.n_categories();
        let removed = ids.iter()
            .copied()
            .filter(|&c| c < n_categories)
            .collect::<HashSet<_>>();
        if removed.is_empty() { return; }

        let remap = compact_ids(n_categories, &removed);

        let surviving_ancestor = |mut c: usize| -> Option<usize> {
            while let Some(p) = self.parents[c] {
                if !removed.contains(&p) { return Some(p); }
                c = p;
            }
            None
        };

        let mut names = Vec::with_capacity(n_categories - removed.len());
        let mut parents = Vec::with_capacity(n_categories - removed.len());
        for c in (0..n_categories).filter(|c| !removed.contains(c)) {
            names.push(self.category_names[c].clone());
            parents.push(surviving_ancestor(c).map(|p| remap[&p]));
        }

        let n_kept = names.len();
        for doc in self.documents.iter_mut() {
            doc.categories = remap_bits(&doc.categories, &remap, n_kept);
        }
        self.category_names = names;
        self.parents = parents;
    }


    /// Remove the features `ids` and compact the remaining ids.
    pub fn remove_features(&mut self, ids: &[usize]) {
        let removed = ids.iter()
            .copied()
            .filter(|&f| f < self.n_features)
            .collect::<HashSet<_>>();
        if removed.is_empty() { return; }

        let remap = compact_ids(self.n_features, &removed);
        let n_kept = self.n_features - removed.len();
        for doc in self.documents.iter_mut() {
            doc.features = remap_bits(&doc.features, &remap, n_kept);
        }
        self.n_features = n_kept;
    }
}


/// Maps every surviving id in `0..n` to its compacted position.
fn compact_ids(n: usize, removed: &HashSet<usize>) -> HashMap<usize, usize> {
    (0..n).filter(|i| !removed.contains(i))
        .enumerate()
        .map(|(new, old)| (old, new))
        .collect()
}


fn remap_bits(
    bits: &FixedBitSet,
    remap: &HashMap<usize, usize>,
    len: usize,
) -> FixedBitSet
{
    let mut out = FixedBitSet::with_capacity(len);
    bits.ones()
        .filter_map(|i| remap.get(&i))
        .for_each(|&i| out.insert(i));
    out
}


impl Index for MemoryIndex {
    fn n_documents(&self) -> usize {
        self.documents.len()
    }


    fn n_categories(&self) -> usize {
        self.category_names.len()
    }


    fn n_features(&self) -> usize {
        self.n_features
    }


    fn has_document_feature(&self, document: usize, feature: usize) -> bool {
        self.documents[document].features.contains(feature)
    }


    fn document_features(&self, document: usize) -> Vec<usize> {
        self.documents[document].features.ones().collect()
    }


    fn feature_documents(&self, feature: usize) -> Vec<usize> {
        self.documents.iter()
            .enumerate()
            .filter_map(|(d, doc)| {
                doc.features.contains(feature).then_some(d)
            })
            .collect()
    }


    fn has_document_category(&self, document: usize, category: usize) -> bool {
        self.documents[document].categories.contains(category)
    }


    fn category_documents(&self, category: usize) -> Vec<usize> {
        self.documents.iter()
            .enumerate()
            .filter_map(|(d, doc)| {
                doc.categories.contains(category).then_some(d)
            })
            .collect()
    }


    fn parent_categories(&self, category: usize) -> Vec<usize> {
        self.parents[category].into_iter().collect()
    }


    fn child_categories(&self, category: usize) -> Vec<usize> {
        self.parents.iter()
            .enumerate()
            .filter_map(|(c, p)| (*p == Some(category)).then_some(c))
            .collect()
    }


    fn document_categories(&self, document: usize) -> Vec<usize> {
        self.documents[document].categories.ones().collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn tree_index() -> MemoryIndex {
        let mut index = MemoryIndex::new(4);
        let a = index.add_category("a", None).unwrap();
        let a1 = index.add_category("a1", Some(a)).unwrap();
        let a2 = index.add_category("a2", Some(a)).unwrap();
        let b = index.add_category("b", None).unwrap();
        index.add_document(&[0, 1], &[a1]).unwrap();
        index.add_document(&[1, 2], &[a2]).unwrap();
        index.add_document(&[3], &[b]).unwrap();
        index.propagate_labels_to_ancestors();
        index
    }

    #[test]
    fn tree_relations() {
        let index = tree_index();
        assert_eq!(index.root_categories(), vec![0, 3]);
        assert_eq!(index.child_categories(0), vec![1, 2]);
        assert_eq!(index.sibling_categories(1), vec![2]);
        assert_eq!(index.sibling_categories(0), vec![3]);
        assert_eq!(index.parent_categories(2), vec![0]);
        assert_eq!(index.category_documents(0), vec![0, 1]);
        assert_eq!(index.feature_documents(1), vec![0, 1]);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut index = MemoryIndex::new(2);
        assert!(index.add_category("x", Some(3)).is_err());
        assert!(index.add_document(&[2], &[]).is_err());
        assert!(index.add_document(&[0], &[0]).is_err());
        index.add_category("x", None).unwrap();
        assert!(index.add_category("x", None).is_err());
    }

    #[test]
    fn remove_documents_keeping_order() {
        let mut index = tree_index();
        index.remove_documents(&[0], true);
        assert_eq!(index.n_documents(), 2);
        assert_eq!(index.document_features(0), vec![1, 2]);
        assert_eq!(index.document_features(1), vec![3]);
    }

    #[test]
    fn remove_documents_without_order() {
        let mut index = tree_index();
        index.remove_documents(&[0], false);
        assert_eq!(index.n_documents(), 2);
        assert_eq!(index.document_features(0), vec![3]);
    }

    #[test]
    fn remove_inner_category_reattaches_children() {
        let mut index = tree_index();
        index.remove_categories(&[0]);
        assert_eq!(index.n_categories(), 3);
        assert_eq!(index.root_categories(), vec![0, 1, 2]);
        assert_eq!(index.category_id("b"), Some(2));
        assert_eq!(index.document_categories(2), vec![2]);
    }

    #[test]
    fn remove_features_compacts_ids() {
        let mut index = tree_index();
        index.remove_features(&[1]);
        assert_eq!(index.n_features(), 3);
        assert_eq!(index.document_features(1), vec![1]);
        assert_eq!(index.document_features(2), vec![2]);
    }

    #[test]
    fn clone_is_independent() {
        let index = tree_index();
        let mut copy = index.clone();
        copy.remove_documents(&[1], true);
        assert_eq!(index.n_documents(), 3);
        assert_eq!(copy.n_documents(), 2);
    }
}
