//! Defines [`IndexView`], a subset of an index
//! restricted to some documents and some categories.
use crate::{Error, Result};
use super::core::Index;

use std::collections::HashMap;


/// A view over `base` that keeps only the listed documents and categories.
/// Feature ids are shared with `base`.
///
/// Local ids are positions in the lists given at construction,
/// so views nest: a view of a view is again an [`Index`].
/// Dropping a view releases the subset; `base` is never copied.
pub struct IndexView<'a> {
    base: &'a dyn Index,
    documents: Vec<usize>,
    categories: Vec<usize>,
    document_position: HashMap<usize, usize>,
    category_position: HashMap<usize, usize>,
}


impl<'a> IndexView<'a> {
    /// Construct a view over `documents` and `categories` of `base`.
    /// Both lists are given in `base` ids; duplicates are rejected.
    pub fn new(
        base: &'a dyn Index,
        documents: Vec<usize>,
        categories: Vec<usize>,
    ) -> Result<Self>
    {
        let document_position = positions(&documents, base.n_documents(), "document")?;
        let category_position = positions(&categories, base.n_categories(), "category")?;

        Ok(Self {
            base,
            documents,
            categories,
            document_position,
            category_position,
        })
    }


    /// A view over `documents` that keeps every category of `base`.
    pub fn with_documents(base: &'a dyn Index, documents: Vec<usize>)
        -> Result<Self>
    {
        let categories = (0..base.n_categories()).collect();
        Self::new(base, documents, categories)
    }


    /// Returns the `base` id of the local document `document`.
    #[inline]
    pub fn base_document(&self, document: usize) -> usize {
        self.documents[document]
    }


    /// Returns the `base` id of the local category `category`.
    #[inline]
    pub fn base_category(&self, category: usize) -> usize {
        self.categories[category]
    }


    /// Map `base` category ids to local ones, dropping hidden categories.
    fn local_categories(&self, categories: Vec<usize>) -> Vec<usize> {
        let mut local = categories.into_iter()
            .filter_map(|c| self.category_position.get(&c).copied())
            .collect::<Vec<_>>();
        local.sort_unstable();
        local
    }


    /// Map `base` document ids to local ones, dropping hidden documents.
    fn local_documents(&self, documents: Vec<usize>) -> Vec<usize> {
        let mut local = documents.into_iter()
            .filter_map(|d| self.document_position.get(&d).copied())
            .collect::<Vec<_>>();
        local.sort_unstable();
        local
    }
}


fn positions(ids: &[usize], bound: usize, kind: &str)
    -> Result<HashMap<usize, usize>>
{
    let mut map = HashMap::with_capacity(ids.len());
    for (position, &id) in ids.iter().enumerate() {
        if id >= bound {
            return Err(Error::Index(format!("unknown {kind} {id}")));
        }
        if map.insert(id, position).is_some() {
            return Err(Error::Index(format!("duplicate {kind} {id} in view")));
        }
    }
    Ok(map)
}


impl Index for IndexView<'_> {
    fn n_documents(&self) -> usize {
        self.documents.len()
    }


    fn n_categories(&self) -> usize {
        self.categories.len()
    }


    fn n_features(&self) -> usize {
        self.base.n_features()
    }


    fn has_document_feature(&self, document: usize, feature: usize) -> bool {
        self.base.has_document_feature(self.documents[document], feature)
    }


    fn document_features(&self, document: usize) -> Vec<usize> {
        self.base.document_features(self.documents[document])
    }


    fn feature_documents(&self, feature: usize) -> Vec<usize> {
        self.local_documents(self.base.feature_documents(feature))
    }


    fn has_document_category(&self, document: usize, category: usize) -> bool {
        self.base.has_document_category(
            self.documents[document], self.categories[category]
        )
    }


    fn category_documents(&self, category: usize) -> Vec<usize> {
        let category = self.categories[category];
        self.documents.iter()
            .enumerate()
            .filter_map(|(local, &d)| {
                self.base.has_document_category(d, category).then_some(local)
            })
            .collect()
    }


    fn parent_categories(&self, category: usize) -> Vec<usize> {
        let parents = self.base.parent_categories(self.categories[category]);
        self.local_categories(parents)
    }


    fn child_categories(&self, category: usize) -> Vec<usize> {
        let children = self.base.child_categories(self.categories[category]);
        self.local_categories(children)
    }


    fn document_categories(&self, document: usize) -> Vec<usize> {
        let categories = self.base.document_categories(self.documents[document]);
        self.local_categories(categories)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryIndex;

    fn index() -> MemoryIndex {
        let mut index = MemoryIndex::new(3);
        let a = index.add_category("a", None).unwrap();
        let b = index.add_category("b", Some(a)).unwrap();
        let c = index.add_category("c", None).unwrap();
        index.add_document(&[0], &[a, b]).unwrap();
        index.add_document(&[1], &[c]).unwrap();
        index.add_document(&[0, 2], &[a]).unwrap();
        index
    }

    #[test]
    fn view_maps_ids() {
        let index = index();
        let view = IndexView::new(&index, vec![2, 0], vec![1, 0]).unwrap();

        assert_eq!(view.n_documents(), 2);
        assert_eq!(view.n_categories(), 2);
        assert_eq!(view.base_document(0), 2);
        assert_eq!(view.feature_documents(0), vec![0, 1]);
        assert_eq!(view.category_documents(0), vec![1]);
        assert_eq!(view.category_documents(1), vec![0, 1]);
        assert_eq!(view.parent_categories(0), vec![1]);
        assert_eq!(view.root_categories(), vec![1]);
    }

    #[test]
    fn nested_views() {
        let index = index();
        let outer = IndexView::with_documents(&index, vec![0, 1, 2]).unwrap();
        let inner = IndexView::new(&outer, vec![1], vec![2]).unwrap();
        assert_eq!(inner.n_documents(), 1);
        assert!(inner.has_document_category(0, 0));
        assert_eq!(inner.document_features(0), vec![1]);
    }

    #[test]
    fn invalid_views_are_rejected() {
        let index = index();
        assert!(IndexView::new(&index, vec![0, 0], vec![0]).is_err());
        assert!(IndexView::new(&index, vec![5], vec![0]).is_err());
        assert!(IndexView::new(&index, vec![0], vec![9]).is_err());
    }
}
