//! Provides the [`Index`] trait.


/// Read-only access to a categorized document collection:
/// documents × binary features × categories, plus the category tree.
///
/// Documents, features and categories are addressed by dense ids
/// `0..n_documents()`, `0..n_features()` and `0..n_categories()`.
///
/// # Required Methods
/// - [`Index::n_documents`]
/// - [`Index::n_categories`]
/// - [`Index::n_features`]
/// - [`Index::has_document_feature`]
/// - [`Index::document_features`]
/// - [`Index::feature_documents`]
/// - [`Index::has_document_category`]
/// - [`Index::category_documents`]
/// - [`Index::parent_categories`]
/// - [`Index::child_categories`]
///
/// # Provided Methods
/// - [`Index::category_documents_count`]
/// - [`Index::root_categories`]
/// - [`Index::sibling_categories`]
/// - [`Index::document_categories`]
pub trait Index: Send + Sync {
    /// Number of documents.
    fn n_documents(&self) -> usize;

    /// Number of categories.
    fn n_categories(&self) -> usize;

    /// Number of features.
    fn n_features(&self) -> usize;

    /// Returns `true` if `document` contains `feature`.
    fn has_document_feature(&self, document: usize, feature: usize) -> bool;

    /// Features contained in `document`, in increasing order.
    fn document_features(&self, document: usize) -> Vec<usize>;

    /// Documents containing `feature`, in increasing order.
    fn feature_documents(&self, feature: usize) -> Vec<usize>;

    /// Returns `true` if `document` is labeled with `category`.
    fn has_document_category(&self, document: usize, category: usize) -> bool;

    /// Documents labeled with `category`, in increasing order.
    fn category_documents(&self, category: usize) -> Vec<usize>;

    /// Parents of `category` in the category tree.
    fn parent_categories(&self, category: usize) -> Vec<usize>;

    /// Children of `category` in the category tree.
    fn child_categories(&self, category: usize) -> Vec<usize>;


    /// Number of documents labeled with `category`.
    fn category_documents_count(&self, category: usize) -> usize {
        self.category_documents(category).len()
    }


    /// Categories without a parent, in increasing order.
    fn root_categories(&self) -> Vec<usize> {
        (0..self.n_categories())
            .filter(|&c| self.parent_categories(c).is_empty())
            .collect()
    }


    /// Categories sharing a parent with `category`.
    /// Siblings of a root category are the other root categories.
    fn sibling_categories(&self, category: usize) -> Vec<usize> {
        let parents = self.parent_categories(category);
        let mut siblings = if parents.is_empty() {
            self.root_categories()
        } else {
            parents.into_iter()
                .flat_map(|p| self.child_categories(p))
                .collect()
        };
        siblings.sort_unstable();
        siblings.dedup();
        siblings.retain(|&c| c != category);
        siblings
    }


    /// Categories `document` is labeled with, in increasing order.
    fn document_categories(&self, document: usize) -> Vec<usize> {
        (0..self.n_categories())
            .filter(|&c| self.has_document_category(document, c))
            .collect()
    }
}
