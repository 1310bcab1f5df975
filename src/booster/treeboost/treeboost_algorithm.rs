//! Provides [`TreeBoost`], the hierarchical decomposition learner.
use rayon::prelude::*;

use crate::{
    Error,
    Result,
    Index,
    IndexView,
    Learner,

    common::status::{CancellationToken, Progress, StatusListener},
};
use super::address::{Address, Level};
use super::negatives::{AllNegatives, NegativesChooser};
use super::treeboost_classifier::{LevelNode, TreeBoostClassifier};

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;


/// Trains one classifier per internal node of the category tree.
///
/// At every internal node, each child category gets a binary training set:
/// the node documents labeled with the child as positives, plus the
/// negatives picked by the [`NegativesChooser`] among the other node
/// documents. The inner learner trains one single-category classifier per
/// child; the classifiers of a node are then merged with
/// [`Learner::merge`]. The node documents of a child are its positives.
///
/// # Example
/// ```
/// use tcboost::prelude::*;
///
/// let mut index = MemoryIndex::new(3);
/// let news = index.add_category("news", None).unwrap();
/// let sport = index.add_category("sport", None).unwrap();
/// let tennis = index.add_category("tennis", Some(sport)).unwrap();
/// let golf = index.add_category("golf", Some(sport)).unwrap();
/// index.add_document(&[0], &[news]).unwrap();
/// index.add_document(&[1], &[sport, tennis]).unwrap();
/// index.add_document(&[1, 2], &[sport, golf]).unwrap();
///
/// let inner = AdaBoost::init(MultiPivot::new()).max_iterations(5);
/// let f = TreeBoost::init(inner)
///     .negatives(SiblingNegatives)
///     .build(&index)
///     .unwrap();
///
/// let address = f.address_of(golf).unwrap();
/// assert_eq!(address.level, Level::Category(sport));
/// assert_eq!(f.category_at(address), Some(golf));
/// ```
pub struct TreeBoost<L> {
    learner: L,
    node_learners: HashMap<Level, L>,
    chooser: Box<dyn NegativesChooser>,
    progress: Progress,
}


impl<L> TreeBoost<L> {
    /// Initialize `TreeBoost` with the learner used at every node.
    /// By default every non-positive node document is a negative.
    pub fn init(learner: L) -> Self {
        Self {
            learner,
            node_learners: HashMap::new(),
            chooser: Box::new(AllNegatives),
            progress: Progress::default(),
        }
    }


    /// Use `learner` at the node `level` instead of the default one.
    pub fn node_learner(mut self, level: Level, learner: L) -> Self {
        self.node_learners.insert(level, learner);
        self
    }


    /// Set the negatives chooser.
    pub fn negatives<N>(mut self, chooser: N) -> Self
        where N: NegativesChooser + 'static,
    {
        self.chooser = Box::new(chooser);
        self
    }


    /// Report the share of trained internal nodes.
    pub fn status<S>(mut self, listener: S) -> Self
        where S: StatusListener + 'static,
    {
        self.progress.set_listener(Arc::new(listener));
        self
    }


    /// Stop with [`Error::Cancelled`] once `token` is cancelled.
    pub fn cancel_with(mut self, token: CancellationToken) -> Self {
        self.progress.set_token(token);
        self
    }


    /// The learner used at `level`.
    pub fn learner_at(&self, level: Level) -> &L {
        self.node_learners.get(&level).unwrap_or(&self.learner)
    }


    /// The negatives chooser.
    pub fn chooser(&self) -> &dyn NegativesChooser {
        self.chooser.as_ref()
    }
}


/// Mutable state of one tree build.
struct TreeState<C> {
    nodes: BTreeMap<Level, LevelNode<C>>,
    addresses: BTreeMap<usize, Address>,
    n_internal: usize,
}


impl<L> TreeBoost<L>
    where L: Learner,
{
    fn build_node(
        &self,
        index: &dyn Index,
        level: Level,
        node_documents: &[usize],
        children: Vec<usize>,
        state: &mut TreeState<L::Output>,
    ) -> Result<()>
    {
        self.progress.checkpoint()?;

        for (local, &child) in children.iter().enumerate() {
            let address = Address { level, local };
            if state.addresses.insert(child, address).is_some() {
                return Err(Error::Index(format!(
                    "category {child} has more than one parent"
                )));
            }
        }

        let positives = children.iter()
            .map(|&child| {
                node_documents.iter()
                    .copied()
                    .filter(|&d| index.has_document_category(d, child))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let classifier = if children.len() == 1 && level != Level::Root {
            log::debug!("{level} is unary, its child inherits its score");
            None
        } else {
            Some(self.train_level(index, level, node_documents, &children, &positives)?)
        };

        state.n_internal += 1;
        self.progress.report(state.n_internal, index.n_categories() + 1);
        state.nodes.insert(level, LevelNode { children: children.clone(), classifier });

        for (child, child_documents) in children.into_iter().zip(positives) {
            let grandchildren = index.child_categories(child);
            if grandchildren.is_empty() { continue; }
            self.build_node(
                index,
                Level::Category(child),
                &child_documents,
                grandchildren,
                state,
            )?;
        }
        Ok(())
    }


    fn train_level(
        &self,
        index: &dyn Index,
        level: Level,
        node_documents: &[usize],
        children: &[usize],
        positives: &[Vec<usize>],
    ) -> Result<L::Output>
    {
        let learner = self.learner_at(level);
        log::info!(
            "{level}: training {} children on {} documents with {}",
            children.len(),
            node_documents.len(),
            learner.name(),
        );

        let classifiers = children.par_iter()
            .zip(positives.par_iter())
            .map(|(&child, positives)| {
                let candidates = node_documents.iter()
                    .copied()
                    .filter(|d| positives.binary_search(d).is_err())
                    .collect::<Vec<_>>();
                let negatives = self.chooser
                    .select(index, child, positives, &candidates);

                let mut documents = positives.clone();
                documents.extend(negatives);
                documents.sort_unstable();
                if documents.is_empty() {
                    return Err(Error::EmptyTrainingSet { category: child });
                }
                if positives.is_empty() {
                    log::warn!("category {child} has no positive example");
                }

                let view = IndexView::new(index, documents, vec![child])?;
                learner.build(&view)
            })
            .collect::<Result<Vec<_>>>()?;

        learner.merge(classifiers)
    }
}


impl<L> Learner for TreeBoost<L>
    where L: Learner,
{
    type Output = TreeBoostClassifier<L::Output>;


    fn name(&self) -> &str {
        "TreeBoost"
    }


    fn build(&self, index: &dyn Index) -> Result<Self::Output> {
        let roots = index.root_categories();
        if index.n_documents() == 0 {
            return Err(Error::EmptyIndex("no documents"));
        }
        if roots.is_empty() {
            return Err(Error::EmptyIndex("no root categories"));
        }
        log::info!(
            "{} with {} negatives over {} categories",
            self.name(),
            self.chooser.name(),
            index.n_categories(),
        );

        let mut state = TreeState {
            nodes: BTreeMap::new(),
            addresses: BTreeMap::new(),
            n_internal: 0,
        };
        let documents = (0..index.n_documents()).collect::<Vec<_>>();
        self.build_node(index, Level::Root, &documents, roots, &mut state)?;
        self.progress.report(1, 1);

        Ok(TreeBoostClassifier::new(
            index.n_categories(), state.nodes, state.addresses
        ))
    }


    fn merge(&self, _classifiers: Vec<Self::Output>) -> Result<Self::Output> {
        Err(Error::Config("tree classifiers cannot be merged".into()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AdaBoost, Classifier, MemoryIndex, MultiPivot};

    fn inner() -> AdaBoost<MultiPivot> {
        AdaBoost::init(MultiPivot::new()).max_iterations(3)
    }

    #[test]
    fn empty_child_is_fatal() {
        // `a` has no positive and no sibling to draw negatives from.
        let mut index = MemoryIndex::new(1);
        let a = index.add_category("a", None).unwrap();
        index.add_category("b", Some(a)).unwrap();
        index.add_document(&[0], &[]).unwrap();

        let err = TreeBoost::init(inner())
            .negatives(crate::SiblingNegatives)
            .build(&index);
        assert!(matches!(
            err,
            Err(Error::EmptyTrainingSet { category }) if category == a
        ));
    }

    #[test]
    fn unary_nodes_have_no_classifier() {
        let mut index = MemoryIndex::new(2);
        let a = index.add_category("a", None).unwrap();
        let b = index.add_category("b", None).unwrap();
        let only = index.add_category("only", Some(a)).unwrap();
        index.add_document(&[0], &[a, only]).unwrap();
        index.add_document(&[1], &[b]).unwrap();

        let f = TreeBoost::init(inner()).build(&index).unwrap();
        let node = f.node(Level::Category(a)).unwrap();
        assert!(node.classifier.is_none());
        assert_eq!(f.classifier_range(only), f.classifier_range(a));

        let result = f.classify(&index, 0);
        assert_eq!(f.accepted(&result), vec![a, only]);
        assert_eq!(result.score_of(a), result.score_of(only));
        assert!(result.score_of(b).is_some());
    }

    #[test]
    fn merge_is_rejected() {
        let learner = TreeBoost::init(inner());
        assert!(matches!(learner.merge(Vec::new()), Err(Error::Config(_))));
    }
}
