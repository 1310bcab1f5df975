//! Provides [`TreeBoostClassifier`].
use serde::{Serialize, Deserialize};

use crate::{
    Index,
    Classifier,
    ClassificationResult,
    ClassifierRange,
};
use super::address::{level_map, Address, Level};

use std::collections::BTreeMap;


/// The classifier of one internal node.
/// `children[j]` is the global id of the `j`-th category
/// scored by `classifier`.
/// Unary nodes below the root own no classifier;
/// their only child inherits the parent's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelNode<C> {
    /// Global ids of the children, in local order.
    pub children: Vec<usize>,
    /// The level classifier, absent on unary nodes.
    pub classifier: Option<C>,
}


/// A cascade of classifiers over the category tree.
///
/// A document is first classified at the root; every category scored
/// by a visited level is recorded with its score, and the document
/// descends into the children of the categories passing their border.
/// [`Classifier::accepted`] keeps the categories passing their border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "C: Serialize",
    deserialize = "C: Deserialize<'de>",
))]
pub struct TreeBoostClassifier<C> {
    n_categories: usize,
    #[serde(with = "level_map")]
    nodes: BTreeMap<Level, LevelNode<C>>,
    addresses: BTreeMap<usize, Address>,
}


impl<C> TreeBoostClassifier<C> {
    pub(crate) fn new(
        n_categories: usize,
        nodes: BTreeMap<Level, LevelNode<C>>,
        addresses: BTreeMap<usize, Address>,
    ) -> Self
    {
        Self { n_categories, nodes, addresses }
    }


    /// The address of the global category `category`.
    pub fn address_of(&self, category: usize) -> Option<Address> {
        self.addresses.get(&category).copied()
    }


    /// The global category at `address`.
    pub fn category_at(&self, address: Address) -> Option<usize> {
        self.nodes.get(&address.level)
            .and_then(|node| node.children.get(address.local))
            .copied()
    }


    /// Every `(category, address)` pair, by category.
    pub fn addresses(&self) -> impl Iterator<Item = (usize, Address)> + '_ {
        self.addresses.iter().map(|(&c, &a)| (c, a))
    }


    /// The node of `level`, if it is internal.
    pub fn node(&self, level: Level) -> Option<&LevelNode<C>> {
        self.nodes.get(&level)
    }


    /// Every internal node, root first.
    pub fn levels(&self) -> impl Iterator<Item = Level> + '_ {
        self.nodes.keys().copied()
    }
}


impl<C> TreeBoostClassifier<C>
    where C: Classifier,
{
    fn descend(
        &self,
        level: Level,
        index: &dyn Index,
        document: usize,
        inherited: f64,
        result: &mut ClassificationResult,
    )
    {
        let node = match self.nodes.get(&level) {
            Some(node) => node,
            None => return,
        };

        match &node.classifier {
            Some(classifier) => {
                let scores = classifier.classify(index, document);
                for (local, score) in scores.iter() {
                    let child = node.children[local];
                    result.push(child, score);
                    if classifier.classifier_range(local).accepts(score) {
                        self.descend(Level::Category(child), index, document, score, result);
                    }
                }
            },
            None => {
                for &child in node.children.iter() {
                    result.push(child, inherited);
                    self.descend(Level::Category(child), index, document, inherited, result);
                }
            },
        }
    }
}


impl<C> Classifier for TreeBoostClassifier<C>
    where C: Classifier,
{
    fn n_categories(&self) -> usize {
        self.n_categories
    }


    fn classify(&self, index: &dyn Index, document: usize)
        -> ClassificationResult
    {
        let mut result = ClassificationResult::new(document);
        self.descend(Level::Root, index, document, 0f64, &mut result);
        result
    }


    /// The range of the level classifier scoring `category`,
    /// or of the nearest ancestor owning one.
    fn classifier_range(&self, category: usize) -> ClassifierRange {
        let mut category = category;
        loop {
            let address = match self.addresses.get(&category) {
                Some(address) => *address,
                None => return ClassifierRange::unbounded(),
            };
            let node = match self.nodes.get(&address.level) {
                Some(node) => node,
                None => return ClassifierRange::unbounded(),
            };
            match (&node.classifier, address.level) {
                (Some(classifier), _) => {
                    return classifier.classifier_range(address.local);
                },
                (None, Level::Category(parent)) => { category = parent; },
                (None, Level::Root) => return ClassifierRange::unbounded(),
            }
        }
    }


    fn set_iterations(&mut self, iterations: usize) {
        self.nodes.values_mut()
            .filter_map(|node| node.classifier.as_mut())
            .for_each(|classifier| classifier.set_iterations(iterations));
    }
}
