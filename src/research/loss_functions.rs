//! Multi-label losses of a classifier on an index.
use crate::{Classifier, Index};


/// Hamming loss: the share of `(document, category)` pairs
/// whose assignment disagrees with the label of `index`.
pub fn hamming_loss<C>(index: &dyn Index, classifier: &C) -> f64
    where C: Classifier + Sync,
{
    let n_categories = classifier.n_categories().min(index.n_categories());
    let n_pairs = index.n_documents() * n_categories;
    if n_pairs == 0 { return 0f64; }

    let errors = classifier.classify_all(index)
        .into_iter()
        .map(|result| {
            let accepted = classifier.accepted(&result);
            (0..n_categories)
                .filter(|&c| {
                    let predicted = accepted.contains(&c);
                    predicted != index.has_document_category(result.document, c)
                })
                .count()
        })
        .sum::<usize>();

    errors as f64 / n_pairs as f64
}


/// Subset zero-one loss: the share of documents whose
/// assigned category set is not exactly their label set.
pub fn subset_zero_one_loss<C>(index: &dyn Index, classifier: &C) -> f64
    where C: Classifier + Sync,
{
    let n_documents = index.n_documents();
    if n_documents == 0 { return 0f64; }

    let n_categories = classifier.n_categories().min(index.n_categories());
    let errors = classifier.classify_all(index)
        .into_iter()
        .filter(|result| {
            let accepted = classifier.accepted(result);
            (0..n_categories).any(|c| {
                accepted.contains(&c)
                    != index.has_document_category(result.document, c)
            })
        })
        .count();

    errors as f64 / n_documents as f64
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AdaBoostClassifier, HypothesisData, MemoryIndex, WeakHypothesis};

    #[test]
    fn losses_of_a_fixed_model() {
        let mut index = MemoryIndex::new(1);
        index.add_category("a", None).unwrap();
        index.add_category("b", None).unwrap();
        index.add_document(&[0], &[0]).unwrap();
        index.add_document(&[], &[0, 1]).unwrap();

        // `a` iff feature 0, never `b`
        let h = WeakHypothesis::new(vec![
            HypothesisData::new(0, -1.0, 1.0),
            HypothesisData::constant(-1.0),
        ]);
        let f = AdaBoostClassifier::new(vec![h], 2).unwrap();

        // doc 1 misses both of its labels
        assert_eq!(hamming_loss(&index, &f), 0.5);
        assert_eq!(subset_zero_one_loss(&index, &f), 0.5);
    }
}
