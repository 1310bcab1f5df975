#![allow(dead_code)]

use tcboost::prelude::*;


pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}


/// 10 documents, 2 categories, 5 binary features.
/// `even` holds iff feature 0, `small` holds iff feature 1;
/// features 2..5 are noise.
pub fn two_topics() -> MemoryIndex {
    let mut index = MemoryIndex::new(5);
    let even = index.add_category("even", None).unwrap();
    let small = index.add_category("small", None).unwrap();
    for d in 0..10 {
        let mut features = vec![2 + d % 3];
        let mut labels = Vec::new();
        if d % 2 == 0 {
            features.push(0);
            labels.push(even);
        }
        if d < 5 {
            features.push(1);
            labels.push(small);
        }
        index.add_document(&features, &labels).unwrap();
    }
    index
}


/// A two-level tree:
/// `sport` (`tennis`, `golf`), `news` (`politics`, `economy`), `misc`.
/// Every document carries a leaf label and the label of its parent.
pub fn hierarchy() -> MemoryIndex {
    let mut index = MemoryIndex::new(8);
    let sport = index.add_category("sport", None).unwrap();
    let news = index.add_category("news", None).unwrap();
    let misc = index.add_category("misc", None).unwrap();
    let tennis = index.add_category("tennis", Some(sport)).unwrap();
    let golf = index.add_category("golf", Some(sport)).unwrap();
    let politics = index.add_category("politics", Some(news)).unwrap();
    let economy = index.add_category("economy", Some(news)).unwrap();

    // (features, leaf)
    let documents = [
        (vec![0, 1], tennis),
        (vec![0, 1, 7], tennis),
        (vec![0, 2], golf),
        (vec![0, 2, 7], golf),
        (vec![3, 4], politics),
        (vec![3, 4, 7], politics),
        (vec![3, 5], economy),
        (vec![3, 5, 7], economy),
        (vec![6], misc),
        (vec![6, 7], misc),
    ];
    for (features, leaf) in documents {
        index.add_document(&features, &[leaf]).unwrap();
    }
    index.propagate_labels_to_ancestors();
    index
}


/// Share of `(document, category)` pairs the classifier gets right.
pub fn agreement<C>(index: &dyn Index, f: &C) -> f64
    where C: Classifier + Sync,
{
    1f64 - tcboost::research::hamming_loss(index, f)
}
