mod common;

use tcboost::prelude::*;


#[test]
fn merge_equals_independent_classification() {
    common::init_logger();
    let index = common::two_topics();
    let documents = (0..index.n_documents()).collect::<Vec<_>>();
    let learner = AdaBoost::init(MultiPivot::new()).max_iterations(6);

    let parts = (0..index.n_categories())
        .map(|c| {
            let view = IndexView::new(&index, documents.clone(), vec![c]).unwrap();
            learner.build(&view).unwrap()
        })
        .collect::<Vec<_>>();

    let merged = learner.merge(parts.clone()).unwrap();
    assert_eq!(merged.n_categories(), 2);
    assert_eq!(merged.n_rounds(), 6);

    for d in documents {
        let expected = parts.iter()
            .map(|f| f.classify(&index, d).scores[0])
            .collect::<Vec<_>>();
        assert_eq!(merged.classify(&index, d).scores, expected);
    }
}


#[test]
fn merge_rejects_different_round_counts() {
    let index = common::two_topics();
    let documents = (0..index.n_documents()).collect::<Vec<_>>();
    let first = IndexView::new(&index, documents.clone(), vec![0]).unwrap();
    let second = IndexView::new(&index, documents, vec![1]).unwrap();

    let short = AdaBoost::init(MultiPivot::new()).max_iterations(2);
    let long = AdaBoost::init(MultiPivot::new()).max_iterations(3);
    let parts = vec![
        short.build(&first).unwrap(),
        long.build(&second).unwrap(),
    ];

    let err = short.merge(parts);
    assert!(matches!(err, Err(Error::IterationMismatch { expected: 2, found: 3 })));
}
