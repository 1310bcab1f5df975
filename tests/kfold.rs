mod common;

use tcboost::prelude::*;
use tcboost::research::{FoldSplit, KFoldEvaluator, PerCategoryKFold};


fn tree_learner() -> TreeBoost<AdaBoost<MultiPivot>> {
    TreeBoost::init(AdaBoost::init(MultiPivot::new()).max_iterations(5))
}


#[test]
fn stratified_tree_evaluation_counts_every_pair() {
    common::init_logger();
    let index = common::hierarchy();
    let report = KFoldEvaluator::new(tree_learner())
        .n_folds(2)
        .split(FoldSplit::Stratified)
        .keep_predictions(true)
        .evaluate(&index)
        .unwrap();

    assert_eq!(report.n_folds, 2);
    for table in report.tables.iter() {
        assert_eq!(table.total(), index.n_documents());
    }
    assert_eq!(report.predictions.unwrap().len(), index.n_documents());
}


#[test]
fn single_fold_tree_evaluation_is_perfect() {
    let index = common::hierarchy();
    let report = KFoldEvaluator::new(tree_learner())
        .n_folds(1)
        .evaluate(&index)
        .unwrap();
    assert_eq!(report.tables.micro().total(), 70);
    assert_eq!(report.tables.micro_f1(), 1f64);
}


#[test]
fn cancelled_evaluation_stops() {
    let index = common::two_topics();
    let token = CancellationToken::new();
    token.cancel();
    let result = KFoldEvaluator::new(AdaBoost::init(MultiPivot::new()))
        .n_folds(2)
        .cancel_with(token)
        .evaluate(&index);
    assert!(matches!(result, Err(Error::Cancelled)));
}


#[test]
fn per_category_evaluation() {
    common::init_logger();
    let index = common::two_topics();
    let learner = AdaBoost::init(SharedPivot::new()).max_iterations(5);
    let report = PerCategoryKFold::new(learner)
        .n_folds(5)
        .parallel(true)
        .evaluate(&index)
        .unwrap();

    assert_eq!(report.folds, vec![5, 5]);
    assert!(report.skipped.is_empty());
    for table in report.tables.iter() {
        assert_eq!(table.total(), 10);
    }
}
