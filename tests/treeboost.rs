mod common;

use tcboost::prelude::*;

use std::collections::HashSet;


fn learner() -> TreeBoost<AdaBoost<MultiPivot>> {
    TreeBoost::init(AdaBoost::init(MultiPivot::new()).max_iterations(5))
}


#[test]
fn address_bijection() {
    common::init_logger();
    let index = common::hierarchy();
    let f = learner().build(&index).unwrap();

    let mut seen = HashSet::new();
    for c in 0..index.n_categories() {
        let address = f.address_of(c).unwrap();
        assert!(seen.insert(address), "{address:?} is used twice");
        assert_eq!(f.category_at(address), Some(c));
    }
    assert_eq!(f.addresses().count(), index.n_categories());

    let sport = index.category_id("sport").unwrap();
    let golf = index.category_id("golf").unwrap();
    assert_eq!(f.address_of(golf).unwrap().level, Level::Category(sport));
    assert_eq!(f.address_of(sport).unwrap().level, Level::Root);
}


#[test]
fn documents_descend_the_tree() {
    common::init_logger();
    let index = common::hierarchy();
    let sport = index.category_id("sport").unwrap();
    let tennis = index.category_id("tennis").unwrap();
    let news = index.category_id("news").unwrap();
    let economy = index.category_id("economy").unwrap();
    let misc = index.category_id("misc").unwrap();

    let f = learner().build(&index).unwrap();
    assert_eq!(f.accepted(&f.classify(&index, 0)), vec![sport, tennis]);
    assert_eq!(f.accepted(&f.classify(&index, 6)), vec![news, economy]);
    assert_eq!(f.accepted(&f.classify(&index, 8)), vec![misc]);

    // a child is only scored or accepted through an accepted parent
    for d in 0..index.n_documents() {
        let result = f.classify(&index, d);
        let accepted = f.accepted(&result);
        for &c in result.categories.iter() {
            for p in index.parent_categories(c) {
                assert!(accepted.contains(&p));
            }
        }
    }
}


#[test]
fn rejected_categories_keep_their_scores() {
    let index = common::hierarchy();
    let sport = index.category_id("sport").unwrap();
    let news = index.category_id("news").unwrap();
    let misc = index.category_id("misc").unwrap();

    let f = learner().build(&index).unwrap();
    let result = f.classify(&index, 0);
    let accepted = f.accepted(&result);

    // every root category is scored, only sport is accepted
    for c in [sport, news, misc] {
        assert!(result.categories.contains(&c));
    }
    for (c, score) in result.iter() {
        assert_eq!(accepted.contains(&c), f.classifier_range(c).accepts(score));
    }
    assert!(!accepted.contains(&news));
    assert!(!accepted.contains(&misc));
}


#[test]
fn iterations_reach_every_level() {
    let index = common::hierarchy();
    let mut f = learner().build(&index).unwrap();
    f.set_iterations(2);
    for level in f.levels().collect::<Vec<_>>() {
        if let Some(inner) = &f.node(level).unwrap().classifier {
            assert_eq!(inner.iterations(), 2);
        }
    }
}


#[test]
fn every_chooser_builds() {
    let index = common::hierarchy();
    let choosers: Vec<Box<dyn Fn(TreeBoost<AdaBoost<MultiPivot>>) -> TreeBoost<AdaBoost<MultiPivot>>>> = vec![
        Box::new(|t| t.negatives(AllNegatives)),
        Box::new(|t| t.negatives(SiblingNegatives)),
        Box::new(|t| t.negatives(CentroidNegatives::new().min_count(2))),
        Box::new(|t| t.negatives(KnnNegatives::new(2))),
        Box::new(|t| t.negatives(ClusterNegatives::new(2).seed(5))),
    ];
    for with_chooser in choosers {
        let f = with_chooser(learner()).build(&index).unwrap();
        assert_eq!(f.addresses().count(), index.n_categories());
    }
}


#[test]
fn node_learner_overrides_one_level() {
    let index = common::hierarchy();
    let sport = index.category_id("sport").unwrap();
    let f = learner()
        .node_learner(Level::Category(sport), AdaBoost::init(MultiPivot::new()).max_iterations(1))
        .build(&index)
        .unwrap();

    let rounds = |level| {
        f.node(level).unwrap().classifier.as_ref().unwrap().n_rounds()
    };
    assert_eq!(rounds(Level::Root), 5);
    assert_eq!(rounds(Level::Category(sport)), 1);
}


#[test]
fn node_without_documents_is_fatal() {
    let mut index = common::hierarchy();
    let empty = index.add_category("empty", None).unwrap();
    index.add_category("hockey", Some(empty)).unwrap();
    index.add_category("curling", Some(empty)).unwrap();

    let err = learner().build(&index);
    assert!(matches!(err, Err(Error::EmptyTrainingSet { .. })));
}
