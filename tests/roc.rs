use std::collections::BTreeMap;

use kira_consensus::error::ConsensusError;
use kira_consensus::pool::{ConfigKey, ScoredPool};
use kira_consensus::roc::{evaluate_all, roc_curve};

fn pool(pairs: &[(f64, bool)]) -> ScoredPool {
    pairs.iter().copied().collect()
}

#[test]
fn one_swap_gives_three_quarters() {
    let key = ConfigKey::new("pvalue_up", Some(500));
    let roc = roc_curve(
        &key,
        &pool(&[(0.9, true), (0.8, false), (0.1, true), (0.05, false)]),
    )
    .unwrap();
    assert!((roc.auc - 0.75).abs() < 1e-9, "{}", roc.auc);
    assert_eq!(roc.fpr, vec![0.0, 0.0, 0.5, 0.5, 1.0]);
    assert_eq!(roc.tpr, vec![0.0, 0.5, 0.5, 1.0, 1.0]);
}

#[test]
fn curve_is_monotone_and_pinned() {
    let pairs: Vec<(f64, bool)> = (0..100)
        .map(|i| (((i * 31) % 17) as f64 / 17.0, i % 3 == 0))
        .collect();
    let roc = roc_curve(&ConfigKey::new("m", None), &pool(&pairs)).unwrap();
    assert_eq!((roc.fpr[0], roc.tpr[0]), (0.0, 0.0));
    assert_eq!(
        (*roc.fpr.last().unwrap(), *roc.tpr.last().unwrap()),
        (1.0, 1.0)
    );
    for w in roc.fpr.windows(2) {
        assert!(w[0] <= w[1]);
    }
    for w in roc.tpr.windows(2) {
        assert!(w[0] <= w[1]);
    }
    assert!((0.0..=1.0).contains(&roc.auc));
}

#[test]
fn evaluation_is_idempotent() {
    let p = pool(&[(0.3, true), (0.3, false), (0.7, false), (0.9, true), (0.1, false)]);
    let key = ConfigKey::new("m", Some(1000));
    let first = roc_curve(&key, &p).unwrap();
    let second = roc_curve(&key, &p).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.auc.to_bits(), second.auc.to_bits());
}

#[test]
fn tie_order_does_not_matter() {
    let key = ConfigKey::new("m", None);
    let a = roc_curve(&key, &pool(&[(0.5, true), (0.5, false), (0.2, false)])).unwrap();
    let b = roc_curve(&key, &pool(&[(0.5, false), (0.2, false), (0.5, true)])).unwrap();
    assert_eq!(a, b);
}

#[test]
fn single_class_pools_are_degenerate() {
    let key = ConfigKey::new("m", Some(500));
    for pairs in [vec![(0.9, true), (0.1, true)], vec![(0.9, false)], vec![]] {
        let err = roc_curve(&key, &pool(&pairs)).unwrap_err();
        assert!(matches!(err, ConsensusError::DegenerateLabelSet { .. }));
    }
}

#[test]
fn evaluate_all_reports_degenerate_pools_alongside_others() {
    let mut pools = BTreeMap::new();
    pools.insert(
        ConfigKey::new("m", Some(500)),
        pool(&[(0.9, true), (0.1, false)]),
    );
    pools.insert(ConfigKey::new("m", Some(1000)), pool(&[(0.9, false)]));

    let results = evaluate_all(&pools);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].auc(), Some(1.0));
    assert_eq!(results[0].n_pairs, 2);
    assert_eq!(results[0].n_positive, 1);
    assert!(results[1].outcome.is_err());
    assert_eq!(results[1].auc(), None);
}

#[test]
fn perfect_separation_is_one() {
    let key = ConfigKey::new("pvalue_up", None);
    let roc = roc_curve(&key, &pool(&[(0.9, true), (0.7, true), (0.2, false)])).unwrap();
    assert_eq!(roc.auc, 1.0);
}

#[test]
fn all_tied_scores_give_the_diagonal() {
    let key = ConfigKey::new("pvalue_up", None);
    let roc = roc_curve(&key, &pool(&[(0.5, true), (0.5, false), (0.5, false)])).unwrap();
    assert_eq!(roc.fpr, vec![0.0, 1.0]);
    assert_eq!(roc.tpr, vec![0.0, 1.0]);
    assert!((roc.auc - 0.5).abs() < 1e-12);
}
