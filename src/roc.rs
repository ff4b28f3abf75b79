//! ROC curve and AUC over a frozen pool.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::error::{ConsensusError, Result};
use crate::pool::{ConfigKey, ScoredPool};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocResult {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    pub auc: f64,
}

pub fn roc_curve(key: &ConfigKey, pool: &ScoredPool) -> Result<RocResult> {
    let positives = pool.positives();
    let negatives = pool.negatives();
    if positives == 0 || negatives == 0 {
        return Err(ConsensusError::DegenerateLabelSet {
            key: key.to_string(),
            positives,
            negatives,
        });
    }

    let mut pairs = pool.pairs().to_vec();
    pairs.sort_by(|a, b| b.0.total_cmp(&a.0));

    let p = positives as f64;
    let n = negatives as f64;
    let mut fpr = vec![0.0];
    let mut tpr = vec![0.0];
    let mut tp = 0usize;
    let mut fp = 0usize;

    let mut i = 0;
    while i < pairs.len() {
        let current = pairs[i].0;
        while i < pairs.len() && pairs[i].0.total_cmp(&current).is_eq() {
            if pairs[i].1 {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        fpr.push(fp as f64 / n);
        tpr.push(tp as f64 / p);
    }

    let auc = trapezoidal_auc(&fpr, &tpr);
    Ok(RocResult { fpr, tpr, auc })
}

#[derive(Debug, Clone)]
pub struct ConfigResult {
    pub key: ConfigKey,
    pub n_pairs: usize,
    pub n_positive: usize,
    pub outcome: Result<RocResult>,
}

impl ConfigResult {
    pub fn auc(&self) -> Option<f64> {
        self.outcome.as_ref().ok().map(|r| r.auc)
    }
}

pub fn evaluate_all(pools: &BTreeMap<ConfigKey, ScoredPool>) -> Vec<ConfigResult> {
    pools
        .iter()
        .map(|(key, pool)| {
            let outcome = roc_curve(key, pool);
            if let Err(e) = &outcome {
                warn!(key = %key, error = %e, "roc_skipped");
            }
            ConfigResult {
                key: key.clone(),
                n_pairs: pool.len(),
                n_positive: pool.positives(),
                outcome,
            }
        })
        .collect()
}

fn trapezoidal_auc(x: &[f64], y: &[f64]) -> f64 {
    let mut auc = 0.0;
    for i in 1..x.len() {
        auc += (x[i] - x[i - 1]) * (y[i] + y[i - 1]) / 2.0;
    }
    auc.clamp(0.0, 1.0)
}
