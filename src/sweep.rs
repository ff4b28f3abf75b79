//! Drives aggregation, exact tests and ranking across depths and trials.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::background::BackgroundCounts;
use crate::config::{Metric, MethodConfig, ScoreKind};
use crate::consensus::{PValueKernel, aggregate, evaluate};
use crate::error::{ConsensusError, Result};
use crate::label::LabelOracle;
use crate::pool::{ConfigKey, ScoredPool};
use crate::rank::{
    Candidate, RankOptions, RankedEntity, SortOrder, count_normalized_score, rank,
};
use crate::records::{Evidence, SignatureRecord};

#[cfg(feature = "mt")]
use rayon::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct Trial {
    pub id: String,
    pub records: Vec<SignatureRecord>,
    pub skipped_rows: usize,
    pub filtered_rows: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DepthRun {
    pub ranked: Vec<RankedEntity>,
    pub unknown_entities: usize,
    pub rejected_tables: usize,
}

#[derive(Debug, Clone)]
pub struct SweepFailure {
    pub key: ConfigKey,
    pub trial: String,
    pub error: ConsensusError,
}

#[derive(Debug, Clone, Default)]
pub struct TrialStats {
    pub method: String,
    pub trial: String,
    pub records: usize,
    pub skipped_rows: usize,
    pub filtered_rows: usize,
    pub unknown_entities: usize,
    pub rejected_tables: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SweepOutput {
    pub pools: BTreeMap<ConfigKey, ScoredPool>,
    pub failures: Vec<SweepFailure>,
    pub trials: Vec<TrialStats>,
}

impl SweepOutput {
    pub fn merge(&mut self, other: SweepOutput) {
        for (key, pool) in other.pools {
            let target = self.pools.entry(key).or_default();
            for &(score, label) in pool.pairs() {
                target.push(score, label);
            }
        }
        self.failures.extend(other.failures);
        self.trials.extend(other.trials);
    }
}

pub struct Sweeper<'a, K: ?Sized> {
    kernel: &'a K,
    background: &'a BackgroundCounts,
    oracle: &'a dyn LabelOracle,
}

impl<'a, K> Sweeper<'a, K>
where
    K: PValueKernel + ?Sized,
{
    pub fn new(kernel: &'a K, background: &'a BackgroundCounts, oracle: &'a dyn LabelOracle) -> Self {
        Self {
            kernel,
            background,
            oracle,
        }
    }

    pub fn run(&self, method: &MethodConfig, trials: &[Trial]) -> SweepOutput {
        let plan = method.depth_plan();

        #[cfg(feature = "mt")]
        let per_trial: Vec<Vec<Result<DepthRun>>> = trials
            .par_iter()
            .map(|t| plan.iter().map(|&d| self.run_depth(method, t, d)).collect())
            .collect();

        #[cfg(not(feature = "mt"))]
        let per_trial: Vec<Vec<Result<DepthRun>>> = trials
            .iter()
            .map(|t| plan.iter().map(|&d| self.run_depth(method, t, d)).collect())
            .collect();

        let mut out = SweepOutput::default();
        for &depth in &plan {
            out.pools
                .insert(ConfigKey::new(method.name.clone(), depth), ScoredPool::new());
        }

        for (trial, runs) in trials.iter().zip(per_trial) {
            let mut stats = TrialStats {
                method: method.name.clone(),
                trial: trial.id.clone(),
                records: trial.records.len(),
                skipped_rows: trial.skipped_rows,
                filtered_rows: trial.filtered_rows,
                ..TrialStats::default()
            };
            for (&depth, run) in plan.iter().zip(runs) {
                let key = ConfigKey::new(method.name.clone(), depth);
                match run {
                    Ok(run) => {
                        stats.unknown_entities += run.unknown_entities;
                        stats.rejected_tables += run.rejected_tables;
                        if let Some(pool) = out.pools.get_mut(&key) {
                            pool.extend_ranked(&run.ranked);
                        }
                    }
                    Err(error) => {
                        warn!(key = %key, trial = %trial.id, error = %error, "trial_depth_failed");
                        out.failures.push(SweepFailure {
                            key,
                            trial: trial.id.clone(),
                            error,
                        });
                    }
                }
            }
            info!(
                method = %method.name,
                trial = %trial.id,
                records = stats.records,
                skipped_rows = stats.skipped_rows,
                rejected_tables = stats.rejected_tables,
                "trial_complete"
            );
            out.trials.push(stats);
        }
        out
    }

    pub fn run_depth(
        &self,
        method: &MethodConfig,
        trial: &Trial,
        depth: Option<usize>,
    ) -> Result<DepthRun> {
        let options = RankOptions {
            order: match method.score {
                ScoreKind::Pvalue => SortOrder::Ascending,
                ScoreKind::CountNormalized => SortOrder::Descending,
            },
            convention: method.convention,
            required_direction: method.direction,
        };

        match method.metric {
            Metric::Up | Metric::Down => {
                let aggregation = aggregate(&trial.records, depth, self.background);
                let pvalues = evaluate(self.kernel, &aggregation.tables)?;
                let candidates = aggregation
                    .tables
                    .iter()
                    .zip(&pvalues)
                    .map(|(table, p)| {
                        let (primary, secondary) = match method.metric {
                            Metric::Down => (p.down, p.up),
                            _ => (p.up, p.down),
                        };
                        Candidate::from_pvalues(table.entity_id.clone(), primary, secondary)
                    })
                    .collect();
                Ok(DepthRun {
                    ranked: rank(candidates, options, self.oracle),
                    unknown_entities: aggregation.unknown_entities,
                    rejected_tables: aggregation.rejected.len(),
                })
            }
            Metric::Pvalue => {
                let cut = depth.map_or(trial.records.len(), |n| n.min(trial.records.len()));
                let mut unknown = 0usize;
                let mut candidates = Vec::with_capacity(cut);
                for record in &trial.records[..cut] {
                    match self.generic_candidate(record, method.score) {
                        Some(c) => candidates.push(c),
                        None => unknown += 1,
                    }
                }
                Ok(DepthRun {
                    ranked: rank(candidates, options, self.oracle),
                    unknown_entities: unknown,
                    rejected_tables: 0,
                })
            }
        }
    }

    fn generic_candidate(&self, record: &SignatureRecord, score: ScoreKind) -> Option<Candidate> {
        let Evidence::Generic {
            pvalue,
            direction,
            count,
        } = &record.evidence
        else {
            return None;
        };
        let key = match score {
            ScoreKind::Pvalue => *pvalue,
            ScoreKind::CountNormalized => {
                let count = count.or_else(|| self.background.resolve(&record.entity_id))?;
                count_normalized_score(*pvalue, count)?
            }
        };
        Some(Candidate {
            entity_id: record.entity_id.clone(),
            pvalue_primary: *pvalue,
            pvalue_secondary: *pvalue,
            key,
            direction: *direction,
        })
    }
}
