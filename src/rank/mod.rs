pub mod baseline;

use serde::{Deserialize, Serialize};

use crate::label::{LabelOracle, label_entity};
use crate::records::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreConvention {
    // 1 - i/N
    Inclusive,
    // 1 - (i+1)/N
    #[default]
    Exclusive,
}

impl ScoreConvention {
    pub fn score(&self, position: usize, count: usize) -> f64 {
        let offset = match self {
            ScoreConvention::Inclusive => 0,
            ScoreConvention::Exclusive => 1,
        };
        1.0 - ((position + offset) as f64 / count as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub entity_id: String,
    pub pvalue_primary: f64,
    pub pvalue_secondary: f64,
    pub key: f64,
    pub direction: Option<Direction>,
}

impl Candidate {
    pub fn from_pvalues(entity_id: impl Into<String>, primary: f64, secondary: f64) -> Self {
        Self {
            entity_id: entity_id.into(),
            pvalue_primary: primary,
            pvalue_secondary: secondary,
            key: primary,
            direction: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntity {
    pub entity_id: String,
    pub pvalue_primary: f64,
    pub pvalue_secondary: f64,
    pub score: f64,
    pub label: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RankOptions {
    pub order: SortOrder,
    pub convention: ScoreConvention,
    pub required_direction: Option<Direction>,
}

// Stable: equal keys keep their incoming order.
pub fn rank(
    mut candidates: Vec<Candidate>,
    options: RankOptions,
    oracle: &dyn LabelOracle,
) -> Vec<RankedEntity> {
    match options.order {
        SortOrder::Ascending => candidates.sort_by(|a, b| a.key.total_cmp(&b.key)),
        SortOrder::Descending => candidates.sort_by(|a, b| b.key.total_cmp(&a.key)),
    }
    let count = candidates.len();
    candidates
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let label = label_entity(oracle, &c.entity_id, c.direction, options.required_direction);
            RankedEntity {
                score: options.convention.score(i, count),
                label,
                entity_id: c.entity_id,
                pvalue_primary: c.pvalue_primary,
                pvalue_secondary: c.pvalue_secondary,
            }
        })
        .collect()
}

// -ln(p) + ln(1 / count^2)
pub fn count_normalized_score(pvalue: f64, count: u64) -> Option<f64> {
    if count == 0 {
        return None;
    }
    let c = count as f64;
    Some(-pvalue.ln() + (1.0 / (c * c)).ln())
}
