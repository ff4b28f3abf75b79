use crate::background::BackgroundCounts;
use crate::label::LabelOracle;
use crate::rank::{Candidate, RankOptions, RankedEntity, ScoreConvention, SortOrder, rank};

pub const BASELINE_METHOD: &str = "count";

pub fn rank_by_count(background: &BackgroundCounts, oracle: &dyn LabelOracle) -> Vec<RankedEntity> {
    let candidates = background
        .iter()
        .map(|(entity, count)| Candidate {
            entity_id: entity.to_string(),
            pvalue_primary: 1.0,
            pvalue_secondary: 1.0,
            key: count as f64,
            direction: None,
        })
        .collect();
    rank(
        candidates,
        RankOptions {
            order: SortOrder::Descending,
            convention: ScoreConvention::Exclusive,
            required_direction: None,
        },
        oracle,
    )
}
