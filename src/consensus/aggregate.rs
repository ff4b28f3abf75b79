use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::background::BackgroundCounts;
use crate::error::{ConsensusError, Result};
use crate::records::SignatureRecord;

pub const HIT_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContingencyTable {
    pub entity_id: String,
    pub a_up: u64,
    pub b_up: u64,
    pub a_down: u64,
    pub b_down: u64,
}

impl ContingencyTable {
    // Down cells are floor(total / 2) minus the observed hits.
    pub fn derive(entity_id: &str, a_up: u64, b_up: u64, total_trials: u64) -> Result<Self> {
        let half = (total_trials / 2) as i64;
        let a_down = half - a_up as i64;
        let b_down = half - b_up as i64;
        if a_down < 0 || b_down < 0 {
            return Err(ConsensusError::NegativeCount {
                entity_id: entity_id.to_string(),
                a_up: a_up as i64,
                b_up: b_up as i64,
                a_down,
                b_down,
            });
        }
        Ok(Self {
            entity_id: entity_id.to_string(),
            a_up,
            b_up,
            a_down: a_down as u64,
            b_down: b_down as u64,
        })
    }

    pub fn cells(&self) -> [u64; 4] {
        [self.a_up, self.b_up, self.a_down, self.b_down]
    }

    pub fn swap_rows(&self) -> Self {
        Self {
            entity_id: self.entity_id.clone(),
            a_up: self.b_up,
            b_up: self.a_up,
            a_down: self.b_down,
            b_down: self.a_down,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub tables: Vec<ContingencyTable>,
    pub unknown_entities: usize,
    pub rejected: Vec<ConsensusError>,
}

pub fn aggregate(
    records: &[SignatureRecord],
    depth: Option<usize>,
    background: &BackgroundCounts,
) -> Aggregation {
    let cut = depth.map_or(records.len(), |n| n.min(records.len()));
    let mut hits: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for record in &records[..cut] {
        let entry = hits.entry(record.entity_id.as_str()).or_insert((0, 0));
        if record.is_up_hit() {
            entry.0 += 1;
        }
        if record.is_down_hit() {
            entry.1 += 1;
        }
    }

    let mut out = Aggregation::default();
    for (entity_id, (a_up, b_up)) in hits {
        let Some(total) = background.get(entity_id) else {
            out.unknown_entities += 1;
            continue;
        };
        match ContingencyTable::derive(entity_id, a_up, b_up, total) {
            Ok(table) => out.tables.push(table),
            Err(err) => {
                warn!(entity = entity_id, a_up, b_up, total, error = %err, "table_rejected");
                out.rejected.push(err);
            }
        }
    }
    debug!(
        depth = cut,
        tables = out.tables.len(),
        unknown = out.unknown_entities,
        rejected = out.rejected.len(),
        "aggregated"
    );
    out
}
