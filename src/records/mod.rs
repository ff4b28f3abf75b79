//! Canonical signature records and the schema variants they are parsed from.

mod table;
pub mod term;

use serde::{Deserialize, Serialize};

use crate::consensus::aggregate::HIT_THRESHOLD;
use crate::error::{ConsensusError, Result};

pub use table::Table;

pub const EXCLUDED_TERM_MARKER: &str = "BRDN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("up") {
            Some(Direction::Up)
        } else if token.eq_ignore_ascii_case("down") {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Evidence {
    Directional(Direction),
    Paired { mimic: f64, reverse: f64 },
    Generic {
        pvalue: f64,
        direction: Option<Direction>,
        count: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureRecord {
    pub entity_id: String,
    pub evidence: Evidence,
}

impl SignatureRecord {
    pub fn direction(&self) -> Option<Direction> {
        match &self.evidence {
            Evidence::Directional(d) => Some(*d),
            Evidence::Paired { .. } => None,
            Evidence::Generic { direction, .. } => *direction,
        }
    }

    pub fn is_up_hit(&self) -> bool {
        match &self.evidence {
            Evidence::Directional(d) => *d == Direction::Up,
            Evidence::Paired { mimic, .. } => *mimic < HIT_THRESHOLD,
            Evidence::Generic { .. } => false,
        }
    }

    pub fn is_down_hit(&self) -> bool {
        match &self.evidence {
            Evidence::Directional(d) => *d == Direction::Down,
            Evidence::Paired { reverse, .. } => *reverse < HIT_THRESHOLD,
            Evidence::Generic { .. } => false,
        }
    }

    pub fn significance(&self) -> Option<f64> {
        match &self.evidence {
            Evidence::Directional(_) => None,
            Evidence::Paired { mimic, .. } => Some(*mimic),
            Evidence::Generic { pvalue, .. } => Some(*pvalue),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    DirectionalTerm,
    PairedPvalue,
    GenericPvalue,
}

#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub records: Vec<SignatureRecord>,
    pub skipped_rows: usize,
    pub filtered_rows: usize,
}

impl SchemaVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVariant::DirectionalTerm => "directional_term",
            SchemaVariant::PairedPvalue => "paired_pvalue",
            SchemaVariant::GenericPvalue => "generic_pvalue",
        }
    }

    pub fn normalize(&self, table: &Table, cutoff: f64) -> Result<Normalized> {
        let mut out = match self {
            SchemaVariant::DirectionalTerm => normalize_directional(table)?,
            SchemaVariant::PairedPvalue => normalize_paired(table)?,
            SchemaVariant::GenericPvalue => normalize_generic(table, cutoff)?,
        };
        order_by_significance(&mut out.records);
        Ok(out)
    }
}

fn normalize_directional(table: &Table) -> Result<Normalized> {
    let term_col = required(table, &["term"])?;
    let mut out = Normalized::default();
    for row in table.rows() {
        let Some(term) = row.get(term_col) else {
            out.skipped_rows += 1;
            continue;
        };
        if term.contains(EXCLUDED_TERM_MARKER) {
            out.filtered_rows += 1;
            continue;
        }
        match parse_directional(term) {
            Ok(record) => out.records.push(record),
            Err(_) => out.skipped_rows += 1,
        }
    }
    Ok(out)
}

pub fn parse_directional(term: &str) -> Result<SignatureRecord> {
    let direction = term::direction_suffix(term)
        .ok_or_else(|| ConsensusError::Schema(format!("no direction in term '{}'", term)))?;
    let entity_id = term::entity_from_term(term)?;
    Ok(SignatureRecord {
        entity_id,
        evidence: Evidence::Directional(direction),
    })
}

fn normalize_paired(table: &Table) -> Result<Normalized> {
    let sig_col = required(table, &["sig", "term"])?;
    let mimic_col = required(table, &["pvalue_mimic"])?;
    let reverse_col = required(table, &["pvalue_reverse"])?;
    let mut out = Normalized::default();
    for row in table.rows() {
        let parsed = (|| -> Result<SignatureRecord> {
            let sig = cell(row, sig_col)?;
            let mimic = parse_pvalue(cell(row, mimic_col)?)?;
            let reverse = parse_pvalue(cell(row, reverse_col)?)?;
            Ok(SignatureRecord {
                entity_id: term::entity_from_term(sig)?,
                evidence: Evidence::Paired { mimic, reverse },
            })
        })();
        match parsed {
            Ok(record) if record.is_up_hit() => out.records.push(record),
            Ok(_) => out.filtered_rows += 1,
            Err(_) => out.skipped_rows += 1,
        }
    }
    Ok(out)
}

fn normalize_generic(table: &Table, cutoff: f64) -> Result<Normalized> {
    let term_col = table
        .column(&["term"])
        .or_else(|| table.unnamed_index_column())
        .ok_or_else(|| ConsensusError::Schema("missing column 'term'".to_string()))?;
    let pvalue_col = required(table, &["p-value", "pvalue"])?;
    let count_col = table.column(&["total sigs", "count"]);
    let mut out = Normalized::default();
    for row in table.rows() {
        let parsed = (|| -> Result<SignatureRecord> {
            let term = cell(row, term_col)?;
            let mut tokens = term.split_whitespace();
            let entity_id = tokens
                .next()
                .ok_or_else(|| ConsensusError::Schema("empty term".to_string()))?
                .to_string();
            let direction = tokens.next().and_then(Direction::from_token);
            let pvalue = parse_pvalue(cell(row, pvalue_col)?)?;
            let count = match count_col.and_then(|c| row.get(c)) {
                Some(raw) if !raw.trim().is_empty() => Some(parse_count(raw)?),
                _ => None,
            };
            Ok(SignatureRecord {
                entity_id,
                evidence: Evidence::Generic {
                    pvalue,
                    direction,
                    count,
                },
            })
        })();
        match parsed {
            Ok(record) if record.significance().is_some_and(|p| p < cutoff) => {
                out.records.push(record)
            }
            Ok(_) => out.filtered_rows += 1,
            Err(_) => out.skipped_rows += 1,
        }
    }
    Ok(out)
}

// Stable: directional rows carry no significance and keep upstream order.
fn order_by_significance(records: &mut [SignatureRecord]) {
    records.sort_by(|a, b| match (a.significance(), b.significance()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => std::cmp::Ordering::Equal,
    });
}

fn required(table: &Table, names: &[&str]) -> Result<usize> {
    table
        .column(names)
        .ok_or_else(|| ConsensusError::Schema(format!("missing column '{}'", names[0])))
}

fn cell(row: &[String], idx: usize) -> Result<&str> {
    row.get(idx)
        .map(|s| s.as_str())
        .ok_or_else(|| ConsensusError::Schema(format!("row has no column {}", idx)))
}

fn parse_pvalue(raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConsensusError::Schema(format!("invalid p-value '{}'", raw)))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConsensusError::Schema(format!(
            "p-value out of range: {}",
            value
        )));
    }
    Ok(value)
}

fn parse_count(raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<u64>() {
        return Ok(v);
    }
    // integer columns with missing values arrive as floats
    match trimmed.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 => Ok(v as u64),
        _ => Err(ConsensusError::Schema(format!("invalid count '{}'", raw))),
    }
}
