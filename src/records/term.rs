use crate::error::{ConsensusError, Result};
use crate::records::Direction;

pub const TERM_DELIMITER: char = '_';
pub const ENTITY_FIELD: usize = 4;

// `XPR001_A549_96H_X1_NR3C1 down` -> `NR3C1`
pub fn entity_from_term(term: &str) -> Result<String> {
    let field = term
        .split(TERM_DELIMITER)
        .nth(ENTITY_FIELD)
        .ok_or_else(|| {
            ConsensusError::Schema(format!(
                "term '{}' has fewer than {} fields",
                term,
                ENTITY_FIELD + 1
            ))
        })?;
    let entity = field.split(' ').next().unwrap_or_default().trim();
    if entity.is_empty() {
        return Err(ConsensusError::Schema(format!(
            "term '{}' has an empty entity field",
            term
        )));
    }
    Ok(entity.to_string())
}

pub fn direction_suffix(term: &str) -> Option<Direction> {
    if term.contains(" up") {
        Some(Direction::Up)
    } else if term.contains(" down") {
        Some(Direction::Down)
    } else {
        None
    }
}
