use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsensusError {
    #[error("schema error: {0}")]
    Schema(String),

    #[error(
        "negative count for '{entity_id}': a_up={a_up} b_up={b_up} a_down={a_down} b_down={b_down}"
    )]
    NegativeCount {
        entity_id: String,
        a_up: i64,
        b_up: i64,
        a_down: i64,
        b_down: i64,
    },

    #[error("degenerate label set for {key}: {positives} positive, {negatives} negative")]
    DegenerateLabelSet {
        key: String,
        positives: usize,
        negatives: usize,
    },

    #[error("kernel returned invalid p-value {value} for '{entity_id}'")]
    Kernel { entity_id: String, value: f64 },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConsensusError>;
