use std::fmt;

use serde::Serialize;

use crate::rank::RankedEntity;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ConfigKey {
    pub method: String,
    pub depth: Option<usize>,
}

impl ConfigKey {
    pub fn new(method: impl Into<String>, depth: Option<usize>) -> Self {
        Self {
            method: method.into(),
            depth,
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.depth {
            Some(depth) => write!(f, "{}@{}", self.method, depth),
            None => write!(f, "{}", self.method),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredPool {
    pairs: Vec<(f64, bool)>,
}

impl ScoredPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, score: f64, label: bool) {
        self.pairs.push((score, label));
    }

    pub fn extend_ranked(&mut self, ranked: &[RankedEntity]) {
        self.pairs.extend(ranked.iter().map(|r| (r.score, r.label)));
    }

    pub fn pairs(&self) -> &[(f64, bool)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn positives(&self) -> usize {
        self.pairs.iter().filter(|(_, l)| *l).count()
    }

    pub fn negatives(&self) -> usize {
        self.len() - self.positives()
    }
}

impl FromIterator<(f64, bool)> for ScoredPool {
    fn from_iter<I: IntoIterator<Item = (f64, bool)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}
