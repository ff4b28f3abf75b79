mod loader;

use std::collections::BTreeMap;

pub use loader::{counts_from_gmt, load_counts_json, load_merged, write_counts_json};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackgroundCounts {
    counts: BTreeMap<String, u64>,
}

impl BackgroundCounts {
    pub fn new(counts: BTreeMap<String, u64>) -> Self {
        Self { counts }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, entity_id: &str) -> Option<u64> {
        self.counts.get(entity_id).copied().filter(|&n| n > 0)
    }

    // Exact, upper, lower, then capitalized.
    pub fn resolve(&self, term: &str) -> Option<u64> {
        self.get(term)
            .or_else(|| self.get(&term.to_uppercase()))
            .or_else(|| self.get(&term.to_lowercase()))
            .or_else(|| self.get(&capitalize(term)))
    }

    pub fn extend(&mut self, other: BackgroundCounts) {
        self.counts.extend(other.counts);
    }

    pub fn accumulate(&mut self, other: BackgroundCounts) {
        for (entity, n) in other.counts {
            *self.counts.entry(entity).or_insert(0) += n;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, u64)> for BackgroundCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

fn capitalize(term: &str) -> String {
    let lower = term.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
