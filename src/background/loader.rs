use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::background::BackgroundCounts;
use crate::io::open_maybe_gz;
use crate::records::EXCLUDED_TERM_MARKER;
use crate::records::term::entity_from_term;

pub fn load_counts_json(path: &Path) -> Result<BackgroundCounts> {
    let reader = open_maybe_gz(path)
        .with_context(|| format!("failed to open background counts {}", path.display()))?;
    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_reader(BufReader::new(reader))
        .with_context(|| format!("failed to parse background counts {}", path.display()))?;

    let mut counts = BTreeMap::new();
    for (entity, value) in raw {
        let n = match value.as_u64() {
            Some(n) => n,
            // counts written from dataframes can come back as floats
            None => match value.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 => f as u64,
                _ => bail!(
                    "{}: count for '{}' is not a non-negative integer",
                    path.display(),
                    entity
                ),
            },
        };
        counts.insert(entity, n);
    }
    Ok(BackgroundCounts::new(counts))
}

pub fn load_merged(paths: &[impl AsRef<Path>]) -> Result<BackgroundCounts> {
    let mut merged = BackgroundCounts::default();
    for path in paths {
        let path = path.as_ref();
        let counts = load_counts_json(path)?;
        info!(path = %path.display(), entities = counts.len(), "background_loaded");
        merged.extend(counts);
    }
    Ok(merged)
}

pub fn counts_from_gmt(path: &Path) -> Result<BackgroundCounts> {
    let reader = BufReader::new(
        open_maybe_gz(path).with_context(|| format!("failed to open GMT {}", path.display()))?,
    );
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut unparsable = 0usize;
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("{}:{} read failed", path.display(), idx + 1))?;
        let term = line.split('\t').next().unwrap_or_default().trim();
        if term.is_empty() {
            continue;
        }
        let Ok(entity) = entity_from_term(term) else {
            unparsable += 1;
            continue;
        };
        if entity.starts_with(EXCLUDED_TERM_MARKER) {
            continue;
        }
        *counts.entry(entity).or_insert(0) += 1;
    }
    info!(
        path = %path.display(),
        entities = counts.len(),
        unparsable,
        "gmt_counted"
    );
    Ok(BackgroundCounts::new(counts))
}

pub fn write_counts_json(path: &Path, counts: &BackgroundCounts) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let map: BTreeMap<&str, u64> = counts.iter().collect();
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &map)?;
    Ok(())
}
