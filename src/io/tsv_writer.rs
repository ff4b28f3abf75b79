use std::collections::BTreeMap;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::pool::{ConfigKey, ScoredPool};
use crate::roc::ConfigResult;

pub fn write_roc_curves(path: &Path, results: &[ConfigResult]) -> Result<()> {
    let mut w = create(path)?;
    writeln!(w, "method\tdepth\tfpr\ttpr")?;
    for result in results {
        let Ok(roc) = &result.outcome else {
            continue;
        };
        let depth = depth_cell(&result.key);
        for (fpr, tpr) in roc.fpr.iter().zip(&roc.tpr) {
            writeln!(
                w,
                "{}\t{}\t{:.6}\t{:.6}",
                result.key.method, depth, fpr, tpr
            )?;
        }
    }
    w.flush()?;
    Ok(())
}

pub fn write_auc_by_depth(path: &Path, results: &[ConfigResult]) -> Result<()> {
    let mut w = create(path)?;
    writeln!(w, "method\tdepth\tauc\tn_pairs\tn_positive")?;
    for result in results {
        let auc = match result.auc() {
            Some(auc) => format!("{:.6}", auc),
            None => "NA".to_string(),
        };
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            result.key.method,
            depth_cell(&result.key),
            auc,
            result.n_pairs,
            result.n_positive
        )?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_pools(path: &Path, pools: &BTreeMap<ConfigKey, ScoredPool>) -> Result<()> {
    let mut w = create(path)?;
    writeln!(w, "method\tdepth\tscore\tlabel")?;
    for (key, pool) in pools {
        let depth = depth_cell(key);
        for &(score, label) in pool.pairs() {
            writeln!(
                w,
                "{}\t{}\t{:.6}\t{}",
                key.method,
                depth,
                score,
                u8::from(label)
            )?;
        }
    }
    w.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<std::fs::File>> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn depth_cell(key: &ConfigKey) -> String {
    key.depth.map_or_else(|| "NA".to_string(), |d| d.to_string())
}
