use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::ctx::Ctx;
use crate::schema::v1::{
    ConfigurationResult, ConsensusReportV1, Curve, SweepFailureEntry, TrialSummary,
};

pub fn build_report(ctx: &Ctx) -> Result<ConsensusReportV1> {
    let mut report = ctx.report.clone();

    report.results = ctx
        .results
        .iter()
        .map(|r| {
            let (auc, failure, curve) = match &r.outcome {
                Ok(roc) => (
                    Some(roc.auc),
                    None,
                    ctx.write_json.then(|| Curve {
                        fpr: roc.fpr.clone(),
                        tpr: roc.tpr.clone(),
                    }),
                ),
                Err(err) => (None, Some(err.to_string()), None),
            };
            ConfigurationResult {
                method: r.key.method.clone(),
                depth: r.key.depth,
                n_pairs: r.n_pairs as u64,
                n_positive: r.n_positive as u64,
                auc,
                failure,
                curve,
            }
        })
        .collect();

    report.trials = ctx
        .sweep
        .trials
        .iter()
        .map(|t| TrialSummary {
            method: t.method.clone(),
            trial: t.trial.clone(),
            records: t.records as u64,
            skipped_rows: t.skipped_rows as u64,
            filtered_rows: t.filtered_rows as u64,
            unknown_entities: t.unknown_entities as u64,
            rejected_tables: t.rejected_tables as u64,
        })
        .collect();

    report.failures = ctx
        .sweep
        .failures
        .iter()
        .map(|f| SweepFailureEntry {
            method: f.key.method.clone(),
            depth: f.key.depth,
            trial: f.trial.clone(),
            error: f.error.to_string(),
        })
        .collect();

    report.warnings = ctx.warnings.clone();
    Ok(report)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}
