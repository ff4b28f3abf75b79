use anyhow::Result;

use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let config = ctx.config()?;
    let trials: usize = ctx.trials.values().map(Vec::len).sum();

    let mut out = String::new();
    out.push_str(&format!("kira-consensus v{}\n", version));
    out.push_str(&format!(
        "Scenario: {} ({} methods, {} trials, {} background entities)\n",
        config.scenario,
        config.methods.len(),
        trials,
        ctx.background.len()
    ));

    for result in &ctx.results {
        match result.auc() {
            Some(auc) => out.push_str(&format!(
                "  {:<24} AUC={:.4} pairs={} positive={}\n",
                result.key.to_string(),
                auc,
                result.n_pairs,
                result.n_positive
            )),
            None => out.push_str(&format!(
                "  {:<24} AUC=NA pairs={} positive={}\n",
                result.key.to_string(),
                result.n_pairs,
                result.n_positive
            )),
        }
    }

    if let Some(best) = ctx
        .results
        .iter()
        .filter_map(|r| r.auc().map(|auc| (r, auc)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
    {
        out.push_str(&format!("Best: {} AUC={:.4}\n", best.0.key, best.1));
    }

    if !ctx.sweep.failures.is_empty() {
        out.push_str(&format!("Omitted trial runs: {}\n", ctx.sweep.failures.len()));
    }

    Ok(out)
}

pub fn methods_without_trials(ctx: &Ctx) -> Result<Vec<String>> {
    let config = ctx.config()?;
    Ok(config
        .methods
        .iter()
        .filter(|m| ctx.trials.get(&m.name).is_none_or(Vec::is_empty))
        .map(|m| m.name.clone())
        .collect())
}

pub fn format_validation(ctx: &Ctx) -> Result<String> {
    let config = ctx.config()?;
    let empty = methods_without_trials(ctx)?;
    let mut out = String::new();
    if empty.is_empty() {
        out.push_str("kira-consensus validate ok\n");
    } else {
        out.push_str(&format!(
            "kira-consensus validate failed: no usable trials for {}\n",
            empty.join(", ")
        ));
    }
    out.push_str(&format!("scenario: {}\n", config.scenario));
    out.push_str(&format!("background entities: {}\n", ctx.background.len()));
    for method in &config.methods {
        let trials = ctx.trials.get(&method.name).map(Vec::as_slice).unwrap_or(&[]);
        let records: usize = trials.iter().map(|t| t.records.len()).sum();
        let skipped: usize = trials.iter().map(|t| t.skipped_rows).sum();
        let filtered: usize = trials.iter().map(|t| t.filtered_rows).sum();
        out.push_str(&format!(
            "{}\t{}\ttrials={}\trecords={}\tskipped={}\tfiltered={}\n",
            method.name,
            method.schema.as_str(),
            trials.len(),
            records,
            skipped,
            filtered
        ));
    }
    Ok(out)
}
