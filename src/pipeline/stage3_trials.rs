use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::{MethodConfig, TrialSpec};
use crate::ctx::Ctx;
use crate::io::{self, table_reader};
use crate::pipeline::Stage;
use crate::sweep::Trial;

pub struct Stage3Trials;

impl Stage3Trials {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Trials {
    fn name(&self) -> &'static str {
        "stage3_trials"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let methods = ctx.config()?.methods.clone();
        for method in &methods {
            let sources = match trial_sources(method) {
                Ok(sources) => sources,
                Err(err) => {
                    warn!(method = %method.name, error = %err, "trial_discovery_failed");
                    ctx.warnings.push(format!("{}: {:#}", method.name, err));
                    Vec::new()
                }
            };
            let mut trials = Vec::with_capacity(sources.len());
            for path in &sources {
                match load_trial(method, path) {
                    Ok(trial) => trials.push(trial),
                    Err(err) => {
                        warn!(method = %method.name, path = %path.display(), error = %err, "trial_load_failed");
                        ctx.warnings
                            .push(format!("{}: skipped {}: {:#}", method.name, path.display(), err));
                    }
                }
            }
            if trials.is_empty() {
                ctx.warnings
                    .push(format!("{}: no usable trials", method.name));
            }
            info!(method = %method.name, trials = trials.len(), sources = sources.len(), "trials_ready");
            if let Some(meta) = ctx.report.methods.iter_mut().find(|m| m.name == method.name) {
                meta.trials = trials.len();
            }
            ctx.trials.insert(method.name.clone(), trials);
        }
        Ok(())
    }
}

pub fn trial_sources(method: &MethodConfig) -> Result<Vec<PathBuf>> {
    match &method.trials {
        TrialSpec::Discover { dir, filter } => io::discover_trials(dir, filter.as_deref())
            .with_context(|| format!("{}: trial discovery failed", method.name)),
        TrialSpec::Sources { sources } => Ok(sources.clone()),
    }
}

pub fn load_trial(method: &MethodConfig, path: &std::path::Path) -> Result<Trial> {
    let table = table_reader::read_table(path)?;
    let normalized = method
        .schema
        .normalize(&table, method.cutoff)
        .with_context(|| format!("failed to normalize {}", path.display()))?;
    Ok(Trial {
        id: io::trial_id(path),
        records: normalized.records,
        skipped_rows: normalized.skipped_rows,
        filtered_rows: normalized.filtered_rows,
    })
}
