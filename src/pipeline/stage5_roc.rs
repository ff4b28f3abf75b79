use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::roc::evaluate_all;

pub struct Stage5Roc;

impl Stage5Roc {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Roc {
    fn name(&self) -> &'static str {
        "stage5_roc"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let results = evaluate_all(&ctx.sweep.pools);
        for result in &results {
            match &result.outcome {
                Ok(roc) => info!(
                    key = %result.key,
                    auc = roc.auc,
                    n_pairs = result.n_pairs,
                    n_positive = result.n_positive,
                    "auc_computed"
                ),
                Err(err) => ctx.warnings.push(format!("{}: {}", result.key, err)),
            }
        }
        ctx.results = results;
        Ok(())
    }
}
