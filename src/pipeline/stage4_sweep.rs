use std::collections::BTreeMap;

use anyhow::Result;
use tracing::info;

use crate::background::BackgroundCounts;
use crate::config::BenchmarkConfig;
use crate::consensus::{FastFisher, PValueKernel};
use crate::ctx::Ctx;
use crate::label::{LabelOracle, SubstringOracle};
use crate::pipeline::Stage;
use crate::pool::{ConfigKey, ScoredPool};
use crate::rank::baseline::{BASELINE_METHOD, rank_by_count};
use crate::sweep::{SweepOutput, Sweeper, Trial};

pub struct Stage4Sweep;

impl Stage4Sweep {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Sweep {
    fn name(&self) -> &'static str {
        "stage4_sweep"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let config = ctx.config()?;
        let kernel = FastFisher::default();
        let oracle = SubstringOracle::new(&config.positives);

        #[cfg(feature = "mt")]
        let output = {
            let pool = crate::consensus::batch::thread_pool(ctx.thread_count())?;
            pool.install(|| sweep_all(config, &ctx.background, &ctx.trials, &kernel, &oracle))
        };

        #[cfg(not(feature = "mt"))]
        let output = sweep_all(config, &ctx.background, &ctx.trials, &kernel, &oracle);

        info!(
            pools = output.pools.len(),
            failures = output.failures.len(),
            "sweep_complete"
        );
        for failure in &output.failures {
            ctx.warnings.push(format!(
                "{} trial {} omitted: {}",
                failure.key, failure.trial, failure.error
            ));
        }
        ctx.sweep = output;
        Ok(())
    }
}

pub fn sweep_all<K>(
    config: &BenchmarkConfig,
    background: &BackgroundCounts,
    trials: &BTreeMap<String, Vec<Trial>>,
    kernel: &K,
    oracle: &dyn LabelOracle,
) -> SweepOutput
where
    K: PValueKernel + ?Sized,
{
    let sweeper = Sweeper::new(kernel, background, oracle);
    let mut output = SweepOutput::default();
    for method in &config.methods {
        let method_trials = trials.get(&method.name).map(Vec::as_slice).unwrap_or(&[]);
        output.merge(sweeper.run(method, method_trials));
    }
    if config.count_baseline {
        let mut pool = ScoredPool::new();
        pool.extend_ranked(&rank_by_count(background, oracle));
        output
            .pools
            .insert(ConfigKey::new(BASELINE_METHOD, None), pool);
    }
    output
}
