use anyhow::Result;
use tracing::info;

use crate::config::BenchmarkConfig;
use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::schema::v1::MethodMeta;

pub struct Stage1Config;

impl Stage1Config {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Config {
    fn name(&self) -> &'static str {
        "stage1_config"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let config = BenchmarkConfig::load(&ctx.config_path)?;
        info!(
            scenario = %config.scenario,
            methods = config.methods.len(),
            positives = config.positives.len(),
            count_baseline = config.count_baseline,
            "config_loaded"
        );
        ctx.report.scenario = config.scenario.clone();
        ctx.report.positives = config.positives.clone();
        ctx.report.methods = config
            .methods
            .iter()
            .map(|m| MethodMeta {
                name: m.name.clone(),
                schema: m.schema.as_str().to_string(),
                metric: m.metric.as_str().to_string(),
                depths: m.depths.clone(),
                trials: 0,
            })
            .collect();
        ctx.config = Some(config);
        Ok(())
    }
}
