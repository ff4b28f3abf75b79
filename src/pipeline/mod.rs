use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

use crate::ctx::Ctx;

pub mod stage0_scaffold;
pub mod stage1_config;
pub mod stage2_background;
pub mod stage3_trials;
pub mod stage4_sweep;
pub mod stage5_roc;
pub mod stage6_output;

pub trait Stage {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &mut Ctx) -> Result<()>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    pub fn benchmark() -> Self {
        Self::new(vec![
            Box::new(stage0_scaffold::Stage0Scaffold::new()),
            Box::new(stage1_config::Stage1Config::new()),
            Box::new(stage2_background::Stage2Background::new()),
            Box::new(stage3_trials::Stage3Trials::new()),
            Box::new(stage4_sweep::Stage4Sweep::new()),
            Box::new(stage5_roc::Stage5Roc::new()),
            Box::new(stage6_output::Stage6Output::new()),
        ])
    }

    pub fn validation() -> Self {
        Self::new(vec![
            Box::new(stage1_config::Stage1Config::new()),
            Box::new(stage2_background::Stage2Background::new()),
            Box::new(stage3_trials::Stage3Trials::new()),
        ])
    }

    pub fn run(&self, ctx: &mut Ctx) -> Result<()> {
        info!(
            parallel = cfg!(feature = "mt"),
            threads = ctx.threads.unwrap_or(0),
            "compute backend selected"
        );
        for stage in &self.stages {
            let start = Instant::now();
            info!(stage = stage.name(), "stage started");
            if let Err(err) = stage.run(ctx) {
                let elapsed_ms = start.elapsed().as_millis();
                warn!(
                    stage = stage.name(),
                    elapsed_ms = elapsed_ms as u64,
                    "stage failed"
                );
                return Err(err);
            }
            let elapsed_ms = start.elapsed().as_millis();
            info!(
                stage = stage.name(),
                elapsed_ms = elapsed_ms as u64,
                "stage finished"
            );
        }
        Ok(())
    }
}
