use anyhow::{Result, bail};
use tracing::info;

use crate::background;
use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage2Background;

impl Stage2Background {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Background {
    fn name(&self) -> &'static str {
        "stage2_background"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let paths = ctx.config()?.background.clone();
        let counts = background::load_merged(&paths)?;
        if counts.is_empty() {
            bail!("background counts are empty");
        }
        info!(entities = counts.len(), sources = paths.len(), "background_ready");
        ctx.report.background_entities = counts.len() as u64;
        ctx.background = counts;
        Ok(())
    }
}
