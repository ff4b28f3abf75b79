use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::io::{json_writer, tsv_writer};
use crate::pipeline::Stage;

pub struct Stage6Output;

impl Stage6Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage6Output {
    fn name(&self) -> &'static str {
        "stage6_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let report = json_writer::build_report(ctx)?;
        ctx.report = report;

        json_writer::write_json(&ctx.output.json_path, &ctx.report)?;
        tsv_writer::write_roc_curves(&ctx.output.roc_path, &ctx.results)?;
        tsv_writer::write_auc_by_depth(&ctx.output.auc_path, &ctx.results)?;
        if ctx.write_tsv {
            tsv_writer::write_pools(&ctx.output.pools_path, &ctx.sweep.pools)?;
        }

        info!(out_dir = %ctx.output.out_dir.display(), "stage6_output_ready");
        Ok(())
    }
}
