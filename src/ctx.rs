use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::background::BackgroundCounts;
use crate::config::BenchmarkConfig;
use crate::roc::ConfigResult;
use crate::schema::v1::ConsensusReportV1;
use crate::sweep::{SweepOutput, Trial};

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
    pub roc_path: PathBuf,
    pub auc_path: PathBuf,
    pub pools_path: PathBuf,
}

#[derive(Debug)]
pub struct Ctx {
    pub config_path: PathBuf,
    pub config: Option<BenchmarkConfig>,
    pub write_json: bool,
    pub write_tsv: bool,
    // CLI override of config.threads
    pub threads: Option<usize>,
    pub background: BackgroundCounts,
    pub trials: BTreeMap<String, Vec<Trial>>,
    pub sweep: SweepOutput,
    pub results: Vec<ConfigResult>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: ConsensusReportV1,
}

impl Ctx {
    pub fn new(
        config_path: PathBuf,
        out_dir: PathBuf,
        write_json: bool,
        write_tsv: bool,
        tool_version: &str,
    ) -> Self {
        let json_path = out_dir.join("consensus.json");
        let roc_path = out_dir.join("roc_curves.tsv");
        let auc_path = out_dir.join("auc_by_depth.tsv");
        let pools_path = out_dir.join("pools.tsv");
        Self {
            config_path,
            config: None,
            write_json,
            write_tsv,
            threads: None,
            background: BackgroundCounts::default(),
            trials: BTreeMap::new(),
            sweep: SweepOutput::default(),
            results: Vec::new(),
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                json_path,
                roc_path,
                auc_path,
                pools_path,
            },
            report: ConsensusReportV1::empty(tool_version),
        }
    }

    pub fn config(&self) -> anyhow::Result<&BenchmarkConfig> {
        self.config
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("config not loaded"))
    }

    pub fn thread_count(&self) -> usize {
        self.threads
            .or_else(|| self.config.as_ref().map(|c| c.threads))
            .unwrap_or(0)
    }
}
