use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConsensusError;
use crate::rank::ScoreConvention;
use crate::rank::baseline::BASELINE_METHOD;
use crate::records::{Direction, SchemaVariant};

pub const DEFAULT_CUTOFF: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Up,
    Down,
    Pvalue,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Up => "up",
            Metric::Down => "down",
            Metric::Pvalue => "pvalue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    #[default]
    Pvalue,
    CountNormalized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrialSpec {
    Discover {
        dir: PathBuf,
        #[serde(default)]
        filter: Option<String>,
    },
    Sources { sources: Vec<PathBuf> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodConfig {
    pub name: String,
    pub schema: SchemaVariant,
    pub metric: Metric,
    #[serde(default)]
    pub depths: Vec<usize>,
    pub trials: TrialSpec,
    #[serde(default)]
    pub convention: ScoreConvention,
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    #[serde(default)]
    pub score: ScoreKind,
    #[serde(default)]
    pub direction: Option<Direction>,
}

impl MethodConfig {
    pub fn depth_plan(&self) -> Vec<Option<usize>> {
        if self.depths.is_empty() {
            vec![None]
        } else {
            self.depths.iter().map(|&d| Some(d)).collect()
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConsensusError> {
        if self.name.trim().is_empty() {
            return Err(ConsensusError::Config("method name is empty".to_string()));
        }
        match (self.schema, self.metric) {
            (SchemaVariant::GenericPvalue, Metric::Pvalue) => {}
            (SchemaVariant::GenericPvalue, m) => {
                return Err(self.invalid(format!("generic_pvalue needs metric 'pvalue', got {:?}", m)));
            }
            (_, Metric::Pvalue) => {
                return Err(self.invalid("metric 'pvalue' needs schema generic_pvalue".to_string()));
            }
            _ => {}
        }
        if self.score == ScoreKind::CountNormalized && self.schema != SchemaVariant::GenericPvalue {
            return Err(self.invalid("count_normalized score needs schema generic_pvalue".to_string()));
        }
        if self.direction.is_some() && self.schema != SchemaVariant::GenericPvalue {
            return Err(self.invalid("direction gate needs schema generic_pvalue".to_string()));
        }
        if self.depths.contains(&0) {
            return Err(self.invalid("depth must be positive".to_string()));
        }
        if !(self.cutoff > 0.0 && self.cutoff <= 1.0) {
            return Err(self.invalid(format!("cutoff {} outside (0, 1]", self.cutoff)));
        }
        Ok(())
    }

    fn invalid(&self, msg: String) -> ConsensusError {
        ConsensusError::Config(format!("{}: {}", self.name, msg))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    pub scenario: String,
    pub positives: Vec<String>,
    pub background: Vec<PathBuf>,
    #[serde(default)]
    pub threads: usize,
    #[serde(default)]
    pub count_baseline: bool,
    pub methods: Vec<MethodConfig>,
}

impl BenchmarkConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: BenchmarkConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_paths(base);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConsensusError> {
        if self.positives.iter().all(|p| p.trim().is_empty()) {
            return Err(ConsensusError::Config("no positives configured".to_string()));
        }
        if self.background.is_empty() {
            return Err(ConsensusError::Config("no background counts configured".to_string()));
        }
        if self.methods.is_empty() && !self.count_baseline {
            return Err(ConsensusError::Config("no methods configured".to_string()));
        }
        let mut names = std::collections::BTreeSet::new();
        for method in &self.methods {
            method.validate()?;
            if !names.insert(method.name.as_str()) {
                return Err(ConsensusError::Config(format!(
                    "duplicate method name '{}'",
                    method.name
                )));
            }
            if self.count_baseline && method.name == BASELINE_METHOD {
                return Err(ConsensusError::Config(format!(
                    "method name '{}' is reserved for the count baseline",
                    BASELINE_METHOD
                )));
            }
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in &mut self.background {
            *path = resolve(base, path);
        }
        for method in &mut self.methods {
            match &mut method.trials {
                TrialSpec::Discover { dir, .. } => *dir = resolve(base, dir),
                TrialSpec::Sources { sources } => {
                    for s in sources.iter_mut() {
                        *s = resolve(base, s);
                    }
                }
            }
        }
    }
}

fn default_cutoff() -> f64 {
    DEFAULT_CUTOFF
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
