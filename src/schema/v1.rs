use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodMeta {
    pub name: String,
    pub schema: String,
    pub metric: String,
    pub depths: Vec<usize>,
    pub trials: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialSummary {
    pub method: String,
    pub trial: String,
    pub records: u64,
    pub skipped_rows: u64,
    pub filtered_rows: u64,
    pub unknown_entities: u64,
    pub rejected_tables: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curve {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationResult {
    pub method: String,
    pub depth: Option<usize>,
    pub n_pairs: u64,
    pub n_positive: u64,
    pub auc: Option<f64>,
    pub failure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<Curve>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepFailureEntry {
    pub method: String,
    pub depth: Option<usize>,
    pub trial: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusReportV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub scenario: String,
    pub positives: Vec<String>,
    pub background_entities: u64,
    pub methods: Vec<MethodMeta>,
    pub results: Vec<ConfigurationResult>,
    pub trials: Vec<TrialSummary>,
    pub failures: Vec<SweepFailureEntry>,
    pub warnings: Vec<String>,
}

impl ConsensusReportV1 {
    pub fn empty(tool_version: &str) -> Self {
        Self {
            tool: "kira-consensus".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            scenario: String::new(),
            positives: Vec::new(),
            background_entities: 0,
            methods: Vec::new(),
            results: Vec::new(),
            trials: Vec::new(),
            failures: Vec::new(),
            warnings: Vec::new(),
        }
    }
}
