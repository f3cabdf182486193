//! Chart generation outcomes.

use serde::{Deserialize, Serialize};

/// Outcome of a chart-generation call: either a renderable chart spec or
/// the model's reason for declining. Never both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChartResult {
    Chart(ChartSpec),
    NoChart { rationale: String },
}

/// Configuration handed to the external charting library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    pub chart_type: String,
    pub chart_configuration: serde_json::Value,
    pub caption: String,
}
