//! Completed answers and their tabular query results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::trace::TraceRecord;
use super::usage::TraceUsage;

/// Rows returned by one SQL query the agent executed, together with the
/// query text itself. Zero rows is a valid "no data" state.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct QueryResult {
    pub query: String,
    pub rows: Vec<serde_json::Value>,
}

/// A completed agent answer, immutable once built. Owned by session state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    /// The agent's final answer text (markdown).
    pub text: String,
    /// Every trace record the stream emitted, in emission order.
    pub running_traces: Vec<TraceRecord>,
    /// Stored query results fetched for this answer's correlation id.
    pub query_results: Vec<QueryResult>,
    /// Usage records from every trace that carried them.
    pub usage: Vec<TraceUsage>,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    /// How many rationale notifications the stream produced.
    pub rationale_count: usize,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}
