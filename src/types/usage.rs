//! Token usage reported by orchestration traces.

use serde::{Deserialize, Serialize};

/// Token counts attached to one model-invocation trace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TraceUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TraceUsage {
    /// Accumulate another usage record into this one.
    pub fn merge(&mut self, other: &TraceUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_accumulates() {
        let mut total = TraceUsage::default();
        total.merge(&TraceUsage {
            input_tokens: 100,
            output_tokens: 20,
        });
        total.merge(&TraceUsage {
            input_tokens: 50,
            output_tokens: 5,
        });
        assert_eq!(total.input_tokens, 150);
        assert_eq!(total.output_tokens, 25);
    }

    #[test]
    fn wire_names_are_camel_case() {
        let usage: TraceUsage =
            serde_json::from_str(r#"{"inputTokens": 7, "outputTokens": 3}"#).unwrap();
        assert_eq!(usage.input_tokens, 7);
        assert_eq!(usage.output_tokens, 3);
    }
}
