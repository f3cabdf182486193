//! Shared helpers for integration tests.

use base64::Engine;
use gamesight::config::GamesightConfig;

/// Config pointing every service at one mock server.
pub fn test_config(base_url: &str) -> GamesightConfig {
    let mut config = GamesightConfig::new();
    config
        .set("GAMESIGHT_API_KEY", "test-key")
        .set("GAMESIGHT_AGENT_ID", "agent-1")
        .set("GAMESIGHT_AGENT_ALIAS_ID", "alias-1")
        .set("GAMESIGHT_ANSWERS_TABLE", "question-answers")
        .set("GAMESIGHT_CHART_MODEL_ID", "chart-model")
        .set("GAMESIGHT_AGENT_BASE_URL", base_url)
        .set("GAMESIGHT_STORE_BASE_URL", base_url)
        .set("GAMESIGHT_INFERENCE_BASE_URL", base_url);
    config
}

/// One SSE event carrying a base64 chunk of answer text.
pub fn chunk_event(text: &str) -> String {
    let bytes = base64::engine::general_purpose::STANDARD.encode(text);
    format!("data: {{\"chunk\":{{\"bytes\":\"{bytes}\"}}}}\n\n")
}

/// One SSE event carrying a trace record.
pub fn trace_event(trace: serde_json::Value) -> String {
    let event = serde_json::json!({"trace": {"trace": trace}});
    format!("data: {event}\n\n")
}

/// A trace record carrying only a rationale.
pub fn rationale_trace(text: &str) -> serde_json::Value {
    serde_json::json!({"orchestrationTrace": {"rationale": {"text": text}}})
}

/// A trace record carrying only usage metadata.
pub fn usage_trace(input_tokens: u64, output_tokens: u64) -> serde_json::Value {
    serde_json::json!({
        "orchestrationTrace": {
            "modelInvocationOutput": {
                "metadata": {
                    "usage": {"inputTokens": input_tokens, "outputTokens": output_tokens}
                }
            }
        }
    })
}

/// A trace record carrying an action-group `SQLQuery` parameter.
pub fn query_trace(sql: &str) -> serde_json::Value {
    serde_json::json!({
        "orchestrationTrace": {
            "invocationInput": {
                "actionGroupInvocationInput": {
                    "requestBody": {
                        "content": {
                            "application/json": [{"name": "SQLQuery", "value": sql}]
                        }
                    }
                }
            }
        }
    })
}
