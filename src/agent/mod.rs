//! Agent invocation client.
//!
//! Opens one streaming request per question, consumes chunk and trace
//! events strictly in arrival order, and aggregates the final answer text,
//! trace records, and token usage.

pub mod stream;

pub use stream::AgentStreamEvent;

use bon::Builder;
use chrono::Utc;
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error};

use crate::config::GamesightConfig;
use crate::error::{GamesightError, Result};
use crate::http::{bearer_headers, shared_client, status_to_error};
use crate::types::{Answer, QueryResult, TraceRecord, TraceUsage};

/// Receives rationale text while the agent stream is still open.
///
/// Called synchronously, in arrival order, once per trace record whose
/// rationale text is present and non-empty, before the next event is
/// read. Implementations must not block for long.
pub trait RationaleObserver {
    fn rationale(&mut self, text: &str);
}

/// Observer that discards notifications.
pub struct NullObserver;

impl RationaleObserver for NullObserver {
    fn rationale(&mut self, _text: &str) {}
}

/// Options for one agent invocation.
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct InvokeRequest {
    pub session_id: String,
    pub input_text: String,
    /// Display name forwarded as a session attribute.
    pub user_name: Option<String>,
    /// Correlation id under which the agent persists query results.
    pub query_id: Option<String>,
}

/// Aggregated outcome of one completed agent invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub session_id: String,
    /// The concatenated answer text.
    pub completion: String,
    /// Every trace record, in emission order.
    pub running_traces: Vec<TraceRecord>,
    /// Usage records from every trace that carried them.
    pub usage: Vec<TraceUsage>,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub rationale_count: usize,
}

impl Invocation {
    /// Combine this invocation with fetched query results into an answer.
    pub fn into_answer(self, query_results: Vec<QueryResult>) -> Answer {
        Answer {
            text: self.completion,
            running_traces: self.running_traces,
            query_results,
            usage: self.usage,
            total_input_tokens: self.total_input_tokens,
            total_output_tokens: self.total_output_tokens,
            rationale_count: self.rationale_count,
            session_id: self.session_id,
            created_at: Utc::now(),
        }
    }
}

/// Client for the agent-orchestration endpoint.
pub struct AgentClient {
    agent_id: String,
    agent_alias_id: String,
    base_url: String,
    api_key: String,
}

impl AgentClient {
    pub fn new(config: &GamesightConfig) -> Result<Self> {
        Ok(Self {
            agent_id: config.agent_id()?.to_string(),
            agent_alias_id: config.agent_alias_id()?.to_string(),
            base_url: config.agent_base_url()?.to_string(),
            api_key: config.api_key()?.to_string(),
        })
    }

    /// Invoke the agent and drain its response stream.
    ///
    /// The stream is consumed on this task, in arrival order; `observer`
    /// fires synchronously per rationale-bearing trace so callers can
    /// render progress before the final answer exists. Any failure is
    /// logged and propagated; no partial result is returned.
    pub async fn invoke(
        &self,
        request: InvokeRequest,
        observer: &mut dyn RationaleObserver,
    ) -> Result<Invocation> {
        let url = format!(
            "{}/agents/{}/aliases/{}/sessions/{}/text",
            self.base_url, self.agent_id, self.agent_alias_id, request.session_id
        );
        let body = serde_json::json!({
            "inputText": request.input_text,
            "enableTrace": true,
            "sessionState": {
                "promptSessionAttributes": {
                    "userName": request.user_name.as_deref().unwrap_or(""),
                    "queryUuid": request.query_id.as_deref().unwrap_or(""),
                },
            },
        });

        debug!(
            agent_id = %self.agent_id,
            session_id = %request.session_id,
            "invoking agent"
        );

        let response = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "agent request failed");
                GamesightError::Network(e)
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body_text = response.text().await.unwrap_or_default();
            let err = status_to_error(status, &body_text);
            error!(status, error = %err, "agent returned error status");
            return Err(err);
        }

        let is_event_stream = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/event-stream"));
        if !is_event_stream {
            let err = GamesightError::Stream("agent response carried no event stream".into());
            error!(error = %err, "agent invocation failed");
            return Err(err);
        }

        let mut events = stream::event_stream(response);
        let mut completion = String::new();
        let mut running_traces: Vec<TraceRecord> = Vec::new();
        let mut rationale_count = 0usize;

        while let Some(event) = events.next().await {
            let event = event.map_err(|e| {
                error!(error = %e, "agent stream aborted");
                e
            })?;
            match event {
                AgentStreamEvent::Chunk(chunk) => {
                    let text = chunk.decode_text().map_err(|e| {
                        error!(error = %e, "malformed answer chunk");
                        e
                    })?;
                    completion.push_str(&text);
                }
                AgentStreamEvent::Trace(envelope) => {
                    let trace = envelope.trace;
                    if let Some(text) = trace.rationale_text() {
                        rationale_count += 1;
                        observer.rationale(text);
                    }
                    running_traces.push(trace);
                }
            }
        }

        let mut usage = Vec::new();
        let mut total_input_tokens = 0;
        let mut total_output_tokens = 0;
        for trace in &running_traces {
            if let Some(u) = trace.usage() {
                usage.push(*u);
                total_input_tokens += u.input_tokens;
                total_output_tokens += u.output_tokens;
            }
        }

        debug!(
            completion_len = completion.len(),
            traces = running_traces.len(),
            total_input_tokens,
            total_output_tokens,
            "agent stream drained"
        );

        Ok(Invocation {
            session_id: request.session_id,
            completion,
            running_traces,
            usage,
            total_input_tokens,
            total_output_tokens,
            rationale_count,
        })
    }
}
