//! Orchestration trace records and their projection items.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::usage::TraceUsage;

/// Media type key under which action-group request parameters arrive.
const JSON_CONTENT_KEY: &str = "application/json";

/// Parameter name carrying the SQL statement an action group executed.
const SQL_QUERY_PARAM: &str = "SQLQuery";

/// One structured record emitted by the agent stream, describing a single
/// orchestration step. Records are append-only; emission order is display
/// order. Fields not consumed by the front-end are ignored on deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TraceRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orchestration_trace: Option<OrchestrationTrace>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OrchestrationTrace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<Rationale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invocation_input: Option<InvocationInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_invocation_output: Option<ModelInvocationOutput>,
}

/// Natural-language justification for an orchestration step.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Rationale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct InvocationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_group_invocation_input: Option<ActionGroupInvocationInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionGroupInvocationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
}

/// Request body an action group was invoked with, keyed by media type.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RequestBody {
    pub content: HashMap<String, Vec<RequestParameter>>,
}

/// A named parameter inside an action-group request body.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RequestParameter {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelInvocationOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<InvocationMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct InvocationMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TraceUsage>,
}

impl TraceRecord {
    /// Rationale text carried by this record, if present and non-empty.
    pub fn rationale_text(&self) -> Option<&str> {
        self.orchestration_trace
            .as_ref()?
            .rationale
            .as_ref()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }

    /// The `SQLQuery` parameter of this record's action-group request body,
    /// if one was sent as `application/json` content.
    pub fn sql_query(&self) -> Option<&str> {
        self.orchestration_trace
            .as_ref()?
            .invocation_input
            .as_ref()?
            .action_group_invocation_input
            .as_ref()?
            .request_body
            .as_ref()?
            .content
            .get(JSON_CONTENT_KEY)?
            .iter()
            .find(|param| param.name == SQL_QUERY_PARAM)
            .map(|param| param.value.as_str())
    }

    /// Token usage reported by this record's model invocation, if any.
    pub fn usage(&self) -> Option<&TraceUsage> {
        self.orchestration_trace
            .as_ref()?
            .model_invocation_output
            .as_ref()?
            .metadata
            .as_ref()?
            .usage
            .as_ref()
    }
}

/// One display item derived from a trace record: either the step's
/// rationale or the SQL it generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceItem {
    Rationale { text: String },
    Query { text: String },
}

impl TraceItem {
    /// The display text regardless of variant.
    pub fn text(&self) -> &str {
        match self {
            TraceItem::Rationale { text } | TraceItem::Query { text } => text,
        }
    }
}
