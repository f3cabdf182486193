//! Chart generation client.
//!
//! Best-effort by contract: a chart either comes back parseable or the
//! caller gets a rationale explaining its absence. This call never fails
//! the enclosing answer.

pub mod prompt;
mod tags;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::GamesightConfig;
use crate::error::{GamesightError, Result};
use crate::http::{bearer_headers, shared_client, status_to_error};
use crate::types::{Answer, ChartResult, ChartSpec};

use tags::{extract_between_tags, normalize_numbers, trim_newlines};

/// Rationale returned whenever generation or parsing fails.
pub const FALLBACK_RATIONALE: &str = "Error generating or parsing chart data.";

const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f64 = 1.0;

/// Client for the single-shot model-inference endpoint.
pub struct ChartClient {
    base_url: String,
    model_id: String,
    api_key: String,
    template: String,
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    content: Vec<InferenceContent>,
}

#[derive(Debug, Deserialize)]
struct InferenceContent {
    text: String,
}

impl ChartClient {
    pub fn new(config: &GamesightConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.inference_base_url()?.to_string(),
            model_id: config.chart_model_id()?.to_string(),
            api_key: config.api_key()?.to_string(),
            template: prompt::DEFAULT_CHART_PROMPT.to_string(),
        })
    }

    /// Replace the default prompt template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Generate a chart for a finalized answer.
    ///
    /// Transport errors, missing tags, and malformed embedded JSON all
    /// degrade to [`ChartResult::NoChart`] with a fixed message; the error
    /// is logged, never surfaced.
    pub async fn generate(&self, answer: &Answer) -> ChartResult {
        match self.request_chart(answer).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "chart generation failed");
                ChartResult::NoChart {
                    rationale: FALLBACK_RATIONALE.to_string(),
                }
            }
        }
    }

    async fn request_chart(&self, answer: &Answer) -> Result<ChartResult> {
        let sources = prompt::data_sources(&answer.query_results)?;
        let chart_prompt = prompt::render_prompt(&self.template, &answer.text, &sources);

        let body = serde_json::json!({
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
            "messages": [
                {
                    "role": "user",
                    "content": [{"type": "text", "text": chart_prompt}],
                },
            ],
        });
        let url = format!("{}/model/{}/invoke", self.base_url, self.model_id);

        debug!(model_id = %self.model_id, "requesting chart");

        let response = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body_text = response.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: InferenceResponse = response.json().await?;
        let reply = data
            .content
            .first()
            .map(|c| c.text.as_str())
            .ok_or_else(|| GamesightError::Decode("inference response had no content".into()))?;

        parse_chart_reply(reply)
    }
}

fn parse_chart_reply(reply: &str) -> Result<ChartResult> {
    let has_chart = extract_between_tags(reply, "has_chart")
        .ok_or_else(|| GamesightError::Decode("missing has_chart tag".into()))?
        .trim()
        .parse::<i64>()
        .map_err(|e| GamesightError::Decode(format!("has_chart: {e}")))?;

    if has_chart != 0 {
        let configuration_text = extract_between_tags(reply, "chart_configuration")
            .ok_or_else(|| GamesightError::Decode("missing chart_configuration tag".into()))?;
        let configuration: serde_json::Value = serde_json::from_str(configuration_text.trim())?;
        let chart_type = extract_between_tags(reply, "chart_type")
            .ok_or_else(|| GamesightError::Decode("missing chart_type tag".into()))?;
        let caption = extract_between_tags(reply, "caption")
            .ok_or_else(|| GamesightError::Decode("missing caption tag".into()))?;

        Ok(ChartResult::Chart(ChartSpec {
            chart_type: trim_newlines(chart_type).to_string(),
            chart_configuration: normalize_numbers(configuration),
            caption: trim_newlines(caption).to_string(),
        }))
    } else {
        let rationale = extract_between_tags(reply, "rationale")
            .ok_or_else(|| GamesightError::Decode("missing rationale tag".into()))?;
        Ok(ChartResult::NoChart {
            rationale: trim_newlines(rationale).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_reply_parses() {
        let reply = concat!(
            "<has_chart>1</has_chart>\n",
            "<chart_type>\nbar\n</chart_type>\n",
            "<chart_configuration>\n{\"series\": [{\"data\": [\"10\", \"20\"]}]}\n</chart_configuration>\n",
            "<caption>\nUnits sold per platform\n</caption>",
        );
        match parse_chart_reply(reply).unwrap() {
            ChartResult::Chart(spec) => {
                assert_eq!(spec.chart_type, "bar");
                assert_eq!(spec.caption, "Units sold per platform");
                assert_eq!(
                    spec.chart_configuration,
                    serde_json::json!({"series": [{"data": [10, 20]}]})
                );
            }
            ChartResult::NoChart { .. } => panic!("expected chart"),
        }
    }

    #[test]
    fn zero_has_chart_selects_rationale() {
        let reply = "<has_chart>0</has_chart><rationale>\nOnly one value.\n</rationale>";
        assert_eq!(
            parse_chart_reply(reply).unwrap(),
            ChartResult::NoChart {
                rationale: "Only one value.".into()
            }
        );
    }

    #[test]
    fn missing_has_chart_is_an_error() {
        assert!(parse_chart_reply("<rationale>whatever</rationale>").is_err());
    }

    #[test]
    fn malformed_configuration_is_an_error() {
        let reply = concat!(
            "<has_chart>1</has_chart>",
            "<chart_type>bar</chart_type>",
            "<chart_configuration>{not json}</chart_configuration>",
            "<caption>c</caption>",
        );
        assert!(parse_chart_reply(reply).is_err());
    }
}
