//! Chart prompt template and marker substitution.

use std::sync::OnceLock;

use regex::{NoExpand, Regex};

use crate::error::Result;
use crate::types::QueryResult;

/// Default second-stage prompt. `<<answer>>` receives the finalized answer
/// text and `<<data_sources>>` the serialized query results.
pub const DEFAULT_CHART_PROMPT: &str = r#"You are a data visualization assistant for a video-game sales analyst.

An assistant already answered the user's question:

<answer>
<<answer>>
</answer>

The answer was derived from these SQL result sets (one JSON array per query):

<data_sources>
<<data_sources>>
</data_sources>

Decide whether a single chart would genuinely help a reader understand the
answer. Do not chart single scalar values or empty result sets.

Reply with exactly these tags and nothing else:

<has_chart>1 if a chart helps, otherwise 0</has_chart>
<chart_type>one of: bar, line, pie, scatter</chart_type>
<chart_configuration>a JSON configuration object for the chart</chart_configuration>
<caption>one-sentence caption for the chart</caption>
<rationale>when has_chart is 0, why a chart does not help</rationale>
"#;

static ANSWER_MARKER: OnceLock<Regex> = OnceLock::new();
static DATA_SOURCES_MARKER: OnceLock<Regex> = OnceLock::new();

fn answer_marker() -> &'static Regex {
    ANSWER_MARKER.get_or_init(|| Regex::new(r"(?i)<<answer>>").expect("valid marker pattern"))
}

fn data_sources_marker() -> &'static Regex {
    DATA_SOURCES_MARKER
        .get_or_init(|| Regex::new(r"(?i)<<data_sources>>").expect("valid marker pattern"))
}

/// Substitute the two template markers.
///
/// Matching is case-insensitive on the marker token; only the first
/// occurrence of each marker is replaced, and replacement is literal, so a
/// marker-shaped string inside the substituted data survives untouched.
pub fn render_prompt(template: &str, answer_text: &str, data_sources: &str) -> String {
    let with_answer = answer_marker().replacen(template, 1, NoExpand(answer_text));
    data_sources_marker()
        .replacen(&with_answer, 1, NoExpand(data_sources))
        .into_owned()
}

/// Serialize every query's row set, one JSON array per line.
pub fn data_sources(query_results: &[QueryResult]) -> Result<String> {
    let mut out = String::new();
    for result in query_results {
        out.push_str(&serde_json::to_string(&result.rows)?);
        out.push('\n');
    }
    Ok(out)
}
