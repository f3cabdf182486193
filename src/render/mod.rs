//! Stateless text rendering of answers, traces, and query results.
//!
//! Pure string builders; the front-end decides where the text goes.

use crate::trace::project;
use crate::types::{Answer, QueryResult, TraceItem};

/// Shown when projection yields no items.
pub const EMPTY_TRACE_MESSAGE: &str = "No rationale or queries found in the traces.";

/// Shown for a query whose result set is empty.
pub const NO_DATA_MESSAGE: &str = "No Data Records";

/// Render the details view: question, answer text, and the orchestration
/// steps behind them.
pub fn answer_details(question: &str, answer: &Answer) -> String {
    let mut out = String::new();
    out.push_str("## Question\n\n");
    out.push_str(question);
    out.push_str("\n\n## Answer\n\n");
    out.push_str(&answer.text);
    out.push_str("\n\n");
    out.push_str(&trace_items(&project(&answer.running_traces)));
    out
}

/// Render projected trace items, or the explicit empty state.
pub fn trace_items(items: &[TraceItem]) -> String {
    if items.is_empty() {
        return format!("{EMPTY_TRACE_MESSAGE}\n");
    }
    let mut out = String::new();
    for item in items {
        match item {
            TraceItem::Rationale { text } => {
                out.push_str("### SQL Rationale\n\n");
                out.push_str(text);
                out.push_str("\n\n");
            }
            TraceItem::Query { text } => {
                out.push_str("### SQL Generated\n\n```sql\n");
                out.push_str(text);
                out.push_str("\n```\n\n");
            }
        }
    }
    out
}

/// Render each query's rows as a table (or the no-data line), followed by
/// the query that produced them.
pub fn query_results(answer: &Answer) -> String {
    let mut out = String::new();
    for result in &answer.query_results {
        out.push_str(&query_result(result));
        out.push('\n');
    }
    out
}

/// Render one query's rows and the query that produced them.
pub fn query_result(result: &QueryResult) -> String {
    let mut out = String::new();
    if result.rows.is_empty() {
        out.push_str(NO_DATA_MESSAGE);
        out.push('\n');
    } else {
        out.push_str(&rows_table(&result.rows));
    }
    out.push_str("Query: ");
    out.push_str(&result.query);
    out.push('\n');
    out
}

fn rows_table(rows: &[serde_json::Value]) -> String {
    let columns: Vec<String> = rows
        .first()
        .and_then(|row| row.as_object())
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default();
    if columns.is_empty() {
        return format!("{NO_DATA_MESSAGE}\n");
    }

    let mut out = String::new();
    out.push_str("| ");
    out.push_str(&columns.join(" | "));
    out.push_str(" |\n|");
    for _ in &columns {
        out.push_str(" --- |");
    }
    out.push('\n');
    for row in rows {
        out.push_str("| ");
        let cells: Vec<String> = columns
            .iter()
            .map(|column| cell(row.get(column.as_str())))
            .collect();
        out.push_str(&cells.join(" | "));
        out.push_str(" |\n");
    }
    out
}

fn cell(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::QueryResult;

    fn answer_with(query_results: Vec<QueryResult>) -> Answer {
        Answer {
            text: "Sales were high.".into(),
            running_traces: vec![],
            query_results,
            usage: vec![],
            total_input_tokens: 0,
            total_output_tokens: 0,
            rationale_count: 0,
            session_id: "s-1".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_traces_render_explicit_message() {
        let rendered = answer_details("How were sales?", &answer_with(vec![]));
        assert!(rendered.contains("How were sales?"));
        assert!(rendered.contains("Sales were high."));
        assert!(rendered.contains(EMPTY_TRACE_MESSAGE));
    }

    #[test]
    fn trace_items_render_headings_in_order() {
        let rendered = trace_items(&[
            TraceItem::Rationale {
                text: "check the totals".into(),
            },
            TraceItem::Query {
                text: "SELECT SUM(units) FROM sales".into(),
            },
        ]);
        let rationale_at = rendered.find("SQL Rationale").unwrap();
        let query_at = rendered.find("SQL Generated").unwrap();
        assert!(rationale_at < query_at);
        assert!(rendered.contains("SELECT SUM(units) FROM sales"));
    }

    #[test]
    fn empty_rows_render_no_data_line() {
        let rendered = query_results(&answer_with(vec![QueryResult {
            query: "SELECT * FROM sales WHERE year = 1962".into(),
            rows: vec![],
        }]));
        assert!(rendered.contains(NO_DATA_MESSAGE));
        assert!(rendered.contains("Query: SELECT * FROM sales WHERE year = 1962"));
    }

    #[test]
    fn rows_render_as_table() {
        let rendered = query_results(&answer_with(vec![QueryResult {
            query: "SELECT platform, units FROM sales".into(),
            rows: vec![
                serde_json::json!({"platform": "PS2", "units": 155}),
                serde_json::json!({"platform": "DS", "units": 154}),
            ],
        }]));
        assert!(rendered.contains("| platform | units |"));
        assert!(rendered.contains("| PS2 | 155 |"));
        assert!(rendered.contains("| DS | 154 |"));
    }
}
