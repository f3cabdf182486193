//! Projection of trace records into display items.

use crate::types::{TraceItem, TraceRecord};

/// Project trace records into an ordered list of display items.
///
/// Pure and deterministic. Per record, in emission order: a non-empty
/// rationale yields a [`TraceItem::Rationale`]; independently, a `SQLQuery`
/// request parameter yields a [`TraceItem::Query`] (rationale first when a
/// record carries both). Records carrying neither contribute nothing but
/// never disturb the relative order of items from other records.
///
/// An empty projection is the caller's cue to render an explicit
/// "nothing found" state rather than omitting the section.
pub fn project(traces: &[TraceRecord]) -> Vec<TraceItem> {
    let mut items = Vec::new();
    for trace in traces {
        if let Some(text) = trace.rationale_text() {
            items.push(TraceItem::Rationale { text: text.into() });
        }
        if let Some(query) = trace.sql_query() {
            items.push(TraceItem::Query {
                text: query.into(),
            });
        }
    }
    items
}
