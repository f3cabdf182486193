//! Parsing of the tagged-markup replies the chart model produces.

/// Extract the text between `<tag>` and `</tag>`.
///
/// The first opening tag and the first closing tag after it win; an
/// unclosed or absent tag reads as `None`.
pub(crate) fn extract_between_tags<'a>(body: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = body.find(&open)? + open.len();
    let end = body[start..].find(&close)? + start;
    Some(&body[start..end])
}

/// Strip the newlines the model wraps tag contents in.
pub(crate) fn trim_newlines(value: &str) -> &str {
    value.trim_matches('\n')
}

/// Reformat numeric-looking strings as JSON numbers, recursively.
///
/// Chart configurations come back with quoted numbers ("42", "3.5") in
/// value positions; the charting library expects real numbers.
pub(crate) fn normalize_numbers(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                if let Ok(int) = trimmed.parse::<i64>() {
                    return Value::Number(int.into());
                }
                if let Ok(float) = trimmed.parse::<f64>() {
                    if float.is_finite() {
                        if let Some(number) = serde_json::Number::from_f64(float) {
                            return Value::Number(number);
                        }
                    }
                }
            }
            Value::String(s)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, normalize_numbers(value)))
                .collect(),
        ),
        other => other,
    }
}
