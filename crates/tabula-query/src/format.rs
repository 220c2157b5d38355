//! SQL literal formatting

use tabula_schema::Value;

/// Format a value as a SQL literal.
///
/// Text is single-quoted with embedded quotes doubled, dates and
/// timestamps are quoted, lists become a parenthesized list of formatted
/// items, and everything else uses its plain textual form.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Text(s) => format!("'{}'", s.replace('\'', "''")),
        Value::Date(_) | Value::DateTime(_) => format!("'{}'", value),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(format_value).collect();
            format!("({})", items.join(", "))
        }
        _ => value.to_string(),
    }
}
