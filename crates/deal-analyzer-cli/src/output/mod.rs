pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pretty-print JSON to stdout.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Flatten nested objects into dotted keys (`metrics.cap_rate`).
///
/// Arrays are indexed (`expense_breakdown.0.label`) when `expand_arrays` is
/// set, otherwise kept whole under their key.
pub(crate) fn flatten(map: &Map<String, Value>, expand_arrays: bool) -> Vec<(String, Value)> {
    let mut rows = Vec::new();
    for (key, val) in map {
        flatten_into(key, val, expand_arrays, &mut rows);
    }
    rows
}

fn flatten_into(prefix: &str, value: &Value, expand_arrays: bool, rows: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_into(&format!("{prefix}.{key}"), val, expand_arrays, rows);
            }
        }
        Value::Array(items) if expand_arrays => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(&format!("{prefix}.{i}"), item, expand_arrays, rows);
            }
        }
        _ => rows.push((prefix.to_string(), value.clone())),
    }
}

/// Render a scalar for human-facing output. A DSCR with no debt behind it is
/// shown as `N/A`, never as a number.
pub(crate) fn display_scalar(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) if key.ends_with("dscr") && s == "unbounded" => "N/A (no debt)".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| display_scalar(key, v))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_objects() {
        let value = json!({"metrics": {"cap_rate": "7.748", "dscr": "unbounded"}, "n": 1});
        let rows = flatten(value.as_object().unwrap(), false);
        let keys: Vec<&str> = rows.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["metrics.cap_rate", "metrics.dscr", "n"]);
    }

    #[test]
    fn test_flatten_expands_arrays() {
        let value = json!({"lines": [{"label": "Taxes"}, {"label": "Insurance"}]});
        let rows = flatten(value.as_object().unwrap(), true);
        assert_eq!(rows[1].0, "lines.1.label");

        let rows = flatten(value.as_object().unwrap(), false);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_unbounded_dscr_display() {
        assert_eq!(display_scalar("metrics.dscr", &json!("unbounded")), "N/A (no debt)");
        assert_eq!(display_scalar("metrics.dscr", &json!("1.2008")), "1.2008");
        assert_eq!(display_scalar("label", &json!("unbounded")), "unbounded");
    }
}
