use serde_json::Value;
use std::io;

use super::flatten;

/// Write output as CSV to stdout: one `field,value` row per flattened field.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let _ = wtr.write_record(["field", "value"]);
    match value {
        Value::Object(map) => {
            // Prefer the result payload; the envelope metadata is not tabular
            let body = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            for (key, val) in flatten(body, true) {
                let _ = wtr.write_record([key.as_str(), &format_csv_value(&val)]);
            }
            if let Some(Value::Array(warnings)) = map.get("warnings") {
                for w in warnings {
                    let _ = wtr.write_record(["warning", &format_csv_value(w)]);
                }
            }
        }
        _ => {
            let _ = wtr.write_record(["value", &format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
