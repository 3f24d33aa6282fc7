use serde_json::Value;

use super::display_scalar;

/// Print just the key answer value from the output.
///
/// Looks in the result (and its `metrics` object, for a full analysis) for
/// well-known fields in priority order, then falls back to the first field.
pub fn print_minimal(value: &Value) {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    let metrics_obj = result_obj.get("metrics").unwrap_or(result_obj);

    // Priority list of key output fields
    let priority_keys = [
        "annual_cash_flow",
        "cash_on_cash_return",
        "cap_rate",
        "net_operating_income",
        "down_payment_amount",
    ];

    if let Value::Object(map) = metrics_obj {
        // Try priority keys first (skip null values)
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", display_scalar(key, val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, display_scalar(key, val));
            return;
        }
    }

    // Not an object, just print directly
    println!("{}", display_scalar("", metrics_obj));
}
