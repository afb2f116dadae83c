use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: a comparison's interest saved wins, then well-known result
/// fields in order of priority, then the first field in the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "new_monthly_payment",
        "payment",
        "payoff_month",
        "total_interest",
    ];

    if let Value::Object(map) = result_obj {
        if let Some(Value::Object(cmp)) = map.get("comparison") {
            if let Some(saved) = cmp.get("interest_saved") {
                return format_minimal(saved);
            }
        }

        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
