use serde_json::Value;

/// Render a result as indented JSON with a trailing newline.
pub fn render_json(value: &Value) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// Print a loan result to stdout as JSON.
pub fn print_json(value: &Value) {
    match render_json(value) {
        Ok(text) => print!("{}", text),
        Err(e) => tracing::error!(error = %e, "Could not serialise result as JSON"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infeasible_schedule_keeps_nulls_and_decimal_strings() {
        let value = json!({
            "rows": [],
            "payoff_month": null,
            "total_interest": null,
            "negative_amortization_detected": true,
            "balance_at_refinance": "294923.04"
        });
        let text = render_json(&value).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"payoff_month\": null"));
        assert!(text.contains("\"294923.04\""));
    }
}
