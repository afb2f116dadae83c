pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Month-by-month rows if `map` is a serialised schedule.
pub(crate) fn schedule_rows(map: &Map<String, Value>) -> Option<&[Value]> {
    match map.get("rows") {
        Some(Value::Array(rows)) => Some(rows.as_slice()),
        _ => None,
    }
}

/// One-line description of a serialised schedule.
pub(crate) fn summarise_schedule(map: &Map<String, Value>) -> String {
    let field = |key: &str| match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "—".to_string(),
        Some(v) => v.to_string(),
    };
    let mut summary = format!(
        "{} months, total interest {}",
        field("payoff_month"),
        field("total_interest")
    );
    if map.get("negative_amortization_detected") == Some(&Value::Bool(true)) {
        summary.push_str(" (negative amortization)");
    }
    summary
}
