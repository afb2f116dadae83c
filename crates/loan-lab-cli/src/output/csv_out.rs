use serde_json::{Map, Value};
use std::io;

use super::schedule_rows;

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// Schedules become one record per month; a payoff-lab envelope writes the
/// baseline and scenario rows together, tagged by a leading `schedule` column.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let Some(rows) = schedule_rows(map) {
                write_rows_csv(&mut wtr, &[("", rows)]);
            } else if let Some(Value::Object(result)) = map.get("result") {
                match (lab_schedule(result, "baseline"), lab_schedule(result, "scenario")) {
                    (Some(base), Some(alt)) => {
                        write_rows_csv(&mut wtr, &[("baseline", base), ("scenario", alt)])
                    }
                    _ => write_field_csv(&mut wtr, result),
                }
            } else {
                write_field_csv(&mut wtr, map);
            }
        }
        Value::Array(arr) => {
            write_rows_csv(&mut wtr, &[("", arr.as_slice())]);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn lab_schedule<'a>(result: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    match result.get(key) {
        Some(Value::Object(schedule)) => schedule_rows(schedule),
        _ => None,
    }
}

fn write_field_csv(wtr: &mut StdoutWriter<'_>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
    }
}

/// Write each `(tag, rows)` series under one header. An empty tag means a
/// single untagged series.
fn write_rows_csv(wtr: &mut StdoutWriter<'_>, series: &[(&str, &[Value])]) {
    let tagged = series.iter().any(|(tag, _)| !tag.is_empty());
    let headers: Vec<&str> = match series
        .iter()
        .find_map(|(_, rows)| rows.first())
    {
        Some(Value::Object(first)) => first.keys().map(|k| k.as_str()).collect(),
        Some(_) => {
            for (_, rows) in series {
                for item in rows.iter() {
                    let _ = wtr.write_record([&format_csv_value(item)]);
                }
            }
            return;
        }
        None => return,
    };

    let mut header_record: Vec<&str> = Vec::with_capacity(headers.len() + 1);
    if tagged {
        header_record.push("schedule");
    }
    header_record.extend(&headers);
    let _ = wtr.write_record(&header_record);

    for (tag, rows) in series {
        for item in rows.iter() {
            if let Value::Object(map) = item {
                let mut record: Vec<String> = Vec::with_capacity(header_record.len());
                if tagged {
                    record.push((*tag).to_string());
                }
                record.extend(
                    headers
                        .iter()
                        .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default()),
                );
                let _ = wtr.write_record(&record);
            }
        }
    }
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
