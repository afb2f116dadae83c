use serde::de::DeserializeOwned;
use std::io::{self, Read};

use super::file::parse_json;

/// Read loan parameters piped on stdin into a typed input struct.
/// Returns None if stdin is a TTY (interactive) or the pipe is empty.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    parse_piped(&buffer)
        .map_err(|e| format!("Failed to parse loan input from stdin: {}", e).into())
}

fn parse_piped<T: DeserializeOwned>(text: &str) -> Result<Option<T>, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_json(text).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_lab_core::refinance::RefinanceInput;
    use rust_decimal::Decimal;

    #[test]
    fn test_empty_pipe_is_no_input() {
        let parsed: Option<RefinanceInput> = parse_piped("  \n").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_piped_refinance_input_defaults_costs_to_zero() {
        let json = r#"{
            "balance": "300000", "apr": "6.5", "years_remaining": "28",
            "refi_years": "2", "new_apr": "5.2", "new_term_years": "30"
        }"#;
        let parsed: RefinanceInput = parse_piped(json).unwrap().unwrap();
        assert_eq!(parsed.costs, Decimal::ZERO);
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let parsed = parse_piped::<RefinanceInput>(r#"{ "balance": "1000" }"#);
        assert!(parsed.is_err());
    }
}
