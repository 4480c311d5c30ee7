//! CSV and JSON export serialization
//!
//! Serializes the store contents for client-local download. Both formats
//! return `None` for an empty list: exporting nothing produces no file.

use crate::error::CaseMuseError;
use crate::types::TestCase;

/// Literal two-character token used to flatten multi-line steps into a
/// single CSV field.
pub const STEP_SEPARATOR: &str = "\\n";

pub const CSV_HEADER: &str = "ID,Title,Description,Steps,Expected Result";

/// Render the test cases as CSV, one row per record.
///
/// Text fields are double-quote-enclosed with internal quotes doubled;
/// steps are joined with [`STEP_SEPARATOR`] so each record stays on one
/// line.
pub fn to_csv(cases: &[TestCase]) -> Option<String> {
    if cases.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(cases.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for tc in cases {
        let row = [
            tc.id.clone(),
            csv_quote(&tc.title),
            csv_quote(&tc.description),
            csv_quote(&tc.steps.join(STEP_SEPARATOR)),
            csv_quote(&tc.expected_result),
        ];
        lines.push(row.join(","));
    }

    Some(lines.join("\n"))
}

/// Render the test cases as a pretty-printed JSON array.
pub fn to_json(cases: &[TestCase]) -> Option<String> {
    if cases.is_empty() {
        return None;
    }
    // Serializing plain strings and vectors cannot fail.
    serde_json::to_string_pretty(cases).ok()
}

/// Parse a previously exported JSON file back into test cases.
pub fn test_cases_from_json(json: &str) -> Result<Vec<TestCase>, CaseMuseError> {
    serde_json::from_str(json).map_err(|e| CaseMuseError::ImportError(e.to_string()))
}

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn case(id: &str, title: &str) -> TestCase {
        TestCase {
            id: id.to_string(),
            title: title.to_string(),
            description: "desc".to_string(),
            steps: vec!["Open the page".to_string(), "Click the button".to_string()],
            expected_result: "The form submits".to_string(),
        }
    }

    #[test]
    fn empty_store_exports_nothing() {
        assert!(to_csv(&[]).is_none());
        assert!(to_json(&[]).is_none());
    }

    #[test]
    fn csv_has_header_and_one_row_per_case() {
        let csv = to_csv(&[case("TC001", "a"), case("TC002", "b")]).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with("TC001,"));
        assert!(lines[2].starts_with("TC002,"));
    }

    #[test]
    fn csv_doubles_embedded_quotes() {
        let mut tc = case("TC001", "He said \"hi\"");
        tc.description = "plain".to_string();

        let csv = to_csv(&[tc]).unwrap();
        let row = csv.lines().nth(1).unwrap();

        assert!(row.contains("\"He said \"\"hi\"\"\""));
        // The quoted title still reads as a single logical cell.
        let cells = split_csv_row(row);
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[1], "He said \"hi\"");
    }

    #[test]
    fn csv_flattens_steps_with_the_separator_token() {
        let csv = to_csv(&[case("TC001", "t")]).unwrap();
        let row = csv.lines().nth(1).unwrap();

        assert!(row.contains("Open the page\\nClick the button"));
        // The token is a literal backslash-n, not a newline: every record
        // stays on one physical line.
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn json_round_trip_preserves_every_field() {
        let cases = vec![case("TC001", "first"), case("TC002", "second")];

        let json = to_json(&cases).unwrap();
        let parsed = test_cases_from_json(&json).unwrap();

        assert_eq!(parsed, cases);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let json = to_json(&[case("TC001", "t")]).unwrap();
        assert!(json.contains("\"expectedResult\""));
    }

    #[test]
    fn import_rejects_malformed_json() {
        assert!(test_cases_from_json("not json").is_err());
        assert!(test_cases_from_json("{\"oops\": true}").is_err());
    }

    /// Minimal RFC-4180-ish row splitter for assertions only.
    fn split_csv_row(row: &str) -> Vec<String> {
        let mut cells = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = row.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        current.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '"' => in_quotes = true,
                ',' if !in_quotes => {
                    cells.push(std::mem::take(&mut current));
                }
                c => current.push(c),
            }
        }
        cells.push(current);
        cells
    }
}
