//! Input validation for target URLs and dialog fields
//!
//! Both the preview and the generation actions are gated on
//! [`validate_target_url`]; a malformed URL is rejected client-side with
//! a field-level message before anything fires.

use url::Url;

use crate::error::CaseMuseError;
use crate::types::TestCaseFields;

/// Validate a user-supplied target URL.
///
/// The target must be a well-formed absolute http(s) URL with a host.
pub fn validate_target_url(input: &str) -> Result<Url, CaseMuseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CaseMuseError::InvalidUrl("Please enter a URL.".to_string()));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|_| CaseMuseError::InvalidUrl("Please enter a valid URL.".to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(CaseMuseError::InvalidUrl(format!(
                "Unsupported scheme '{}'. Use http or https.",
                other
            )));
        }
    }

    if parsed.host_str().is_none() {
        return Err(CaseMuseError::InvalidUrl(
            "The URL must include a host.".to_string(),
        ));
    }

    Ok(parsed)
}

/// Split dialog steps text into ordered steps, one per line.
///
/// Lines are trimmed and blank lines dropped; the remaining order is the
/// execution order.
pub fn split_steps(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Validate the editable fields collected by the add/edit dialogs.
///
/// Returns the field-level messages; an empty list means valid.
pub fn validate_fields(fields: &TestCaseFields) -> Vec<String> {
    let mut errors = Vec::new();

    if fields.title.trim().is_empty() {
        errors.push("Title is required.".to_string());
    }
    if fields.description.trim().is_empty() {
        errors.push("Description is required.".to_string());
    }
    if fields.steps.is_empty() {
        errors.push("Steps are required (one per line).".to_string());
    }
    if fields.expected_result.trim().is_empty() {
        errors.push("Expected result is required.".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(validate_target_url("https://example.com").is_ok());
        assert!(validate_target_url("http://example.com/login?next=/home").is_ok());
        assert!(validate_target_url("  https://example.com  ").is_ok());
    }

    #[test]
    fn rejects_not_a_url() {
        assert!(validate_target_url("not-a-url").is_err());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(validate_target_url("").is_err());
        assert!(validate_target_url("   ").is_err());
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(validate_target_url("ftp://example.com").is_err());
        assert!(validate_target_url("javascript:alert(1)").is_err());
        assert!(validate_target_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn rejects_relative_paths() {
        assert!(validate_target_url("/dashboard").is_err());
        assert!(validate_target_url("example.com/page").is_err());
    }

    #[test]
    fn split_steps_trims_and_drops_blank_lines() {
        let steps = split_steps("1. Open the page\n\n  2. Click login  \n\n");
        assert_eq!(steps, vec!["1. Open the page", "2. Click login"]);
    }

    #[test]
    fn split_steps_preserves_order() {
        let steps = split_steps("first\nsecond\nthird");
        assert_eq!(steps, vec!["first", "second", "third"]);
    }

    #[test]
    fn validate_fields_reports_each_missing_field() {
        let errors = validate_fields(&TestCaseFields::default());
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("Title"));
    }

    #[test]
    fn validate_fields_accepts_a_complete_record() {
        let fields = TestCaseFields {
            title: "t".to_string(),
            description: "d".to_string(),
            steps: vec!["s".to_string()],
            expected_result: "e".to_string(),
        };
        assert!(validate_fields(&fields).is_empty());
    }

    proptest! {
        /// Well-formed http(s) URLs with a plain host always validate.
        #[test]
        fn generated_http_urls_validate(
            scheme in prop_oneof![Just("http"), Just("https")],
            host in "[a-z]{1,12}\\.[a-z]{2,4}",
            path in "(/[a-z0-9]{0,8}){0,3}",
        ) {
            let url = format!("{}://{}{}", scheme, host, path);
            prop_assert!(validate_target_url(&url).is_ok(), "should accept {}", url);
        }

        /// Bare words never validate: there is no scheme or host to target.
        #[test]
        fn bare_words_are_rejected(word in "[a-zA-Z][a-zA-Z0-9-]{0,20}") {
            prop_assert!(validate_target_url(&word).is_err(), "should reject {}", word);
        }
    }
}
