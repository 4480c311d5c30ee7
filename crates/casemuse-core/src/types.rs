//! Core record types and the generation wire contract
//!
//! Field names serialize in camelCase to match the JSON exchanged with
//! the browser client and written by the JSON export.

use serde::{Deserialize, Serialize};

/// A single QA test case as listed, edited, and exported by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Unique within the store for the whole session.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Execution steps in order. Ordering is meaningful and preserved
    /// through edits and exports.
    pub steps: Vec<String>,
    pub expected_result: String,
}

impl TestCase {
    /// The editable portion of the record (everything but the ID).
    pub fn fields(&self) -> TestCaseFields {
        TestCaseFields {
            title: self.title.clone(),
            description: self.description.clone(),
            steps: self.steps.clone(),
            expected_result: self.expected_result.clone(),
        }
    }
}

/// A test case as produced by the generator, before the store assigns an ID.
///
/// The model is asked to emit an `id`, but the value is a placeholder and
/// the store always overwrites it. `id` and `steps` tolerate absence so a
/// slightly out-of-schema model reply still parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseDraft {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub steps: Vec<String>,
    pub expected_result: String,
}

/// Editable fields of a test case, as collected by the add/edit dialogs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseFields {
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
    pub expected_result: String,
}

impl From<TestCaseDraft> for TestCaseFields {
    fn from(draft: TestCaseDraft) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            steps: draft.steps,
            expected_result: draft.expected_result,
        }
    }
}

/// Request body for `POST /api/generate-test-cases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTestCasesRequest {
    pub url: String,
}

/// Response body for `POST /api/generate-test-cases`.
///
/// `testCases` is always present. An empty list is the non-error
/// "nothing to generate" result, distinct from a failed call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestCasesResponse {
    #[serde(default)]
    pub test_cases: Vec<TestCaseDraft>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_case_serializes_camel_case() {
        let tc = TestCase {
            id: "TC001".to_string(),
            title: "Login".to_string(),
            description: "Verify login".to_string(),
            steps: vec!["Open page".to_string(), "Submit".to_string()],
            expected_result: "Dashboard shown".to_string(),
        };

        let json = serde_json::to_string(&tc).unwrap();
        assert!(json.contains("\"expectedResult\""));
        assert!(!json.contains("expected_result"));
    }

    #[test]
    fn draft_parses_without_id_or_steps() {
        let json = r#"{
            "title": "Check header",
            "description": "Header is visible",
            "expectedResult": "Header present"
        }"#;

        let draft: TestCaseDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.id, "");
        assert!(draft.steps.is_empty());
        assert_eq!(draft.title, "Check header");
    }

    #[test]
    fn response_defaults_to_empty_list() {
        let resp: GenerateTestCasesResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.test_cases.is_empty());

        let resp: GenerateTestCasesResponse =
            serde_json::from_str(r#"{"testCases": []}"#).unwrap();
        assert!(resp.test_cases.is_empty());
    }
}
