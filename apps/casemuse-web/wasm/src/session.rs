//! Stateful browser session for the test case workbench
//!
//! `TestPlanSession` owns everything the page needs between DOM events:
//! the test case store, the preview/generation state machine, and the
//! two error channels. Generation itself is driven from JavaScript
//! (`beginGeneration` → fetch → `completeGeneration`/`failGeneration`)
//! because the fetch is the page's only asynchronous operation; the UI
//! keeps the trigger disabled while `isGenerating` is true, so at most
//! one request is logically in flight.
//!
//! Generation errors and preview-load errors are independent channels.
//! Neither clears the current target URL: the user must be able to see
//! and correct the offending URL after a failure.

use wasm_bindgen::prelude::*;

use casemuse_core::{
    split_steps, to_csv, to_json, validate_fields, validate_target_url,
    GenerateTestCasesResponse, TestCaseFields, TestCaseStore,
};

use crate::download::trigger_download;

pub const CSV_FILENAME: &str = "test-cases.csv";
pub const JSON_FILENAME: &str = "test-cases.json";

const CSV_MIME: &str = "text/csv;charset=utf-8";
const JSON_MIME: &str = "application/json;charset=utf-8";

/// Preview controller states
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    /// No target URL set
    Idle,
    /// Target set, no generation in flight
    Previewing,
    /// Generation request outstanding
    Generating,
}

/// Stateful page session that holds the test plan in Rust memory
#[wasm_bindgen]
pub struct TestPlanSession {
    store: TestCaseStore,
    state: PreviewState,
    target_url: Option<String>,
    pending_append: bool,
    generation_error: Option<String>,
    preview_error: Option<String>,
}

impl Default for TestPlanSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl TestPlanSession {
    /// Create an empty session
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            store: TestCaseStore::new(),
            state: PreviewState::Idle,
            target_url: None,
            pending_append: false,
            generation_error: None,
            preview_error: None,
        }
    }

    /// Current preview controller state
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> PreviewState {
        self.state
    }

    /// The URL currently driving the preview frame and the next
    /// generation request
    #[wasm_bindgen(getter, js_name = targetUrl)]
    pub fn target_url(&self) -> Option<String> {
        self.target_url.clone()
    }

    #[wasm_bindgen(getter, js_name = isGenerating)]
    pub fn is_generating(&self) -> bool {
        self.state == PreviewState::Generating
    }

    /// Current generation error message, if any
    #[wasm_bindgen(getter, js_name = generationError)]
    pub fn generation_error(&self) -> Option<String> {
        self.generation_error.clone()
    }

    /// Current preview-load error message, if any
    #[wasm_bindgen(getter, js_name = previewError)]
    pub fn preview_error(&self) -> Option<String> {
        self.preview_error.clone()
    }

    #[wasm_bindgen(getter, js_name = testCaseCount)]
    pub fn test_case_count(&self) -> usize {
        self.store.len()
    }

    /// Set the preview target without generating.
    /// Returns the stored target on success, a field-level message on a
    /// malformed URL.
    #[wasm_bindgen(js_name = setPreviewTarget)]
    pub fn set_preview_target(&mut self, url: &str) -> Result<String, JsValue> {
        self.set_preview_target_internal(url)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Start a generation run for `url`. `append` keeps the current
    /// records and adds to them; otherwise the results replace the list.
    #[wasm_bindgen(js_name = beginGeneration)]
    pub fn begin_generation(&mut self, url: &str, append: bool) -> Result<(), JsValue> {
        self.begin_generation_internal(url, append)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Feed the generation response body (JSON) back into the session.
    /// Returns the number of drafts taken in; zero is the valid
    /// "no test cases" outcome, not an error.
    #[wasm_bindgen(js_name = completeGeneration)]
    pub fn complete_generation(&mut self, response_json: &str) -> Result<u32, JsValue> {
        self.complete_generation_internal(response_json)
            .map(|n| n as u32)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Record a failed generation run. A fresh run clears the list; an
    /// append run leaves it untouched. The target URL is preserved
    /// either way.
    #[wasm_bindgen(js_name = failGeneration)]
    pub fn fail_generation(&mut self, message: &str) {
        self.fail_generation_internal(message);
    }

    /// Record a preview-load failure (embedding blocked, unreachable
    /// host). The target URL is preserved for correction.
    #[wasm_bindgen(js_name = reportPreviewError)]
    pub fn report_preview_error(&mut self, message: &str) {
        self.report_preview_error_internal(message);
    }

    #[wasm_bindgen(js_name = dismissGenerationError)]
    pub fn dismiss_generation_error(&mut self) {
        self.generation_error = None;
    }

    #[wasm_bindgen(js_name = dismissPreviewError)]
    pub fn dismiss_preview_error(&mut self) {
        self.preview_error = None;
    }

    /// Add a test case from the dialog fields. Steps are one per line.
    /// Returns the assigned ID.
    #[wasm_bindgen(js_name = addTestCase)]
    pub fn add_test_case(
        &mut self,
        title: &str,
        description: &str,
        steps_text: &str,
        expected_result: &str,
    ) -> Result<String, JsValue> {
        self.add_test_case_internal(title, description, steps_text, expected_result)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Update the test case matching `id` with the dialog fields.
    #[wasm_bindgen(js_name = updateTestCase)]
    pub fn update_test_case(
        &mut self,
        id: &str,
        title: &str,
        description: &str,
        steps_text: &str,
        expected_result: &str,
    ) -> Result<(), JsValue> {
        self.update_test_case_internal(id, title, description, steps_text, expected_result)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Delete the test case matching `id`. No-op (false) when absent.
    #[wasm_bindgen(js_name = deleteTestCase)]
    pub fn delete_test_case(&mut self, id: &str) -> bool {
        self.store.delete(id)
    }

    /// All test cases, in order, for table rendering
    #[wasm_bindgen(js_name = testCases)]
    pub fn test_cases(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.store.cases())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// One test case by ID (for the edit dialog), or null
    #[wasm_bindgen(js_name = testCase)]
    pub fn test_case(&self, id: &str) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.store.get(id))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// CSV rendition of the current list; null when the list is empty
    #[wasm_bindgen(js_name = exportCsv)]
    pub fn export_csv(&self) -> Option<String> {
        to_csv(self.store.cases())
    }

    /// JSON rendition of the current list; null when the list is empty
    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self) -> Option<String> {
        to_json(self.store.cases())
    }

    /// Download the CSV export. Returns false (no file) when the list is
    /// empty.
    #[wasm_bindgen(js_name = downloadCsv)]
    pub fn download_csv(&self) -> Result<bool, JsValue> {
        match self.export_csv() {
            None => Ok(false),
            Some(content) => {
                trigger_download(CSV_FILENAME, &content, CSV_MIME)?;
                Ok(true)
            }
        }
    }

    /// Download the JSON export. Returns false (no file) when the list
    /// is empty.
    #[wasm_bindgen(js_name = downloadJson)]
    pub fn download_json(&self) -> Result<bool, JsValue> {
        match self.export_json() {
            None => Ok(false),
            Some(content) => {
                trigger_download(JSON_FILENAME, &content, JSON_MIME)?;
                Ok(true)
            }
        }
    }

    /// Explicit reset: empty list, no target, no errors
    pub fn reset(&mut self) {
        self.store.clear();
        self.state = PreviewState::Idle;
        self.target_url = None;
        self.pending_append = false;
        self.generation_error = None;
        self.preview_error = None;
    }
}

// Internal methods, testable without JsValue
impl TestPlanSession {
    fn set_preview_target_internal(&mut self, url: &str) -> Result<String, String> {
        if self.state == PreviewState::Generating {
            return Err("A generation request is in flight.".to_string());
        }

        validate_target_url(url).map_err(|e| e.to_string())?;

        let target = url.trim().to_string();
        self.target_url = Some(target.clone());
        self.state = PreviewState::Previewing;
        self.preview_error = None;

        Ok(target)
    }

    fn begin_generation_internal(&mut self, url: &str, append: bool) -> Result<(), String> {
        if self.state == PreviewState::Generating {
            return Err("A generation request is already in flight.".to_string());
        }

        validate_target_url(url).map_err(|e| e.to_string())?;

        // Generating is a joint action: the preview target moves with it.
        self.target_url = Some(url.trim().to_string());
        self.state = PreviewState::Generating;
        self.pending_append = append;
        self.generation_error = None;
        self.preview_error = None;

        Ok(())
    }

    fn complete_generation_internal(&mut self, response_json: &str) -> Result<usize, String> {
        if self.state != PreviewState::Generating {
            return Err("No generation request is in flight.".to_string());
        }

        // A parse failure leaves the session in Generating so the caller
        // can route it through failGeneration like any other failure.
        let response: GenerateTestCasesResponse = serde_json::from_str(response_json)
            .map_err(|e| format!("Unexpected generation response: {}", e))?;

        let count = response.test_cases.len();
        if self.pending_append {
            self.store.append(response.test_cases);
        } else {
            self.store.replace_all(response.test_cases);
        }

        self.state = PreviewState::Previewing;
        self.pending_append = false;

        Ok(count)
    }

    fn fail_generation_internal(&mut self, message: &str) {
        if self.state == PreviewState::Generating {
            // A fresh attempt that fails leaves nothing stale behind; a
            // failed append keeps what was already there.
            if !self.pending_append {
                self.store.clear();
            }
            self.state = PreviewState::Previewing;
            self.pending_append = false;
        }

        self.generation_error = Some(message.to_string());
    }

    fn report_preview_error_internal(&mut self, message: &str) {
        self.preview_error = Some(message.to_string());
    }

    fn add_test_case_internal(
        &mut self,
        title: &str,
        description: &str,
        steps_text: &str,
        expected_result: &str,
    ) -> Result<String, String> {
        let fields = dialog_fields(title, description, steps_text, expected_result)?;
        Ok(self.store.add(fields))
    }

    fn update_test_case_internal(
        &mut self,
        id: &str,
        title: &str,
        description: &str,
        steps_text: &str,
        expected_result: &str,
    ) -> Result<(), String> {
        let fields = dialog_fields(title, description, steps_text, expected_result)?;

        if self.store.update(id, fields) {
            Ok(())
        } else {
            Err(format!("No test case with ID {}.", id))
        }
    }
}

/// Assemble and validate dialog input.
fn dialog_fields(
    title: &str,
    description: &str,
    steps_text: &str,
    expected_result: &str,
) -> Result<TestCaseFields, String> {
    let fields = TestCaseFields {
        title: title.trim().to_string(),
        description: description.trim().to_string(),
        steps: split_steps(steps_text),
        expected_result: expected_result.trim().to_string(),
    };

    let errors = validate_fields(&fields);
    if errors.is_empty() {
        Ok(fields)
    } else {
        Err(errors.join(" "))
    }
}
