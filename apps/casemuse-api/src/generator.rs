//! AI test case generation boundary
//!
//! One canonical prompt, one atomic request/response call against the
//! Google Generative Language API. The model is asked for JSON matching
//! the `GenerateTestCasesResponse` schema; a reply with nothing usable in
//! it maps to an empty draft list, which is a valid "no results" outcome
//! rather than an error.
//!
//! The boundary is a trait so the HTTP handlers can be exercised with a
//! scripted double in tests.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use casemuse_core::{GenerateTestCasesResponse, TestCaseDraft};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Model request failed: {0}")]
    Http(String),

    #[error("Model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

/// The external generation contract: a URL in, draft test cases out.
#[async_trait]
pub trait TestCaseGenerator: Send + Sync {
    async fn generate(&self, url: &Url) -> Result<Vec<TestCaseDraft>, GeneratorError>;
}

/// Generator backed by the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGenerator {
    pub fn new(api_key: String, model: String, timeout_ms: u64) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;

        Ok(Self {
            http,
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
}

#[async_trait]
impl TestCaseGenerator for GeminiGenerator {
    async fn generate(&self, url: &Url) -> Result<Vec<TestCaseDraft>, GeneratorError> {
        let endpoint = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = request_body(url);

        let resp = self
            .http
            .post(&endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeneratorError::Http(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| GeneratorError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| GeneratorError::MalformedResponse(e.to_string()))?;

        match payload_text(&parsed) {
            // The model produced no candidates at all: treat as "nothing
            // to generate", not as a failure.
            None => Ok(Vec::new()),
            Some(payload) => {
                debug!("Model payload: {} bytes", payload.len());
                parse_drafts(&payload)
            }
        }
    }
}

/// Build the `generateContent` request body with JSON response mode on.
fn request_body(url: &Url) -> serde_json::Value {
    serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": build_prompt(url) }],
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "temperature": 0.4,
        },
    })
}

/// The canonical generation instructions. The wording here is a tunable
/// parameter of the model call, not part of the wire contract.
fn build_prompt(url: &Url) -> String {
    format!(
        "You are an expert QA engineer specializing in web application testing. \
Your task is to analyze the webpage found at the URL: {url} and generate \
comprehensive test cases for it.\n\
\n\
Identify the page's key interactive elements and user actions, then generate \
test cases of the following kinds:\n\
1. Click action tests: for every button and actionable link, verify what \
happens when it is clicked. Title the case after the action (e.g. \"Verify \
'Submit' button functionality\"), describe what is being tested, give clear \
numbered steps, and state the observable outcome.\n\
2. Element presence tests: for important elements, both interactive and key \
static ones that confirm page context, verify they are present and visible.\n\
3. Basic form interaction tests: for forms, verify the presence of key input \
fields and the submission action.\n\
\n\
Return your findings as a JSON object with a single key 'testCases', an array \
of test case objects. Each object MUST have exactly these fields:\n\
- id: a placeholder string (the client overwrites it)\n\
- title: a descriptive title for the test case\n\
- description: a detailed description of what is tested\n\
- steps: an array of strings, one executable step each, in order\n\
- expectedResult: the expected observable result\n\
\n\
Focus on practical, actionable test cases for the elements and interactions \
identifiable from the page. If the page is very complex, prioritize the most \
critical interactions. If nothing can be generated, return an empty \
'testCases' array. The entire output must be valid JSON matching the schema."
    )
}

// Response shape of generateContent, reduced to the parts we read.

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Concatenate the text parts of the first candidate, if any.
fn payload_text(resp: &GenerateContentResponse) -> Option<String> {
    let content = resp.candidates.first()?.content.as_ref()?;
    let text = content
        .parts
        .iter()
        .map(|p| p.text.as_str())
        .collect::<String>();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse the model's JSON payload into drafts.
///
/// Models occasionally wrap JSON output in a Markdown code fence even in
/// JSON response mode; strip it before parsing.
fn parse_drafts(payload: &str) -> Result<Vec<TestCaseDraft>, GeneratorError> {
    let stripped = strip_code_fence(payload);

    serde_json::from_str::<GenerateTestCasesResponse>(stripped)
        .map(|r| r.test_cases)
        .map_err(|e| GeneratorError::MalformedResponse(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(inner) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    {
        if let Some(inner) = inner.strip_suffix("```") {
            return inner.trim();
        }
    }

    trimmed
}
