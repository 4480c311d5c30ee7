//! WASM bindings for the Case Muse test-case workbench
//!
//! This module provides a stateful, session-based API for the page.
//! All state is held in Rust, minimizing JavaScript complexity.
//!
//! ## Architecture
//!
//! - State management in Rust via `TestPlanSession`: the test case
//!   store, the preview/generation state machine, and both error
//!   channels
//! - URL and dialog field validation in Rust
//! - CSV/JSON serialization and the download trigger in Rust
//! - JavaScript only handles DOM events, the iframe preview, and the
//!   fetch to the generation API
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { TestPlanSession } from './pkg/casemuse_wasm.js';
//!
//! await init();
//! const session = new TestPlanSession();
//!
//! // Preview only
//! session.setPreviewTarget(urlInput.value);
//! iframe.src = session.targetUrl;
//!
//! // Generate (fresh or append)
//! session.beginGeneration(urlInput.value, false);
//! const res = await fetch('/api/generate-test-cases', {
//!   method: 'POST',
//!   headers: { 'Content-Type': 'application/json' },
//!   body: JSON.stringify({ url: session.targetUrl }),
//! });
//! if (res.ok) {
//!   session.completeGeneration(await res.text());
//! } else {
//!   session.failGeneration('Failed to generate test cases. Please try again.');
//! }
//! renderTable(session.testCases());
//!
//! // Manual CRUD and export
//! session.addTestCase(title, description, stepsText, expectedResult);
//! session.downloadCsv();
//! ```

pub mod download;
pub mod session;

use wasm_bindgen::prelude::*;

// Re-export main types for JavaScript
pub use session::{PreviewState, TestPlanSession};

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
