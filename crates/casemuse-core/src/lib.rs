//! Test case model, store, and export serialization
//!
//! This crate provides the session-independent logic for the Case Muse
//! test-case workbench:
//!
//! - `types`: the test case record, generator drafts, and the wire
//!   contract shared by the API server and the browser client
//! - `store`: the in-memory ordered store with its ID assignment policy
//! - `export`: CSV/JSON serialization of the store contents
//! - `validate`: target URL and dialog field validation
//!
//! Everything here is plain Rust with no I/O, so both the server and the
//! WASM client link against it and the behavior is unit-tested natively.

pub mod error;
pub mod export;
pub mod store;
pub mod types;
pub mod validate;

pub use error::CaseMuseError;
pub use export::{test_cases_from_json, to_csv, to_json};
pub use store::TestCaseStore;
pub use types::{
    GenerateTestCasesRequest, GenerateTestCasesResponse, TestCase, TestCaseDraft, TestCaseFields,
};
pub use validate::{split_steps, validate_fields, validate_target_url};
