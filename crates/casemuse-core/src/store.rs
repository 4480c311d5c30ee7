//! In-memory test case store
//!
//! The authoritative ordered list of test cases for one session. IDs are
//! zero-padded sequence numbers ("TC001") handed out by a monotonic
//! counter that never hands out the same value twice, so generated,
//! appended, and manually added records cannot collide. `replace_all`
//! starts the numbering over; every other mutation continues from where
//! the counter stands.

use crate::types::{TestCase, TestCaseDraft, TestCaseFields};

#[derive(Debug, Clone)]
pub struct TestCaseStore {
    cases: Vec<TestCase>,
    next_seq: u32,
}

impl Default for TestCaseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCaseStore {
    pub fn new() -> Self {
        Self {
            cases: Vec::new(),
            next_seq: 1,
        }
    }

    /// All test cases, in insertion order.
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TestCase> {
        self.cases.iter().find(|tc| tc.id == id)
    }

    /// Discard all current contents and publish `drafts` with fresh IDs
    /// numbered from TC001.
    pub fn replace_all(&mut self, drafts: Vec<TestCaseDraft>) {
        self.cases.clear();
        self.next_seq = 1;
        self.append(drafts);
    }

    /// Concatenate `drafts` with fresh IDs continuing from the session
    /// counter. Existing records keep their IDs and positions.
    pub fn append(&mut self, drafts: Vec<TestCaseDraft>) {
        self.cases.reserve(drafts.len());
        for draft in drafts {
            let fields = TestCaseFields::from(draft);
            self.push(fields);
        }
    }

    /// Append a single record and return the ID it was assigned.
    pub fn add(&mut self, fields: TestCaseFields) -> String {
        self.push(fields)
    }

    /// Replace the editable fields of the record matching `id` in place.
    /// Returns `false` (no-op) when the ID is absent.
    pub fn update(&mut self, id: &str, fields: TestCaseFields) -> bool {
        match self.cases.iter_mut().find(|tc| tc.id == id) {
            Some(tc) => {
                tc.title = fields.title;
                tc.description = fields.description;
                tc.steps = fields.steps;
                tc.expected_result = fields.expected_result;
                true
            }
            None => false,
        }
    }

    /// Remove the record matching `id`. Returns `false` (no-op) when absent.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.cases.len();
        self.cases.retain(|tc| tc.id != id);
        self.cases.len() != before
    }

    /// Reset to empty. The counter is left untouched so IDs handed out
    /// afterwards still cannot collide with anything exported earlier in
    /// the session.
    pub fn clear(&mut self) {
        self.cases.clear();
    }

    fn push(&mut self, fields: TestCaseFields) -> String {
        let id = self.next_id();
        self.cases.push(TestCase {
            id: id.clone(),
            title: fields.title,
            description: fields.description,
            steps: fields.steps,
            expected_result: fields.expected_result,
        });
        id
    }

    fn next_id(&mut self) -> String {
        let id = format!("TC{:03}", self.next_seq);
        self.next_seq += 1;
        id
    }
}
