use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaseMuseError {
    #[error("{0}")]
    InvalidUrl(String),

    #[error("Import failed: {0}")]
    ImportError(String),
}
