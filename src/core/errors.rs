use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexiflowError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Enrichment failed: {0}")]
    Enrichment(String),

    #[error("Answer evaluation failed: {0}")]
    Evaluation(String),

    #[error("Unsupported storage version: {0}")]
    UnsupportedVersion(u32),

    #[error("LexiflowError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for LexiflowError {
    fn from(error: std::io::Error) -> Self {
        LexiflowError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for LexiflowError {
    fn from(error: reqwest::Error) -> Self {
        LexiflowError::Reqwest(Box::new(error))
    }
}
