use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid model data: {0}")]
    Invalid(String),
    #[error("Fragment \"{0}\" not found")]
    FragmentNotFound(String),
    #[error("no fragments found for {0}")]
    NoFragments(String),
}
