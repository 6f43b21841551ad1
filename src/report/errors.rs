use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Output error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error)
}
