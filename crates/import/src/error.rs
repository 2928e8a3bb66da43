use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Invalid refine profile: {0}")]
    Profile(String),
    #[error("No data rows")]
    NoDataRows,
    #[error("Refinement worker failed: {0}")]
    Join(String),
}
