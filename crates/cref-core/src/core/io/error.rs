use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid data in '{path}': {reason}")]
    Invalid { path: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error while writing report: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error while writing report: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to serialize parameters: {0}")]
    Toml(#[from] toml::ser::Error),
    #[error("Inconsistent report data: {0}")]
    Inconsistent(String),
}
