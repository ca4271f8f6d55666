use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TijError {
    #[error("could not open document: {0}")]
    DocumentOpen(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("could not find Final Totals in one or both documents ({})", .documents.join(", "))]
    TotalsNotFound { documents: Vec<String> },

    #[error("failed to render report: {0}")]
    Render(String),

    #[error("failed to load options from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid options: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
