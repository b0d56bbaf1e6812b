use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplainError {
    /// No canonical CJK character could be derived from the input.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Missing locale or scenario configuration. Indicates a deployment
    /// problem; never recovered at request time.
    #[error("Config error: {0}")]
    Config(String),

    /// The generative backend failed (transport, auth, or malformed
    /// response). There is no fallback past the generator.
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExplainError>;
