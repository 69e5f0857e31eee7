use thiserror::Error;

/// Errors raised while decoding or converting page model values
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown section type: {0}")]
    UnknownSectionType(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
