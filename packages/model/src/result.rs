use crate::error::ModelError;

/// Result type alias for model conversions
pub type ModelResult<T> = Result<T, ModelError>;
