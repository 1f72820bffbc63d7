//! Input validation for web service requests

use serde::{Deserialize, Serialize};

/// Maximum allowed length for a query or path segment
const MAX_QUERY_LENGTH: usize = 1000;

/// Maximum allowed length for a dataset id
const MAX_DATASET_LENGTH: usize = 64;

/// Maximum number of help hits returned per request
pub const MAX_HELP_LIMIT: usize = 50;

/// Validation errors for user input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// Input string is empty
    Empty,
    /// Input string is too long
    TooLong { max: usize, actual: usize },
    /// Input contains non-ASCII characters
    NonAscii,
    /// Dataset id contains characters outside `[A-Za-z0-9_]`
    InvalidDataset,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "Input cannot be empty"),
            ValidationError::TooLong { max, actual } => {
                write!(f, "Input too long: {} characters (max: {})", actual, max)
            }
            ValidationError::NonAscii => write!(f, "Input must contain only ASCII characters"),
            ValidationError::InvalidDataset => {
                write!(f, "Dataset id may only contain letters, digits and underscores")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn validate_text(input: &str, max: usize) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if input.len() > max {
        return Err(ValidationError::TooLong {
            max,
            actual: input.len(),
        });
    }
    if !input.is_ascii() {
        return Err(ValidationError::NonAscii);
    }
    Ok(())
}

/// Validate a search query or navigation segment.
pub fn validate_query(input: &str) -> Result<(), ValidationError> {
    validate_text(input, MAX_QUERY_LENGTH)
}

/// Validate a dataset id supplied by the caller.
pub fn validate_dataset(input: &str) -> Result<(), ValidationError> {
    validate_text(input, MAX_DATASET_LENGTH)?;
    if !input.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidDataset);
    }
    Ok(())
}
