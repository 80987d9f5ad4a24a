use thiserror::Error;

/// Errors that can occur while generating a recipe
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Missing API key or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration sources could not be merged or deserialized
    #[error("Configuration error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    /// The request is missing required fields; no model call was made
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Dish name not present in the catalog
    #[error("Unknown dish: {0}")]
    UnknownDish(String),

    /// Label not present in one of the fixed vocabularies
    #[error("Unknown {kind}: {value}")]
    UnknownTag { kind: &'static str, value: String },

    /// Transport failure while talking to the model service
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The model service answered with a non-success status
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A streamed chunk could not be decoded
    #[error("Malformed stream chunk: {0}")]
    Stream(String),

    /// Reading an image or writing a recipe file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecipeError {
    /// True for errors caught before any network call was attempted
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RecipeError::Validation(_)
                | RecipeError::UnknownDish(_)
                | RecipeError::UnknownTag { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RecipeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(RecipeError::Validation("empty".to_string()).is_validation());
        assert!(RecipeError::UnknownDish("Pizza Hawaii".to_string()).is_validation());
        assert!(!RecipeError::Config("no key".to_string()).is_validation());
        assert!(!RecipeError::Stream("bad json".to_string()).is_validation());
    }

    #[test]
    fn test_api_error_message() {
        let err = RecipeError::Api {
            status: 403,
            message: "API key not valid".to_string(),
        };
        assert_eq!(err.to_string(), "Gemini API error (403): API key not valid");
    }
}
