use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkitError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid package selected: {0}")]
    InvalidPackage(String),
    #[error("A generation is already in progress")]
    GenerationInProgress,
    #[error("Failed to generate image variation {variation}")]
    VariationFailed {
        /// 1-based, as shown to the user.
        variation: usize,
        #[source]
        source: Box<MarkitError>,
    },
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("No image data found in response")]
    NoImageData,
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),
}

impl MarkitError {
    pub fn variation_failed(index: usize, cause: MarkitError) -> Self {
        MarkitError::VariationFailed {
            variation: index + 1,
            source: Box::new(cause),
        }
    }

    /// Errors caused by what the user submitted rather than by the generation backend.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            MarkitError::InvalidInput(_)
                | MarkitError::InvalidPackage(_)
                | MarkitError::GenerationInProgress
        )
    }
}

impl From<reqwest::Error> for MarkitError {
    fn from(e: reqwest::Error) -> Self {
        MarkitError::RequestError(e.to_string())
    }
}

impl From<serde_json::Error> for MarkitError {
    fn from(e: serde_json::Error) -> Self {
        MarkitError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MarkitError>;
