use std::fmt;

#[derive(Debug)]
pub enum StudioError {
    ConfigError(String),
    ValidationError(String),
    ProviderError(String),
    GenerationError(String),
    StorageError(String),
    MetadataError(String),
    FetchError(String),
    SerializationError(String),
    InternalError(String),
}

impl fmt::Display for StudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudioError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            StudioError::ValidationError(msg) => write!(f, "{}", msg),
            StudioError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            StudioError::GenerationError(msg) => write!(f, "{}", msg),
            StudioError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            StudioError::MetadataError(msg) => write!(f, "Metadata error: {}", msg),
            StudioError::FetchError(msg) => write!(f, "Fetch error: {}", msg),
            StudioError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            StudioError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for StudioError {}

pub type Result<T> = std::result::Result<T, StudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages_are_verbatim() {
        // Validation and generation messages are shown directly to the user,
        // so Display must not prefix them.
        let err = StudioError::ValidationError("Please upload an image first.".into());
        assert_eq!(err.to_string(), "Please upload an image first.");

        let err = StudioError::GenerationError(
            "Failed to generate staged image. The response did not contain image data.".into(),
        );
        assert_eq!(
            err.to_string(),
            "Failed to generate staged image. The response did not contain image data."
        );
    }

    #[test]
    fn test_persistence_errors_are_distinguishable() {
        let storage = StudioError::StorageError("upload failed".into());
        let metadata = StudioError::MetadataError("insert failed".into());
        assert!(storage.to_string().starts_with("Storage error:"));
        assert!(metadata.to_string().starts_with("Metadata error:"));
    }
}
