use crate::models::studio::Studio;
use serde::{Deserialize, Serialize};

/// An input image in the provider's transport shape: base64 payload plus
/// MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineImage {
    pub data: String,
    pub mime_type: String,
}

impl InlineImage {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// One studio submission. Lives only for the duration of a single
/// generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub studio: Studio,
    pub prompt: String,
    pub style: String,
    pub image: Option<InlineImage>,
}

/// A successful generation, still in transport encoding. Consumed for the
/// preview and handed to the persistence step.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedAsset {
    pub image_data: String, // Base64 encoded
    pub mime_type: String,
    pub model: String,
}
