pub mod image_client;
pub mod text_client;

use crate::{
    config::GeminiConfig,
    error::{Result, StudioError},
    models::{GeneratedAsset, GenerationRequest, Studio},
};
use async_trait::async_trait;

pub use image_client::{ImageClient, GEMINI_IMAGE_MODEL, IMAGEN_MODEL};
pub use text_client::{TextClient, GEMINI_TEXT_MODEL};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The generation capability as the studio controller sees it: one prompt
/// refinement call and one generation call selected by studio.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn enhance(&self, prompt: &str) -> Result<String>;
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedAsset>;
}

#[derive(Clone)]
pub struct GeminiClient {
    text_client: TextClient,
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| StudioError::ConfigError("Gemini API key is required".into()))?;
        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let client = reqwest::Client::new();

        Ok(Self {
            text_client: TextClient::new(client.clone(), api_key.clone(), base_url.clone()),
            image_client: ImageClient::new(client, api_key, base_url),
        })
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn enhance(&self, prompt: &str) -> Result<String> {
        self.text_client.enhance(prompt).await
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedAsset> {
        match request.studio {
            Studio::RealEstate => {
                let image = request.image.as_ref().ok_or_else(|| {
                    StudioError::ValidationError("Please upload an image first.".into())
                })?;
                self.image_client
                    .stage_real_estate(image, &request.style)
                    .await
            }
            Studio::Fashion => {
                let image = request.image.as_ref().ok_or_else(|| {
                    StudioError::ValidationError("Please upload a model image first.".into())
                })?;
                self.image_client
                    .try_on_outfit(image, &request.style)
                    .await
            }
            Studio::Restaurant => {
                self.image_client
                    .generate_food_image(&request.prompt, &request.style)
                    .await
            }
            Studio::Beauty => {
                let image = request.image.as_ref().ok_or_else(|| {
                    StudioError::ValidationError(
                        "Please upload a product image and describe the scene.".into(),
                    )
                })?;
                self.image_client
                    .compose_beauty_ad(image, &request.prompt, &request.style)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_api_key() {
        let result = GeminiClient::new(GeminiConfig::new());
        assert!(matches!(result, Err(StudioError::ConfigError(_))));
    }

    #[test]
    fn test_client_builds_with_key() {
        let client = GeminiClient::new(GeminiConfig::new().with_api_key("test-key"));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_image_studios_reject_missing_image() {
        let client = GeminiClient::new(GeminiConfig::new().with_api_key("test-key")).unwrap();
        for studio in [Studio::RealEstate, Studio::Fashion, Studio::Beauty] {
            let request = GenerationRequest {
                studio,
                prompt: "a scene".to_string(),
                style: "Modern".to_string(),
                image: None,
            };
            // Rejected before any network call is attempted.
            let result = client.generate(request).await;
            assert!(matches!(result, Err(StudioError::ValidationError(_))));
        }
    }
}
