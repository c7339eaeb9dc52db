use crate::{
    error::{Result, StudioError},
    models::{GeneratedAsset, InlineImage},
};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const GEMINI_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const IMAGEN_MODEL: &str = "imagen-4.0-generate-001";

/// Client for the image-producing endpoints: image editing via Gemini
/// `generateContent` and text-to-image via Imagen `predict`.
#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ImageClient {
    pub fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Virtually stages a room photo in the given style.
    pub async fn stage_real_estate(
        &self,
        image: &InlineImage,
        style: &str,
    ) -> Result<GeneratedAsset> {
        let instruction = format!(
            "Virtually stage this empty or outdated room in a \"{}\" style. \
             Ensure the result is a photorealistic image.",
            style
        );
        self.edit_image(
            image,
            &instruction,
            "Failed to generate staged image. The response did not contain image data.",
        )
        .await
    }

    /// Replaces the clothing of the person in the photo with an outfit in
    /// the given style, keeping face, pose and background untouched.
    pub async fn try_on_outfit(&self, image: &InlineImage, style: &str) -> Result<GeneratedAsset> {
        let instruction = format!(
            "Task: Virtual Try-On. Replace the clothing of the person in this image with a new \
             outfit in a \"{}\" style. The new outfit must be photorealistic. IMPORTANT: Do not \
             change the person's face, pose, or the background. The result should be a seamless \
             edit of the original photo.",
            style
        );
        self.edit_image(
            image,
            &instruction,
            "Failed to generate virtual try-on image. The response did not contain image data.",
        )
        .await
    }

    /// Places the unaltered product photo into the described scene.
    pub async fn compose_beauty_ad(
        &self,
        image: &InlineImage,
        scene: &str,
        style: &str,
    ) -> Result<GeneratedAsset> {
        let instruction = format!(
            "Task: Create a beautiful product advertisement image.\n\
             - Product: [Attached Image]\n\
             - Desired Scene: {}\n\
             - Style: {}\n\
             Instructions: Place the product from the attached image into the described scene. \
             The final image should be photorealistic, high-quality, and suitable for a marketing \
             campaign. The product itself should not be altered, only placed within the new context.",
            scene, style
        );
        self.edit_image(
            image,
            &instruction,
            "Failed to generate beauty ad image. The response did not contain image data.",
        )
        .await
    }

    /// Pure text-to-image path for menu photography. No input image; JPEG
    /// output at 4:3.
    pub async fn generate_food_image(
        &self,
        description: &str,
        style: &str,
    ) -> Result<GeneratedAsset> {
        let prompt = format!(
            "A photorealistic image of {}, in a {} style. The food should look delicious and appealing.",
            description, style
        );

        let payload = ImagenRequest {
            instances: vec![ImagenInstance { prompt }],
            parameters: ImagenParameters {
                sample_count: 1,
                aspect_ratio: "4:3".to_string(),
                output_mime_type: "image/jpeg".to_string(),
            },
        };

        let url = format!("{}/models/{}:predict", self.base_url, IMAGEN_MODEL);

        log::info!("Generating food image with model: {}", IMAGEN_MODEL);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| StudioError::ProviderError(format!("Imagen request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StudioError::ProviderError(format!(
                "Imagen request failed with status {}: {}",
                status, error_text
            )));
        }

        let imagen_response: ImagenResponse = response
            .json()
            .await
            .map_err(|e| StudioError::SerializationError(e.to_string()))?;

        let image = imagen_response
            .predictions
            .into_iter()
            .find(|p| !p.bytes_base64_encoded.is_empty())
            .ok_or_else(|| {
                StudioError::GenerationError(
                    "Failed to generate food image. The response did not contain image data."
                        .into(),
                )
            })?;

        Ok(GeneratedAsset {
            image_data: image.bytes_base64_encoded,
            mime_type: image
                .mime_type
                .unwrap_or_else(|| "image/jpeg".to_string()),
            model: IMAGEN_MODEL.to_string(),
        })
    }

    /// Shared edit path: one input image, one instruction, IMAGE response
    /// modality. A 200 response without inline image data is an
    /// application-level failure, not a transport error.
    async fn edit_image(
        &self,
        image: &InlineImage,
        instruction: &str,
        missing_image_message: &str,
    ) -> Result<GeneratedAsset> {
        let payload = GenerateContentRequest::edit(image, instruction);

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, GEMINI_IMAGE_MODEL
        );

        log::info!("Generating image with model: {}", GEMINI_IMAGE_MODEL);
        log::debug!("Instruction: {}", instruction);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| StudioError::ProviderError(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StudioError::ProviderError(format!(
                "Gemini request failed with status {}: {}",
                status, error_text
            )));
        }

        let content_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| StudioError::SerializationError(e.to_string()))?;

        let inline = content_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|p| p.inline_data))
            .ok_or_else(|| StudioError::GenerationError(missing_image_message.to_string()))?;

        Ok(GeneratedAsset {
            image_data: inline.data,
            mime_type: inline.mime_type,
            model: GEMINI_IMAGE_MODEL.to_string(),
        })
    }
}

// Wire types for the Gemini generateContent endpoint.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum RequestPart {
    InlineData { inline_data: RequestInlineData },
    Text { text: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestInlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

impl GenerateContentRequest {
    /// Builds an edit request: the input image first, then the instruction,
    /// matching the part order the model expects.
    fn edit(image: &InlineImage, instruction: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::InlineData {
                        inline_data: RequestInlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.data.clone(),
                        },
                    },
                    RequestPart::Text {
                        text: instruction.to_string(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseCandidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResponsePart {
    #[serde(default)]
    pub inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResponseInlineData {
    pub mime_type: String,
    pub data: String,
}

// Wire types for the Imagen predict endpoint.

#[derive(Debug, Serialize)]
pub(crate) struct ImagenRequest {
    pub instances: Vec<ImagenInstance>,
    pub parameters: ImagenParameters,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImagenInstance {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImagenParameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
    pub output_mime_type: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImagenResponse {
    #[serde(default)]
    pub predictions: Vec<ImagenPrediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImagenPrediction {
    #[serde(default)]
    pub bytes_base64_encoded: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}
