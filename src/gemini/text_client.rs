use crate::error::{Result, StudioError};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const GEMINI_TEXT_MODEL: &str = "gemini-2.5-flash";

const ENHANCE_SYSTEM_INSTRUCTION: &str = "You are an expert creative director specializing in visual content. Your task is to enhance the following user prompt to generate a more detailed and visually rich image. Do not generate the image description itself, but rather a better prompt for an AI image generator.

Rules:
- Add specific details about style, mood, and composition.
- Include technical photography or art terms where relevant (e.g., 'shot on 35mm film', 'depth of field', 'chiaroscuro lighting').
- Specify lighting, colors, and atmosphere.
- Make the description more vivid and detailed.
- Keep the core subject of the original prompt.
- The output must be only the enhanced prompt, with no additional text, titles, or explanations.";

/// Client for the prompt-enhancement path.
#[derive(Clone)]
pub struct TextClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TextClient {
    pub fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Rewrites a draft prompt into a richer photographic description and
    /// returns it verbatim. Failure here is non-fatal for callers: the
    /// original prompt stays usable.
    pub async fn enhance(&self, prompt: &str) -> Result<String> {
        let payload = EnhanceRequest::new(prompt);

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, GEMINI_TEXT_MODEL
        );

        log::info!("Enhancing prompt with model: {}", GEMINI_TEXT_MODEL);

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

        let enhance_response: EnhanceResponse = response
            .json()
            .await
            .map_err(|e| StudioError::SerializationError(e.to_string()))?;

        let text = enhance_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                StudioError::ProviderError("The response did not contain any text.".into())
            })?;

        Ok(text.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnhanceRequest {
    system_instruction: TextContent,
    contents: Vec<TextContent>,
    generation_config: TextGenerationConfig,
}

#[derive(Debug, Serialize)]
struct TextContent {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct TextGenerationConfig {
    temperature: f32,
}

impl EnhanceRequest {
    fn new(prompt: &str) -> Self {
        Self {
            system_instruction: TextContent {
                parts: vec![TextPart {
                    text: ENHANCE_SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            contents: vec![TextContent {
                parts: vec![TextPart {
                    text: format!("Original Prompt: \"{}\"", prompt),
                }],
            }],
            generation_config: TextGenerationConfig { temperature: 0.8 },
        }
    }
}

#[derive(Debug, Deserialize)]
struct EnhanceResponse {
    #[serde(default)]
    candidates: Vec<EnhanceCandidate>,
}

#[derive(Debug, Deserialize)]
struct EnhanceCandidate {
    #[serde(default)]
    content: Option<EnhanceContent>,
}

#[derive(Debug, Deserialize)]
struct EnhanceContent {
    #[serde(default)]
    parts: Vec<EnhancePart>,
}

#[derive(Debug, Deserialize)]
struct EnhancePart {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_request_wraps_prompt() {
        let request = EnhanceRequest::new("a cat");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json["contents"][0]["parts"][0]["text"],
            "Original Prompt: \"a cat\""
        );
        assert_eq!(json["generationConfig"]["temperature"], 0.8);
        assert!(json["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("You are an expert creative director"));
    }

    #[test]
    fn test_enhance_response_text_extraction() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "  A majestic cat, chiaroscuro lighting.  "}]
                }
            }]
        }"#;
        let response: EnhanceResponse = serde_json::from_str(json).unwrap();
        let text: String = response.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .iter()
            .filter_map(|p| p.text.clone())
            .collect();
        assert_eq!(text.trim(), "A majestic cat, chiaroscuro lighting.");
    }

    #[test]
    fn test_enhance_response_without_text() {
        let response: EnhanceResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(response.candidates.is_empty());
    }
}
