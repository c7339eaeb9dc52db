use crate::models::studio::Studio;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum prompt length stored in the metadata table. Longer prompts are
/// truncated, never rejected.
pub const MAX_STORED_PROMPT_LEN: usize = 1000;

/// A persisted generation record. Created exactly once per successful
/// generation-and-persist cycle and never updated or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub image_url: String,
    pub prompt: String,
    pub style: String,
    pub studio: Studio,
}

/// Insert payload for the metadata table. `id` and `created_at` are
/// assigned server-side.
#[derive(Debug, Clone, Serialize)]
pub struct NewGeneration {
    pub user_id: String,
    pub image_url: String,
    pub prompt: String,
    pub style: String,
    pub studio: Studio,
}

impl NewGeneration {
    pub fn new(
        user_id: impl Into<String>,
        image_url: impl Into<String>,
        prompt: &str,
        style: impl Into<String>,
        studio: Studio,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            image_url: image_url.into(),
            prompt: truncate_prompt(prompt),
            style: style.into(),
            studio,
        }
    }
}

/// Truncates a prompt to the maximum stored length, counting characters.
pub fn truncate_prompt(prompt: &str) -> String {
    if prompt.chars().count() <= MAX_STORED_PROMPT_LEN {
        prompt.to_string()
    } else {
        prompt.chars().take(MAX_STORED_PROMPT_LEN).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_prompts_are_kept_verbatim() {
        assert_eq!(truncate_prompt("a rustic pizza"), "a rustic pizza");
    }

    #[test]
    fn test_long_prompts_are_truncated_to_exact_length() {
        let long = "x".repeat(MAX_STORED_PROMPT_LEN + 500);
        let stored = truncate_prompt(&long);
        assert_eq!(stored.chars().count(), MAX_STORED_PROMPT_LEN);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let long: String = "é".repeat(MAX_STORED_PROMPT_LEN + 1);
        let stored = truncate_prompt(&long);
        assert_eq!(stored.chars().count(), MAX_STORED_PROMPT_LEN);
    }

    #[test]
    fn test_new_generation_truncates_prompt() {
        let long = "p".repeat(2000);
        let record = NewGeneration::new("user-1", "https://x/y.png", &long, "Modern", Studio::RealEstate);
        assert_eq!(record.prompt.len(), MAX_STORED_PROMPT_LEN);
        assert_eq!(record.studio, Studio::RealEstate);
    }

    #[test]
    fn test_record_deserializes_from_row_json() {
        let json = r#"{
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "created_at": "2024-05-01T12:00:00Z",
            "user_id": "user-1",
            "image_url": "https://example.supabase.co/storage/v1/object/public/generations/user-1/1714564800000.png",
            "prompt": "Virtual Staging of an empty room.",
            "style": "Modern",
            "studio": "Real Estate"
        }"#;
        let record: GeneratedImage = serde_json::from_str(json).unwrap();
        assert_eq!(record.studio, Studio::RealEstate);
        assert_eq!(record.style, "Modern");
        assert_eq!(record.user_id, "user-1");
    }
}
