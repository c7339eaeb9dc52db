use serde::{Deserialize, Serialize};
use std::fmt;

/// The four fixed creative workflows. Each carries its own required inputs
/// and prompt-construction rule; there is no dynamic extension at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Studio {
    #[serde(rename = "Real Estate")]
    RealEstate,
    Fashion,
    Restaurant,
    Beauty,
}

impl Studio {
    pub fn as_str(&self) -> &'static str {
        match self {
            Studio::RealEstate => "Real Estate",
            Studio::Fashion => "Fashion",
            Studio::Restaurant => "Restaurant",
            Studio::Beauty => "Beauty",
        }
    }

    pub fn all() -> [Studio; 4] {
        [
            Studio::RealEstate,
            Studio::Fashion,
            Studio::Restaurant,
            Studio::Beauty,
        ]
    }

    pub fn requires_image(&self) -> bool {
        !matches!(self, Studio::Restaurant)
    }

    /// MIME type of the generated result: the food studio is a pure
    /// text-to-image path producing JPEG, everything else is an edit
    /// producing PNG.
    pub fn result_mime_type(&self) -> &'static str {
        match self {
            Studio::Restaurant => "image/jpeg",
            _ => "image/png",
        }
    }

    /// Checks the studio's required fields before any external call is made.
    /// Returns the inline message to surface when a field is missing.
    pub fn validate(
        &self,
        has_image: bool,
        prompt: &str,
        style: &str,
    ) -> std::result::Result<(), &'static str> {
        match self {
            Studio::RealEstate if !has_image => Err("Please upload an image first."),
            Studio::Fashion if !has_image => Err("Please upload a model image first."),
            Studio::Fashion if style == "Custom" && prompt.trim().is_empty() => {
                Err("Please select a style or enter a custom prompt.")
            }
            Studio::Restaurant if prompt.trim().is_empty() => Err("Please describe the food item."),
            Studio::Beauty if !has_image || prompt.trim().is_empty() => {
                Err("Please upload a product image and describe the scene.")
            }
            _ => Ok(()),
        }
    }

    /// The prompt text recorded in the gallery for a successful generation.
    pub fn persisted_prompt(&self, prompt: &str, effective_style: &str) -> String {
        match self {
            Studio::RealEstate => "Virtual Staging of an empty room.".to_string(),
            Studio::Fashion => effective_style.to_string(),
            Studio::Restaurant | Studio::Beauty => prompt.to_string(),
        }
    }

    pub fn default_style(&self) -> &'static str {
        match self {
            Studio::RealEstate => "Modern",
            Studio::Fashion => "Sports",
            Studio::Restaurant => "Studio Lighting",
            Studio::Beauty => "Minimalist",
        }
    }
}

impl fmt::Display for Studio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_studio_serde_uses_display_labels() {
        assert_eq!(
            serde_json::to_string(&Studio::RealEstate).unwrap(),
            "\"Real Estate\""
        );
        assert_eq!(
            serde_json::from_str::<Studio>("\"Fashion\"").unwrap(),
            Studio::Fashion
        );
    }

    #[test]
    fn test_required_fields_per_studio() {
        assert!(Studio::RealEstate.validate(false, "", "Modern").is_err());
        assert!(Studio::RealEstate.validate(true, "", "Modern").is_ok());

        assert!(Studio::Fashion.validate(false, "", "Sports").is_err());
        assert!(Studio::Fashion.validate(true, "", "Sports").is_ok());
        // "Custom" style needs non-blank custom text.
        assert_eq!(
            Studio::Fashion.validate(true, "   ", "Custom"),
            Err("Please select a style or enter a custom prompt.")
        );
        assert!(Studio::Fashion
            .validate(true, "a silver jacket", "Custom")
            .is_ok());

        assert_eq!(
            Studio::Restaurant.validate(false, "", "Rustic"),
            Err("Please describe the food item.")
        );
        assert!(Studio::Restaurant
            .validate(false, "a wood-fired pizza", "Rustic")
            .is_ok());

        assert!(Studio::Beauty.validate(true, "", "Lush").is_err());
        assert!(Studio::Beauty.validate(false, "a forest", "Lush").is_err());
        assert!(Studio::Beauty.validate(true, "a forest", "Lush").is_ok());
    }

    #[test]
    fn test_persisted_prompt_rules() {
        assert_eq!(
            Studio::RealEstate.persisted_prompt("ignored", "Modern"),
            "Virtual Staging of an empty room."
        );
        assert_eq!(
            Studio::Fashion.persisted_prompt("a silver jacket", "a silver jacket"),
            "a silver jacket"
        );
        assert_eq!(
            Studio::Restaurant.persisted_prompt("a wood-fired pizza", "Rustic"),
            "a wood-fired pizza"
        );
    }

    #[test]
    fn test_result_mime_types() {
        assert_eq!(Studio::Restaurant.result_mime_type(), "image/jpeg");
        assert_eq!(Studio::RealEstate.result_mime_type(), "image/png");
        assert_eq!(Studio::Beauty.result_mime_type(), "image/png");
    }
}
