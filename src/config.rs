use std::env;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            base_url: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok();
        let base_url = env::var("GEMINI_BASE_URL").ok();

        GeminiConfig { api_key, base_url }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub bucket: String,
    pub table: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        SupabaseConfig {
            url: None,
            api_key: None,
            bucket: "generations".to_string(),
            table: "generations".to_string(),
        }
    }
}

impl SupabaseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let url = env::var("SUPABASE_URL").ok();
        let api_key = env::var("SUPABASE_ANON_KEY").ok();

        SupabaseConfig {
            url,
            api_key,
            ..Default::default()
        }
    }

    pub fn with_credentials(mut self, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: Option<GeminiConfig>,
    pub supabase: Option<SupabaseConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini: None,
            supabase: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Config {
            gemini: Some(GeminiConfig::from_env()),
            supabase: Some(SupabaseConfig::from_env()),
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = Some(config);
        self
    }

    pub fn with_supabase(mut self, config: SupabaseConfig) -> Self {
        self.supabase = Some(config);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_config_builder() {
        let config = GeminiConfig::new().with_api_key("test-key");
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_supabase_config_defaults() {
        let config = SupabaseConfig::new();
        assert_eq!(config.bucket, "generations");
        assert_eq!(config.table, "generations");
        assert!(config.url.is_none());
    }

    #[test]
    fn test_supabase_config_builder() {
        let config = SupabaseConfig::new()
            .with_credentials("https://example.supabase.co", "anon-key")
            .with_bucket("uploads");
        assert_eq!(config.url.as_deref(), Some("https://example.supabase.co"));
        assert_eq!(config.bucket, "uploads");
        // Table keeps its default unless overridden.
        assert_eq!(config.table, "generations");
    }
}
