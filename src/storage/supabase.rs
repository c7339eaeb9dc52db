use crate::{
    config::SupabaseConfig,
    error::{Result, StudioError},
    models::{GeneratedImage, NewGeneration},
    storage::traits::GenerationStore,
};
use async_trait::async_trait;
use reqwest::Client;

/// Supabase-backed store: object uploads go to the storage API, metadata
/// rows to the PostgREST surface. Both are plain REST calls authenticated
/// with the project's anon key.
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
    table: String,
}

impl SupabaseStore {
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let base_url = config
            .url
            .ok_or_else(|| StudioError::ConfigError("Supabase URL is required".into()))?;
        let api_key = config
            .api_key
            .ok_or_else(|| StudioError::ConfigError("Supabase API key is required".into()))?;

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            bucket: config.bucket,
            table: config.table,
        })
    }

    fn build_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("apikey", self.api_key.parse().unwrap());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", self.api_key).parse().unwrap(),
        );
        headers
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    // PostgREST filter set for the gallery read path: rows owned by the
    // requesting user, newest first.
    fn list_query(user_id: &str) -> Vec<(String, String)> {
        vec![
            ("select".to_string(), "*".to_string()),
            ("user_id".to_string(), format!("eq.{}", user_id)),
            ("order".to_string(), "created_at.desc".to_string()),
        ]
    }
}

#[async_trait]
impl GenerationStore for SupabaseStore {
    async fn upload_object(&self, path: &str, bytes: Vec<u8>, mime_type: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.object_url(path))
            .headers(self.build_headers())
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                StudioError::StorageError(format!("Failed to upload image to storage: {}", e))
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(StudioError::StorageError(format!(
                "Failed to upload image to storage: {}",
                error_text
            )))
        }
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }

    async fn insert_record(&self, record: NewGeneration) -> Result<()> {
        let response = self
            .client
            .post(&self.table_url())
            .headers(self.build_headers())
            .header("Prefer", "return=minimal")
            .json(&record)
            .send()
            .await
            .map_err(|e| {
                StudioError::MetadataError(format!("Failed to save generation metadata: {}", e))
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(StudioError::MetadataError(format!(
                "Failed to save generation metadata: {}",
                error_text
            )))
        }
    }

    async fn list_records(&self, user_id: &str) -> Result<Vec<GeneratedImage>> {
        let response = self
            .client
            .get(&self.table_url())
            .headers(self.build_headers())
            .query(&Self::list_query(user_id))
            .send()
            .await
            .map_err(|e| {
                StudioError::FetchError(format!("Failed to fetch generations: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StudioError::FetchError(format!(
                "Failed to fetch generations: {}",
                error_text
            )));
        }

        response.json().await.map_err(|e| {
            StudioError::FetchError(format!("Failed to parse generations response: {}", e))
        })
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(&self.table_url())
            .headers(self.build_headers())
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await
            .map_err(|_| StudioError::InternalError("Health check failed".into()))?;

        Ok(response.status().is_success())
    }
}
