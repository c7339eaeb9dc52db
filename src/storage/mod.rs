pub mod supabase;
pub mod traits;

use crate::{
    config::SupabaseConfig,
    error::{Result, StudioError},
    models::{GeneratedImage, NewGeneration, Studio},
};
use base64::Engine;
use std::sync::Arc;

pub use supabase::SupabaseStore;
pub use traits::GenerationStore;

/// Persists generations and serves the gallery. Wraps a store backend and
/// owns the composite upload-then-insert operation.
pub struct GenerationStorageManager {
    backend: Arc<dyn GenerationStore>,
}

impl GenerationStorageManager {
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        Ok(Self {
            backend: Arc::new(SupabaseStore::new(config)?),
        })
    }

    pub fn with_backend(backend: Arc<dyn GenerationStore>) -> Self {
        Self { backend }
    }

    /// Durably stores one generation: decodes the transport payload,
    /// uploads it under an owner-scoped path, then inserts the metadata
    /// row. Returns the public URL only when both steps succeed; an upload
    /// that lands without its metadata row is reported as `MetadataError`,
    /// never as success.
    pub async fn persist(
        &self,
        image_base64: &str,
        mime_type: &str,
        user_id: &str,
        prompt: &str,
        style: &str,
        studio: Studio,
    ) -> Result<String> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(image_base64)
            .map_err(|e| {
                StudioError::StorageError(format!("Failed to decode image payload: {}", e))
            })?;

        let path = storage_path(user_id, mime_type);

        self.backend
            .upload_object(&path, bytes, mime_type)
            .await?;

        let image_url = self.backend.public_url(&path);

        let record = NewGeneration::new(user_id, &image_url, prompt, style, studio);
        self.backend.insert_record(record).await?;

        log::info!("Saved generation for user {} at {}", user_id, path);

        Ok(image_url)
    }

    /// All persisted records for the user, newest first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<GeneratedImage>> {
        self.backend.list_records(user_id).await
    }

    pub async fn health_check(&self) -> Result<bool> {
        self.backend.health_check().await
    }
}

/// Owner-scoped storage path, distinguished by upload instant, with the
/// extension derived from the MIME type.
fn storage_path(user_id: &str, mime_type: &str) -> String {
    format!(
        "{}/{}.{}",
        user_id,
        chrono::Utc::now().timestamp_millis(),
        file_extension(mime_type)
    )
}

fn file_extension(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_STORED_PROMPT_LEN;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockStore {
        fail_upload: bool,
        fail_insert: bool,
        uploads: AtomicUsize,
        inserted: Mutex<Option<NewGeneration>>,
    }

    #[async_trait]
    impl GenerationStore for MockStore {
        async fn upload_object(
            &self,
            _path: &str,
            _bytes: Vec<u8>,
            _mime_type: &str,
        ) -> Result<()> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            if self.fail_upload {
                Err(StudioError::StorageError("bucket unavailable".into()))
            } else {
                Ok(())
            }
        }

        fn public_url(&self, path: &str) -> String {
            format!("https://cdn.test/{}", path)
        }

        async fn insert_record(&self, record: NewGeneration) -> Result<()> {
            if self.fail_insert {
                Err(StudioError::MetadataError("row rejected".into()))
            } else {
                *self.inserted.lock().unwrap() = Some(record);
                Ok(())
            }
        }

        async fn list_records(&self, _user_id: &str) -> Result<Vec<GeneratedImage>> {
            Ok(vec![])
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    fn manager(store: MockStore) -> (GenerationStorageManager, Arc<MockStore>) {
        let store = Arc::new(store);
        (
            GenerationStorageManager::with_backend(store.clone()),
            store,
        )
    }

    const PNG_BASE64: &str = "iVBORw0KGgo=";

    #[tokio::test]
    async fn test_persist_returns_public_url_on_full_success() {
        let (manager, store) = manager(MockStore::default());
        let url = manager
            .persist(PNG_BASE64, "image/png", "user-1", "a prompt", "Modern", Studio::RealEstate)
            .await
            .unwrap();

        assert!(url.starts_with("https://cdn.test/user-1/"));
        assert!(url.ends_with(".png"));

        let record = store.inserted.lock().unwrap().clone().unwrap();
        assert_eq!(record.user_id, "user-1");
        assert_eq!(record.image_url, url);
        assert_eq!(record.style, "Modern");
        assert_eq!(record.studio, Studio::RealEstate);
    }

    #[tokio::test]
    async fn test_upload_failure_skips_metadata_insert() {
        let (manager, store) = manager(MockStore {
            fail_upload: true,
            ..Default::default()
        });
        let result = manager
            .persist(PNG_BASE64, "image/png", "user-1", "p", "Modern", Studio::RealEstate)
            .await;

        assert!(matches!(result, Err(StudioError::StorageError(_))));
        assert!(store.inserted.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_failure_after_upload_is_metadata_error() {
        // Partial success must be a distinguishable failure: the object is
        // uploaded but no URL is returned.
        let (manager, store) = manager(MockStore {
            fail_insert: true,
            ..Default::default()
        });
        let result = manager
            .persist(PNG_BASE64, "image/png", "user-1", "p", "Modern", Studio::RealEstate)
            .await;

        assert_eq!(store.uploads.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(StudioError::MetadataError(_))));
    }

    #[tokio::test]
    async fn test_invalid_base64_is_storage_error_before_upload() {
        let (manager, store) = manager(MockStore::default());
        let result = manager
            .persist("not base64!!", "image/png", "user-1", "p", "Modern", Studio::RealEstate)
            .await;

        assert!(matches!(result, Err(StudioError::StorageError(_))));
        assert_eq!(store.uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_persisted_prompt_is_truncated() {
        let (manager, store) = manager(MockStore::default());
        let long = "p".repeat(MAX_STORED_PROMPT_LEN + 100);
        manager
            .persist(PNG_BASE64, "image/jpeg", "user-1", &long, "Rustic", Studio::Restaurant)
            .await
            .unwrap();

        let record = store.inserted.lock().unwrap().clone().unwrap();
        assert_eq!(record.prompt.chars().count(), MAX_STORED_PROMPT_LEN);
    }

    #[test]
    fn test_storage_path_shape() {
        let path = storage_path("user-1", "image/jpeg");
        assert!(path.starts_with("user-1/"));
        assert!(path.ends_with(".jpg"));

        assert!(storage_path("user-2", "image/png").ends_with(".png"));
    }
}
