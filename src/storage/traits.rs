use crate::{
    error::Result,
    models::{GeneratedImage, NewGeneration},
};
use async_trait::async_trait;

/// Backend contract for the content store and the metadata table. The two
/// halves fail with distinct error variants so callers can tell an upload
/// failure from a metadata-insert failure.
#[async_trait]
pub trait GenerationStore: Send + Sync {
    /// Uploads a binary object under the given path. Fails with `StorageError`.
    async fn upload_object(&self, path: &str, bytes: Vec<u8>, mime_type: &str) -> Result<()>;

    /// Resolves the publicly fetchable URL for an uploaded path.
    fn public_url(&self, path: &str) -> String;

    /// Inserts one metadata row. Fails with `MetadataError`.
    async fn insert_record(&self, record: NewGeneration) -> Result<()>;

    /// Lists all records owned by the user, newest first. Fails with
    /// `FetchError`; an empty list is a valid result.
    async fn list_records(&self, user_id: &str) -> Result<Vec<GeneratedImage>>;

    async fn health_check(&self) -> Result<bool>;
}
