pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod storage;
pub mod studio;

pub use config::{Config, GeminiConfig, SupabaseConfig};
pub use error::{Result, StudioError};
pub use gemini::{GeminiClient, GenerationBackend, ImageClient, TextClient};
pub use models::{
    GeneratedAsset, GeneratedImage, GenerationRequest, InlineImage, NewGeneration, Studio,
    UserIdentity, MAX_STORED_PROMPT_LEN,
};
pub use storage::{GenerationStorageManager, GenerationStore, SupabaseStore};
pub use studio::{styles_for, Phase, StudioSession};
