use crate::{
    error::{Result, StudioError},
    gemini::GenerationBackend,
    models::{GeneratedAsset, GenerationRequest, InlineImage, Studio, UserIdentity},
    storage::GenerationStorageManager,
};
use base64::Engine;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const STAGING_STYLES: [&str; 6] = [
    "Modern",
    "Luxury",
    "Cozy",
    "Industrial",
    "Minimalist",
    "Bohemian",
];
pub const CLOTHING_STYLES: [&str; 7] = [
    "Casual",
    "Formal",
    "Streetwear",
    "Sports",
    "Evening",
    "Resort",
    "Custom",
];
pub const FOOD_STYLES: [&str; 6] = [
    "Studio Lighting",
    "Dark & Moody",
    "Cafe Setting",
    "Gourmet Plating",
    "Rustic",
    "Vibrant & Colorful",
];
pub const AD_STYLES: [&str; 6] = [
    "Minimalist",
    "Natural",
    "Lush",
    "Geometric",
    "Abstract",
    "Aquatic",
];

/// The selectable style list presented by a studio's form.
pub fn styles_for(studio: Studio) -> &'static [&'static str] {
    match studio {
        Studio::RealEstate => &STAGING_STYLES,
        Studio::Fashion => &CLOTHING_STYLES,
        Studio::Restaurant => &FOOD_STYLES,
        Studio::Beauty => &AD_STYLES,
    }
}

/// Submission lifecycle of one studio view. Enhancing is tracked
/// separately and never blocks these transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Generating,
    Previewing,
    Failed,
}

/// A locally materialized preview of the selected input image. The backing
/// file is released on drop, so replacing the input or tearing down the
/// session never leaks preview resources.
#[derive(Debug)]
pub struct LocalPreview {
    path: PathBuf,
}

impl LocalPreview {
    fn write(bytes: &[u8], extension: &str) -> Result<Self> {
        static NEXT_PREVIEW_ID: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);
        let id = NEXT_PREVIEW_ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "studiogen-preview-{}-{}.{}",
            std::process::id(),
            id,
            extension
        ));
        std::fs::write(&path, bytes)
            .map_err(|e| StudioError::InternalError(format!("Failed to write preview: {}", e)))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LocalPreview {
    fn drop(&mut self) {
        if std::fs::remove_file(&self.path).is_ok() {
            log::debug!("Released preview {}", self.path.display());
        }
    }
}

struct InputImage {
    inline: InlineImage,
    preview: LocalPreview,
}

/// One studio form: holds the selected input, prompt and style, and drives
/// the generate-then-persist flow. All four studios share this controller,
/// parameterized by the `Studio` descriptor.
pub struct StudioSession {
    studio: Studio,
    generator: Arc<dyn GenerationBackend>,
    storage: Option<Arc<GenerationStorageManager>>,
    user: Option<UserIdentity>,
    input: Option<InputImage>,
    prompt: String,
    style: String,
    phase: Phase,
    enhancing: bool,
    error: Option<String>,
    preview: Option<GeneratedAsset>,
}

impl StudioSession {
    pub fn new(studio: Studio, generator: Arc<dyn GenerationBackend>) -> Self {
        Self {
            studio,
            generator,
            storage: None,
            user: None,
            input: None,
            prompt: String::new(),
            style: studio.default_style().to_string(),
            phase: Phase::Idle,
            enhancing: false,
            error: None,
            preview: None,
        }
    }

    pub fn with_storage(mut self, storage: Arc<GenerationStorageManager>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_user(mut self, user: UserIdentity) -> Self {
        self.user = Some(user);
        self
    }

    pub fn studio(&self) -> Studio {
        self.studio
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_generating(&self) -> bool {
        self.phase == Phase::Generating
    }

    pub fn is_enhancing(&self) -> bool {
        self.enhancing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    /// The generated result currently shown, if any.
    pub fn preview(&self) -> Option<&GeneratedAsset> {
        self.preview.as_ref()
    }

    /// Local file backing the input-image preview, if an image is selected.
    pub fn input_preview_path(&self) -> Option<&Path> {
        self.input.as_ref().map(|input| input.preview.path())
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn set_style(&mut self, style: impl Into<String>) {
        self.style = style.into();
    }

    /// Selects a new input image. The previous preview handle is released
    /// before the new one is allocated, and any stale generated result is
    /// cleared.
    pub fn set_input_image(&mut self, bytes: &[u8], mime_type: &str) -> Result<()> {
        let extension = if mime_type == "image/jpeg" { "jpg" } else { "png" };
        // Drop the old handle first so its file is released before the new
        // allocation.
        self.input = None;
        self.preview = None;

        let preview = LocalPreview::write(bytes, extension)?;
        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        self.input = Some(InputImage {
            inline: InlineImage::new(data, mime_type),
            preview,
        });
        Ok(())
    }

    fn effective_style(&self) -> String {
        if self.studio == Studio::Fashion && self.style == "Custom" {
            self.prompt.clone()
        } else {
            self.style.clone()
        }
    }

    /// Validated submit. Missing required fields surface an inline message
    /// without calling the generation backend; a submit while one is
    /// already in flight is ignored. On success the preview is replaced and,
    /// if a user session exists, persistence runs as a detached task whose
    /// outcome never reaches this state machine.
    pub async fn submit(&mut self) {
        if self.is_generating() {
            log::warn!("Submit ignored: a generation is already in flight");
            return;
        }

        if let Err(message) =
            self.studio
                .validate(self.input.is_some(), &self.prompt, &self.style)
        {
            self.error = Some(message.to_string());
            return;
        }

        self.phase = Phase::Generating;
        self.error = None;
        self.preview = None;

        let request = GenerationRequest {
            studio: self.studio,
            prompt: self.prompt.clone(),
            style: self.effective_style(),
            image: self.input.as_ref().map(|input| input.inline.clone()),
        };

        match self.generator.generate(request).await {
            Ok(asset) => {
                self.preview = Some(asset.clone());
                self.phase = Phase::Previewing;
                self.persist_in_background(asset);
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.phase = Phase::Failed;
            }
        }
    }

    /// Refines the current prompt through the enhancement endpoint. Failure
    /// is recorded but non-fatal; the original prompt stays in place.
    pub async fn enhance_prompt(&mut self) {
        if self.prompt.trim().is_empty() {
            return;
        }
        self.enhancing = true;
        self.error = None;

        match self.generator.enhance(&self.prompt).await {
            Ok(enhanced) => self.prompt = enhanced,
            Err(e) => self.error = Some(e.to_string()),
        }

        self.enhancing = false;
    }

    /// Fire-and-forget persistence. Failure is logged and swallowed:
    /// generation success is the user-visible contract, the gallery row is
    /// best-effort.
    fn persist_in_background(&self, asset: GeneratedAsset) {
        let (storage, user) = match (&self.storage, &self.user) {
            (Some(storage), Some(user)) => (storage.clone(), user.clone()),
            _ => return,
        };

        let studio = self.studio;
        let prompt = self
            .studio
            .persisted_prompt(&self.prompt, &self.effective_style());
        let style = self.style.clone();

        tokio::spawn(async move {
            if let Err(e) = storage
                .persist(
                    &asset.image_data,
                    &asset.mime_type,
                    &user.id,
                    &prompt,
                    &style,
                    studio,
                )
                .await
            {
                log::error!("Failed to save image to gallery: {}", e);
            }
        });
    }
}
