use base64::Engine;
use std::env;
use std::fs;
use std::sync::Arc;
use studiogen::{
    Config, GeminiClient, GenerationStorageManager, Studio, StudioSession, UserIdentity,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    studiogen::logger::init_with_config(
        studiogen::logger::LoggerConfig::development(),
    )?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    log::info!("🔍 Checking environment...");

    match env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")) {
        Ok(key) => {
            log::info!("✅ Gemini API key found in environment");
            log::debug!("API key starts with: {}...", &key[..5.min(key.len())]);
        }
        Err(_) => {
            log::error!("❌ No GEMINI_API_KEY set, generation calls will fail");
        }
    }

    let config = Config::from_env();

    log::info!("🔄 Creating Gemini client...");
    let gemini = match GeminiClient::new(config.gemini.unwrap_or_default()) {
        Ok(client) => {
            log::info!("✅ Gemini client initialized successfully");
            Arc::new(client)
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            return Err(e.into());
        }
    };

    let storage = match GenerationStorageManager::new(config.supabase.unwrap_or_default()) {
        Ok(manager) => {
            log::info!("✅ Storage manager initialized");
            Some(Arc::new(manager))
        }
        Err(e) => {
            log::warn!("⚠️  Storage not configured ({}), gallery disabled", e);
            None
        }
    };

    let user = env::var("DEMO_USER_ID").ok().map(|id| {
        let identity = UserIdentity::new(id);
        match env::var("DEMO_USER_EMAIL") {
            Ok(email) => identity.with_email(email),
            Err(_) => identity,
        }
    });

    // Test 1: Prompt enhancement
    log::info!("🪄 Testing prompt enhancement...");

    let mut session = StudioSession::new(Studio::Restaurant, gemini.clone());
    if let Some(storage) = &storage {
        session = session.with_storage(storage.clone());
    }
    if let Some(user) = &user {
        session = session.with_user(user.clone());
    }

    log::info!(
        "🍽️  Available styles: {}",
        studiogen::styles_for(Studio::Restaurant).join(", ")
    );

    session.set_prompt("a rustic wood-fired pizza");
    session.set_style("Studio Lighting");

    session.enhance_prompt().await;
    match session.error() {
        None => log::info!("📝 Enhanced prompt: {}", session.prompt()),
        Some(e) => log::warn!("⚠️  Enhancement failed, keeping original prompt: {}", e),
    }

    // Test 2: Text-to-image generation through the Restaurant studio
    log::info!("🎨 Testing food image generation...");

    session.submit().await;

    match session.preview() {
        Some(asset) => {
            log::info!("✅ Generation successful with {}!", asset.model);
            log::info!("📏 Image data length: {} characters", asset.image_data.len());

            let extension = if asset.mime_type == "image/jpeg" { "jpg" } else { "png" };
            let filename = format!(
                "generated_menu_item_{}.{}",
                chrono::Utc::now().timestamp(),
                extension
            );

            match base64::engine::general_purpose::STANDARD.decode(&asset.image_data) {
                Ok(image_bytes) => match fs::write(&filename, image_bytes) {
                    Ok(_) => log::info!("💾 Image saved to: {}", filename),
                    Err(e) => log::error!("❌ Failed to save image: {}", e),
                },
                Err(e) => log::error!("❌ Failed to decode base64 image: {}", e),
            }
        }
        None => {
            log::error!(
                "❌ Generation failed: {}",
                session.error().unwrap_or("unknown error")
            );
        }
    }

    // Test 3: Gallery fetch
    if let (Some(storage), Some(user)) = (&storage, &user) {
        log::info!("🖼️  Fetching gallery for user {}...", user.id);
        match storage.list(&user.id).await {
            Ok(images) if images.is_empty() => {
                log::info!("📭 Gallery is empty, generate something first")
            }
            Ok(images) => {
                log::info!("✅ Gallery contains {} generations:", images.len());
                for image in images.iter().take(10) {
                    log::info!(
                        "   [{}] {} / {} ({})",
                        image.created_at.format("%Y-%m-%d %H:%M"),
                        image.studio,
                        image.style,
                        image.image_url
                    );
                }
            }
            Err(e) => log::error!("❌ Gallery fetch failed: {}", e),
        }
    } else {
        log::info!("💡 Set SUPABASE_URL, SUPABASE_ANON_KEY and DEMO_USER_ID to exercise the gallery");
    }

    log::info!("🎉 All tests completed!");

    Ok(())
}
