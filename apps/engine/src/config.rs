/// Engine configuration loaded from environment variables.
///
/// The backend API key is deliberately optional: a missing key degrades to
/// `backend_configured() == false` so the shell can show a connectivity
/// badge, and any attempted generation fails with the standard stage error.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    pub fn backend_configured(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}
