/// Application configuration, assembled from environment variables.
///
/// Passed explicitly into the client and retriever at construction; nothing
/// reads ambient state after startup.
#[derive(Clone)]
pub struct AppConfig {
    /// Primary API key (`NASA_API_KEY`).
    pub api_key: String,
    /// Base URL for the primary APOD endpoint.
    pub api_url: String,
    /// URL of the static fallback dataset (a single JSON array).
    pub fallback_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[redacted]")
            .field("api_url", &self.api_url)
            .field("fallback_url", &self.fallback_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
