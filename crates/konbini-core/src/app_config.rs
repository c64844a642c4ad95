use std::net::SocketAddr;

use crate::geo::Coordinates;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Override for the Gemini API origin; `None` means the production host.
    pub gemini_base_url: Option<String>,
    pub request_timeout_secs: u64,
    pub search_radius_km: f64,
    /// The franchise brand every search is restricted to.
    pub brand: String,
    /// Center used when a search supplies neither coordinates nor an address.
    pub default_center: Coordinates,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("gemini_api_key", &"[redacted]")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("search_radius_km", &self.search_radius_km)
            .field("brand", &self.brand)
            .field("default_center", &self.default_center)
            .finish()
    }
}
