mod app_config;
mod config;
pub mod geo;
pub mod geojson;
pub mod maps_url;
pub mod store;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{haversine_km, Coordinates, DEFAULT_CENTER};
pub use store::{MapsPlace, SearchResult, StoreRecord, DATA_MARKER};

use thiserror::Error;

/// Errors raised while loading application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
