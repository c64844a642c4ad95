use crate::app_config::{AppConfig, Environment};
use crate::geo::{Coordinates, DEFAULT_CENTER};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "value must be finite".to_string(),
            })
        }
    };

    let gemini_api_key = require("GEMINI_API_KEY")?;

    let env = parse_environment(&or_default("KONBINI_ENV", "development"));
    let bind_addr = parse_addr("KONBINI_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("KONBINI_LOG_LEVEL", "info");

    let gemini_model = or_default("KONBINI_GEMINI_MODEL", "gemini-2.5-flash");
    let gemini_base_url = lookup("KONBINI_GEMINI_BASE_URL").ok();
    let request_timeout_secs = parse_u64("KONBINI_REQUEST_TIMEOUT_SECS", "30")?;

    let search_radius_km = parse_f64("KONBINI_SEARCH_RADIUS_KM", "5")?;
    let brand = or_default("KONBINI_BRAND", "7-Eleven");

    let default_center = Coordinates::new(
        parse_f64("KONBINI_DEFAULT_LAT", &DEFAULT_CENTER.latitude.to_string())?,
        parse_f64("KONBINI_DEFAULT_LNG", &DEFAULT_CENTER.longitude.to_string())?,
    );

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        request_timeout_secs,
        search_radius_km,
        brand,
        default_center,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("GEMINI_API_KEY", "test-api-key");
        m
    }

    #[test]
    fn parse_environment_development() {
        assert_eq!(parse_environment("development"), Environment::Development);
    }

    #[test]
    fn parse_environment_test() {
        assert_eq!(parse_environment("test"), Environment::Test);
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_api_key() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GEMINI_API_KEY"),
            "expected MissingEnvVar(GEMINI_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = full_env();
        map.insert("KONBINI_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KONBINI_BIND_ADDR"),
            "expected InvalidEnvVar(KONBINI_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.gemini_model, "gemini-2.5-flash");
        assert!(cfg.gemini_base_url.is_none());
        assert_eq!(cfg.request_timeout_secs, 30);
        assert!((cfg.search_radius_km - 5.0).abs() < f64::EPSILON);
        assert_eq!(cfg.brand, "7-Eleven");
        assert_eq!(cfg.default_center, DEFAULT_CENTER);
    }

    #[test]
    fn build_app_config_radius_override() {
        let mut map = full_env();
        map.insert("KONBINI_SEARCH_RADIUS_KM", "2.5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!((cfg.search_radius_km - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn build_app_config_radius_invalid() {
        let mut map = full_env();
        map.insert("KONBINI_SEARCH_RADIUS_KM", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KONBINI_SEARCH_RADIUS_KM"),
            "expected InvalidEnvVar(KONBINI_SEARCH_RADIUS_KM), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_non_finite_default_lat() {
        let mut map = full_env();
        map.insert("KONBINI_DEFAULT_LAT", "NaN");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KONBINI_DEFAULT_LAT"),
            "expected InvalidEnvVar(KONBINI_DEFAULT_LAT), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_default_center_override() {
        let mut map = full_env();
        map.insert("KONBINI_DEFAULT_LAT", "1.5");
        map.insert("KONBINI_DEFAULT_LNG", "-2.25");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.default_center, Coordinates::new(1.5, -2.25));
    }

    #[test]
    fn build_app_config_base_url_override() {
        let mut map = full_env();
        map.insert("KONBINI_GEMINI_BASE_URL", "http://127.0.0.1:9999");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.gemini_base_url.as_deref(), Some("http://127.0.0.1:9999"));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("test-api-key"), "api key leaked: {debug}");
        assert!(debug.contains("[redacted]"));
    }
}
