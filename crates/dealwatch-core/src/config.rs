use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_LISTING_URL: &str = "https://www.dealabs.com/groupe/lego";
const DEFAULT_STORE_PATH: &str = "DEALS.json";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("DEALWATCH_LOG_LEVEL", "info");
    let store_path = PathBuf::from(or_default("DEALWATCH_STORE_PATH", DEFAULT_STORE_PATH));
    let listing_url = or_default("DEALWATCH_LISTING_URL", DEFAULT_LISTING_URL);
    let request_timeout_secs = parse_u64("DEALWATCH_REQUEST_TIMEOUT_SECS", "30")?;

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DEALWATCH_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        store_path,
        listing_url,
        request_timeout_secs,
    })
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

    #[test]
    fn build_app_config_uses_defaults_for_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.store_path.to_str(), Some("DEALS.json"));
        assert_eq!(cfg.listing_url, "https://www.dealabs.com/groupe/lego");
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn build_app_config_store_path_override() {
        let mut map = HashMap::new();
        map.insert("DEALWATCH_STORE_PATH", "/var/lib/dealwatch/deals.json");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.store_path.to_str(),
            Some("/var/lib/dealwatch/deals.json")
        );
    }

    #[test]
    fn build_app_config_listing_url_override() {
        let mut map = HashMap::new();
        map.insert("DEALWATCH_LISTING_URL", "https://www.dealabs.com/bons-plans");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.listing_url, "https://www.dealabs.com/bons-plans");
    }

    #[test]
    fn build_app_config_log_level_override() {
        let mut map = HashMap::new();
        map.insert("DEALWATCH_LOG_LEVEL", "debug");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn build_app_config_request_timeout_override() {
        let mut map = HashMap::new();
        map.insert("DEALWATCH_REQUEST_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 60);
    }

    #[test]
    fn build_app_config_request_timeout_invalid() {
        let mut map = HashMap::new();
        map.insert("DEALWATCH_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DEALWATCH_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(DEALWATCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_request_timeout_zero_rejected() {
        let mut map = HashMap::new();
        map.insert("DEALWATCH_REQUEST_TIMEOUT_SECS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref reason, .. }) if reason.contains("greater than zero")),
            "expected InvalidEnvVar for zero timeout, got: {result:?}"
        );
    }
}
