use std::path::PathBuf;
use std::time::Duration;

use crate::app_config::{AppConfig, SettleDelays};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// config with the stock timings.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_millis = |var: &str, default: &str| -> Result<Duration, ConfigError> {
        parse_u64(var, default).map(Duration::from_millis)
    };

    let log_level = or_default("MAPSCRAPE_LOG_LEVEL", "info");
    let search_url = or_default("MAPSCRAPE_SEARCH_URL", "https://www.google.com/maps");
    let input_path = PathBuf::from(or_default("MAPSCRAPE_INPUT_PATH", "input.txt"));
    let output_dir = PathBuf::from(or_default("MAPSCRAPE_OUTPUT_DIR", "saida"));

    let nav_timeout_secs = parse_u64("MAPSCRAPE_NAV_TIMEOUT_SECS", "60")?;

    let settle = SettleDelays {
        navigation: parse_millis("MAPSCRAPE_SETTLE_NAVIGATION_MS", "5000")?,
        query_fill: parse_millis("MAPSCRAPE_SETTLE_QUERY_FILL_MS", "3000")?,
        query_submit: parse_millis("MAPSCRAPE_SETTLE_QUERY_SUBMIT_MS", "5000")?,
        scroll: parse_millis("MAPSCRAPE_SETTLE_SCROLL_MS", "3000")?,
        detail: parse_millis("MAPSCRAPE_SETTLE_DETAIL_MS", "5000")?,
    };

    let scroll_step_raw = or_default("MAPSCRAPE_SCROLL_STEP_PX", "10000");
    let scroll_step_px = scroll_step_raw
        .parse::<f64>()
        .map_err(|e| invalid("MAPSCRAPE_SCROLL_STEP_PX", e.to_string()))?;
    if !scroll_step_px.is_finite() || scroll_step_px <= 0.0 {
        return Err(invalid(
            "MAPSCRAPE_SCROLL_STEP_PX",
            format!("must be a positive number, got {scroll_step_raw}"),
        ));
    }

    let headless = parse_bool("MAPSCRAPE_HEADLESS", &or_default("MAPSCRAPE_HEADLESS", "false"))?;
    let chrome_path = lookup("MAPSCRAPE_CHROME_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        search_url,
        input_path,
        output_dir,
        nav_timeout_secs,
        settle,
        scroll_step_px,
        headless,
        chrome_path,
    })
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got {other}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
