use crate::app_config::AppConfig;
use crate::catalog::CategoryRules;
use crate::ConfigError;

/// Default root of the Google Sheets v4 REST API.
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
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
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup instead of `set_var`/`remove_var`.
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
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "value must not be empty".to_string(),
            });
        }
        Ok(raw)
    };

    let assortment_path = PathBuf::from(or_default(
        "LAONE_ASSORTMENT_PATH",
        "./data/assortment.json",
    ));
    let stocks_path = PathBuf::from(or_default("LAONE_STOCKS_PATH", "./data/stocks.json"));
    let refined_path = PathBuf::from(or_default("LAONE_REFINED_PATH", "./data/refined.json"));
    let log_level = or_default("LAONE_LOG_LEVEL", "info");

    let spreadsheet_title = non_empty("LAONE_SPREADSHEET_TITLE", "LaOne")?;
    let spreadsheet_locale = non_empty("LAONE_SPREADSHEET_LOCALE", "en_US")?;

    let split_category = non_empty(
        "LAONE_SPLIT_CATEGORY",
        CategoryRules::DEFAULT_SPLIT_CATEGORY,
    )?;
    let grouped_category = non_empty(
        "LAONE_GROUPED_CATEGORY",
        CategoryRules::DEFAULT_GROUPED_CATEGORY,
    )?;
    if split_category == grouped_category {
        return Err(ConfigError::InvalidEnvVar {
            var: "LAONE_GROUPED_CATEGORY".to_string(),
            reason: format!(
                "grouped category must differ from the split category (both are \"{split_category}\")"
            ),
        });
    }

    let sheets_base_url = or_default("LAONE_SHEETS_BASE_URL", DEFAULT_SHEETS_BASE_URL);
    let sheets_request_timeout_secs = parse_u64("LAONE_SHEETS_REQUEST_TIMEOUT_SECS", "30")?;
    let sheets_access_token = lookup("GOOGLE_SHEETS_ACCESS_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());

    Ok(AppConfig {
        assortment_path,
        stocks_path,
        refined_path,
        log_level,
        spreadsheet_title,
        spreadsheet_locale,
        category_rules: CategoryRules::new(split_category, grouped_category),
        sheets_base_url,
        sheets_request_timeout_secs,
        sheets_access_token,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
