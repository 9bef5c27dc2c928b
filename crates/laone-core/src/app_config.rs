use std::path::PathBuf;

use crate::catalog::CategoryRules;

#[derive(Clone)]
pub struct AppConfig {
    pub assortment_path: PathBuf,
    pub stocks_path: PathBuf,
    pub refined_path: PathBuf,
    pub log_level: String,
    pub spreadsheet_title: String,
    pub spreadsheet_locale: String,
    pub category_rules: CategoryRules,
    pub sheets_base_url: String,
    pub sheets_request_timeout_secs: u64,
    pub sheets_access_token: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("assortment_path", &self.assortment_path)
            .field("stocks_path", &self.stocks_path)
            .field("refined_path", &self.refined_path)
            .field("log_level", &self.log_level)
            .field("spreadsheet_title", &self.spreadsheet_title)
            .field("spreadsheet_locale", &self.spreadsheet_locale)
            .field("category_rules", &self.category_rules)
            .field("sheets_base_url", &self.sheets_base_url)
            .field(
                "sheets_request_timeout_secs",
                &self.sheets_request_timeout_secs,
            )
            .field(
                "sheets_access_token",
                &self.sheets_access_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
