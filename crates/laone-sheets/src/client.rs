//! HTTP client for the Google Sheets v4 REST API.
//!
//! Wraps `reqwest` with bearer-token auth, Google error-envelope decoding and
//! typed request/response bodies. The client is an explicit value: build it
//! once and pass it by reference to whatever publishes.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SheetsError;
use crate::types::{
    ApiErrorEnvelope, BatchUpdateRequest, BatchUpdateResponse, BatchUpdateValuesRequest,
    BatchUpdateValuesResponse, CreateSpreadsheetRequest, CreateSpreadsheetResponse, Request,
    SpreadsheetProperties, ValueRange,
};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/";

/// Error bodies longer than this are truncated in [`SheetsError::Api`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Client for the Google Sheets REST API.
///
/// Use [`SheetsClient::new`] for production or [`SheetsClient::with_base_url`]
/// to point at a mock server in tests.
pub struct SheetsClient {
    client: Client,
    access_token: String,
    base_url: Url,
}

impl SheetsClient {
    /// Creates a new client pointed at the production Sheets API.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(access_token: &str, timeout_secs: u64) -> Result<Self, SheetsError> {
        Self::with_base_url(access_token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SheetsError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("laone/0.1 (catalog-publisher)")
            .build()?;

        // Exactly one trailing slash, so relative joins append instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SheetsError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url,
        })
    }

    /// Creates an empty spreadsheet and returns its id.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Api`] on a non-2xx response.
    /// - [`SheetsError::Http`] on network failure.
    /// - [`SheetsError::Deserialize`] if the response lacks `spreadsheetId`.
    pub async fn create_spreadsheet(&self, title: &str, locale: &str) -> Result<String, SheetsError> {
        let mut url = self.endpoint("spreadsheets")?;
        url.query_pairs_mut().append_pair("fields", "spreadsheetId");

        let body = CreateSpreadsheetRequest {
            properties: SpreadsheetProperties { title, locale },
        };
        let created: CreateSpreadsheetResponse = self
            .post_json(url, &body, &format!("create spreadsheet \"{title}\""))
            .await?;
        Ok(created.spreadsheet_id)
    }

    /// Applies structural and formatting requests to a spreadsheet.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Api`] on a non-2xx response.
    /// - [`SheetsError::Http`] on network failure.
    /// - [`SheetsError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: &[Request],
    ) -> Result<BatchUpdateResponse, SheetsError> {
        let url = self.endpoint(&format!("spreadsheets/{spreadsheet_id}:batchUpdate"))?;
        let body = BatchUpdateRequest { requests };
        self.post_json(
            url,
            &body,
            &format!("batchUpdate({} requests)", requests.len()),
        )
        .await
    }

    /// Writes cell values with `USER_ENTERED` semantics, so formulas such as
    /// `=IMAGE(...)` are evaluated. Returns the number of updated cells.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Api`] on a non-2xx response.
    /// - [`SheetsError::Http`] on network failure.
    /// - [`SheetsError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn batch_update_values(
        &self,
        spreadsheet_id: &str,
        data: &[ValueRange],
    ) -> Result<u64, SheetsError> {
        let url = self.endpoint(&format!("spreadsheets/{spreadsheet_id}/values:batchUpdate"))?;
        let body = BatchUpdateValuesRequest {
            value_input_option: "USER_ENTERED",
            data,
        };
        let response: BatchUpdateValuesResponse = self
            .post_json(url, &body, &format!("values batchUpdate({} ranges)", data.len()))
            .await?;
        Ok(response.total_updated_cells)
    }

    /// Resolves `path` against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, SheetsError> {
        self.base_url
            .join(path)
            .map_err(|e| SheetsError::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    /// POSTs `body` as JSON and decodes a 2xx response into `R`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Api`] for non-2xx statuses, using the Google
    /// error message when the body carries one.
    async fn post_json<B, R>(&self, url: Url, body: &B, context: &str) -> Result<R, SheetsError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SheetsError::Api {
                status: status.as_u16(),
                context: context.to_owned(),
                message: api_error_message(&text),
            });
        }

        serde_json::from_str(&text).map_err(|source| SheetsError::Deserialize {
            context: context.to_owned(),
            source,
        })
    }
}

/// Extracts the human-readable message from a Google error body, falling back
/// to the (truncated) raw body.
fn api_error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        return match envelope.error.status {
            Some(status) => format!("{status}: {}", envelope.error.message),
            None => envelope.error.message,
        };
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_owned();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
