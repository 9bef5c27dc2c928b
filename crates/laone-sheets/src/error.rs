use thiserror::Error;

/// Errors returned by the Google Sheets client and publisher.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Sheets API error {status} during {context}: {message}")]
    Api {
        status: u16,
        context: String,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A batch update succeeded but lacked the reply the caller needs.
    #[error("missing reply in {context}")]
    MissingReply { context: String },

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
