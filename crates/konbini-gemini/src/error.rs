use thiserror::Error;

/// Errors returned by the Gemini API client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the configured credential (`API_KEY_INVALID`).
    #[error("Gemini API key is invalid; check the GEMINI_API_KEY environment variable")]
    InvalidApiKey,

    /// The response carried no candidates at all, so there is nothing to parse.
    #[error("received an empty response from Gemini")]
    EmptyResponse,

    /// The API returned an error envelope that is not a credential failure.
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
