use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use konbini_core::{Coordinates, MapsPlace};

use crate::error::GeminiError;
use crate::prompt;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// The raw outcome of one store search: verbatim response text plus the maps
/// grounding places, both possibly empty. Reconciliation happens downstream.
#[derive(Debug, Clone)]
pub struct RawSearchResponse {
    pub text: String,
    pub places: Vec<MapsPlace>,
}

/// Client for the Gemini `generateContent` REST API.
///
/// Manages the HTTP client, API key, model name, and base URL. Use
/// [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`] to
/// point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    model: String,
}

impl GeminiClient {
    /// Creates a new client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeminiError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("konbini/0.1 (store-finder)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends the model path instead of replacing the last
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeminiError::Api {
            status: 0,
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            model: model.to_owned(),
        })
    }

    /// Asks the model for `brand` stores within `radius_km` of `center`, with
    /// the maps grounding tool biased around the same point.
    ///
    /// Returns the response text verbatim (possibly empty) and the grounding
    /// places (possibly empty); neither emptiness is a failure on its own.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::InvalidApiKey`] when the API rejects the credential.
    /// - [`GeminiError::EmptyResponse`] when the response carries no
    ///   candidates at all.
    /// - [`GeminiError::Http`] / [`GeminiError::Api`] /
    ///   [`GeminiError::Deserialize`] on transport, envelope, or shape errors.
    pub async fn find_nearby_stores(
        &self,
        center: Coordinates,
        brand: &str,
        radius_km: f64,
    ) -> Result<RawSearchResponse, GeminiError> {
        let request = GenerateContentRequest::from_text(&prompt::store_search(
            brand, radius_km, center,
        ))
        .with_maps_grounding(center);

        let response = self.generate(&request, "find_nearby_stores").await?;
        if response.candidates.is_empty() {
            return Err(GeminiError::EmptyResponse);
        }

        let raw = RawSearchResponse {
            text: response.text(),
            places: response.maps_places(),
        };
        tracing::debug!(
            text_len = raw.text.len(),
            places = raw.places.len(),
            "store search response received"
        );
        Ok(raw)
    }

    /// Resolves a free-text place description to coordinates via a
    /// structured-output call.
    ///
    /// Returns `Ok(None)`, meaning "not found", whenever the constrained response
    /// cannot be read as a finite `{latitude, longitude}` object. Only
    /// transport and credential failures surface as errors.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::InvalidApiKey`] when the API rejects the credential.
    /// - [`GeminiError::Http`] / [`GeminiError::Api`] on transport or
    ///   envelope errors.
    pub async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, GeminiError> {
        let request = GenerateContentRequest::from_text(&prompt::geocode(query))
            .with_json_response(prompt::geocode_schema());

        let response = self.generate(&request, "geocode").await?;
        Ok(parse_geocode_reply(&response.text()))
    }

    /// Sends one `generateContent` request and parses the response body.
    async fn generate(
        &self,
        request: &GenerateContentRequest,
        context: &str,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = self.endpoint_url()?;
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(classify_api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    fn endpoint_url(&self) -> Result<Url, GeminiError> {
        self.base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| GeminiError::Api {
                status: 0,
                message: format!("invalid model name '{}': {e}", self.model),
            })
    }
}

/// Classifies a non-2xx response: credential rejections become
/// [`GeminiError::InvalidApiKey`]; everything else keeps the envelope message.
fn classify_api_error(status: StatusCode, body: &str) -> GeminiError {
    if body.contains("API_KEY_INVALID") {
        return GeminiError::InvalidApiKey;
    }

    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| body.trim().to_owned());

    GeminiError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Reads the structured geocode reply. Missing fields, malformed JSON, or
/// non-finite numbers all mean "not found".
fn parse_geocode_reply(text: &str) -> Option<Coordinates> {
    let value: serde_json::Value = serde_json::from_str(text.trim()).ok()?;
    let latitude = value.get("latitude")?.as_f64()?;
    let longitude = value.get("longitude")?.as_f64()?;
    let coords = Coordinates::new(latitude, longitude);
    coords.is_finite().then_some(coords)
}
