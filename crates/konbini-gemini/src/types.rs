//! Gemini `generateContent` wire types.
//!
//! Request structs serialize to the camelCase JSON the REST API expects;
//! response structs use `#[serde(default)]` throughout because the API omits
//! any member it has nothing to say about (no parts, no grounding metadata).

use serde::{Deserialize, Serialize};

use konbini_core::{Coordinates, MapsPlace};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A plain single-turn text request with no tools.
    #[must_use]
    pub fn from_text(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_owned(),
                }],
            }],
            tools: None,
            tool_config: None,
            generation_config: None,
        }
    }

    /// Attaches the Google Maps grounding tool, biased around `center`.
    #[must_use]
    pub fn with_maps_grounding(mut self, center: Coordinates) -> Self {
        self.tools = Some(vec![Tool {
            google_maps: GoogleMapsTool {},
        }]);
        self.tool_config = Some(ToolConfig {
            retrieval_config: RetrievalConfig { lat_lng: center },
        });
        self
    }

    /// Constrains the response to a JSON document matching `schema`.
    #[must_use]
    pub fn with_json_response(mut self, schema: serde_json::Value) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: "application/json".to_owned(),
            response_schema: schema,
        });
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct Tool {
    #[serde(rename = "googleMaps")]
    pub google_maps: GoogleMapsTool,
}

/// Serializes as the empty object the tool declaration requires.
#[derive(Debug, Serialize)]
pub struct GoogleMapsTool {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    pub lat_lng: Coordinates,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One grounding chunk. Only the `maps` variant matters here; chunks grounded
/// on other sources deserialize with `maps: None` and are ignored.
#[derive(Debug, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub maps: Option<MapsSource>,
}

#[derive(Debug, Deserialize)]
pub struct MapsSource {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts; empty when the
    /// response has no candidates or no text parts. Empty text is not an
    /// error at this layer.
    #[must_use]
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Maps places from the first candidate's grounding metadata, in chunk
    /// order. Chunks without a complete `maps` payload are skipped.
    #[must_use]
    pub fn maps_places(&self) -> Vec<MapsPlace> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| {
                        let maps = chunk.maps.as_ref()?;
                        Some(MapsPlace {
                            title: maps.title.clone()?,
                            uri: maps.uri.clone()?,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
