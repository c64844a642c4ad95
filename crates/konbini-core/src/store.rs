//! Domain types for store search results.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// Marker token prefixing every structured store line in the model's reply.
///
/// The one bit-exact wire contract in the system: the prompt demands it and
/// the reconciliation parser keys on it. `[DATA] Name | Address | Latitude |
/// Longitude`.
pub const DATA_MARKER: &str = "[DATA]";

/// A single store produced by one search response.
///
/// `lat`/`lng` are present only when parsed from a structured data line.
/// Records lacking either are not mappable: they may still appear in a text
/// listing but are excluded from marker rendering. `uri`/`title` are attached
/// after the fact when a grounding place matches the store name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub uri: Option<String>,
    pub title: Option<String>,
}

impl StoreRecord {
    /// The coordinate pair, when both components are present and finite.
    #[must_use]
    pub fn mappable_coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => {
                let c = Coordinates::new(lat, lng);
                c.is_finite().then_some(c)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_mappable(&self) -> bool {
        self.mappable_coordinates().is_some()
    }
}

/// A place reference from the response's maps grounding metadata.
///
/// Read-only reference data: title plus a canonical maps URI. Never mutated,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapsPlace {
    pub title: String,
    pub uri: String,
}

/// One search response: the raw model text plus the reconciled store list.
///
/// `stores` keeps parse insertion order; callers render in list order, so the
/// order is part of the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub text: String,
    pub stores: Vec<StoreRecord>,
}

impl SearchResult {
    /// The subset of stores with finite coordinates, in list order.
    pub fn mappable(&self) -> impl Iterator<Item = &StoreRecord> {
        self.stores.iter().filter(|s| s.is_mappable())
    }
}
