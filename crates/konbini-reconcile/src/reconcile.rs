//! The reconciliation pipeline: parsed lines merged with grounding places.

use konbini_core::{MapsPlace, StoreRecord};

use crate::line::{scan_lines, LineOutcome};
use crate::matching::find_place;

/// Fixed placeholder address for grounding-only fallback records.
pub const FALLBACK_ADDRESS: &str = "See maps listing";

/// Turns one raw model reply plus its grounding places into an ordered store
/// list.
///
/// 1. Parse every `[DATA]` line; malformed lines are dropped individually.
/// 2. Attach the URI and title of the first matching grounding place to each
///    parsed record (first-match, chunk order).
/// 3. When no line parsed but places exist, synthesize one record per place.
///    Synthesized records carry no coordinates: no real coordinate is
///    available for them, so they are unmappable and never rendered as
///    markers.
///
/// Pure and deterministic; insertion order (parse order, or chunk order in
/// the fallback) is preserved.
#[must_use]
pub fn reconcile(raw_text: &str, places: &[MapsPlace], brand: &str) -> Vec<StoreRecord> {
    let mut parsed = Vec::new();
    for outcome in scan_lines(raw_text, brand) {
        match outcome {
            LineOutcome::Parsed(line) => parsed.push(line),
            LineOutcome::Skipped(reason) => {
                tracing::debug!(%reason, "dropping malformed data line");
            }
        }
    }

    if parsed.is_empty() && !places.is_empty() {
        return places
            .iter()
            .map(|place| StoreRecord {
                name: place.title.clone(),
                address: FALLBACK_ADDRESS.to_owned(),
                lat: None,
                lng: None,
                uri: Some(place.uri.clone()),
                title: None,
            })
            .collect();
    }

    parsed
        .into_iter()
        .map(|line| {
            let matched = find_place(&line.name, places);
            StoreRecord {
                name: line.name,
                address: line.address,
                lat: Some(line.lat),
                lng: Some(line.lng),
                uri: matched.map(|p| p.uri.clone()),
                title: matched.map(|p| p.title.clone()),
            }
        })
        .collect()
}
