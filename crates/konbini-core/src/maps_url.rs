//! Google Maps link construction for store listings.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::geo::Coordinates;
use crate::store::StoreRecord;

// Matches JS encodeURIComponent: unreserved marks stay literal.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds the maps link for a store card.
///
/// Preference order:
/// 1. A walking route from `center` when both endpoints have coordinates.
/// 2. The canonical grounding URI attached during reconciliation.
/// 3. A maps text search for the store name and address.
#[must_use]
pub fn directions_url(center: Option<Coordinates>, store: &StoreRecord) -> String {
    if let (Some(origin), Some(dest)) = (center, store.mappable_coordinates()) {
        return format!(
            "https://www.google.com/maps/dir/?api=1&origin={},{}&destination={},{}&travelmode=walking",
            origin.latitude, origin.longitude, dest.latitude, dest.longitude
        );
    }

    if let Some(uri) = &store.uri {
        return uri.clone();
    }

    let query = format!("{} {}", store.name, store.address);
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        utf8_percent_encode(&query, QUERY)
    )
}
