//! Prompt construction.
//!
//! The `[DATA]` line format is the wire contract between the model and the
//! reconciliation parser; the instruction text below must stay in lockstep
//! with the grammar in `konbini-reconcile`.

use konbini_core::{Coordinates, DATA_MARKER};

/// Builds the store-search instruction for one request.
///
/// Demands: (a) restrict to `brand`, (b) restrict to `radius_km` of `center`,
/// (c) one line per store in the exact `[DATA] Name | Address | Latitude |
/// Longitude` pattern, with a literal example line.
#[must_use]
pub fn store_search(brand: &str, radius_km: f64, center: Coordinates) -> String {
    format!(
        "Find all {brand} stores within a {radius_km} km radius of: {lat}, {lng}. \n\
         Focus ONLY on {brand} stores. \n\
         \n\
         IMPORTANT: For EVERY store you list, you MUST strictly include its coordinates \
         in this exact line format so my system can map them:\n\
         {DATA_MARKER} Name | Address | Latitude | Longitude\n\
         \n\
         Example: {DATA_MARKER} {brand} Ginza 7-Chome | 7-7-1 Ginza, Chuo City, Tokyo | 35.6698 | 139.7615",
        lat = center.latitude,
        lng = center.longitude,
    )
}

/// Builds the geocoding instruction; the caller constrains the response to a
/// `{latitude, longitude}` JSON object via the response schema.
#[must_use]
pub fn geocode(query: &str) -> String {
    format!("Return the latitude and longitude of this place as JSON: {query}")
}

/// The response schema for the geocoding call.
#[must_use]
pub fn geocode_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "latitude":  { "type": "NUMBER" },
            "longitude": { "type": "NUMBER" }
        },
        "required": ["latitude", "longitude"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use konbini_core::DEFAULT_CENTER;

    #[test]
    fn store_search_contains_exact_data_line_format() {
        let p = store_search("7-Eleven", 5.0, DEFAULT_CENTER);
        assert!(p.contains("[DATA] Name | Address | Latitude | Longitude"));
    }

    #[test]
    fn store_search_names_brand_center_and_radius() {
        let p = store_search("7-Eleven", 5.0, DEFAULT_CENTER);
        assert!(p.contains("7-Eleven"));
        assert!(p.contains("5 km radius"));
        assert!(p.contains("35.6715, 139.7649"));
    }

    #[test]
    fn store_search_includes_example_line_with_brand() {
        let p = store_search("FamilyMart", 5.0, DEFAULT_CENTER);
        assert!(p.contains("Example: [DATA] FamilyMart Ginza 7-Chome"));
    }

    #[test]
    fn geocode_prompt_embeds_query() {
        assert!(geocode("Tokyo Tower").contains("Tokyo Tower"));
    }

    #[test]
    fn geocode_schema_requires_both_fields() {
        let schema = geocode_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, vec!["latitude", "longitude"]);
    }
}
