//! Rendering of search results for the terminal and for map sinks.

use std::fmt::Write as _;

use clap::ValueEnum;

use konbini_core::geojson::pins_feature_collection;
use konbini_core::maps_url::directions_url;
use konbini_core::{haversine_km, Coordinates, SearchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing with distances and maps links.
    Table,
    /// The full result (center, raw text, stores) as JSON.
    Json,
    /// Mappable stores as a GeoJSON FeatureCollection.
    Geojson,
}

/// Renders a completed search in the requested format.
///
/// # Errors
///
/// Returns an error only when JSON serialization fails.
pub fn render(
    format: OutputFormat,
    center: Coordinates,
    result: &SearchResult,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(center, result)),
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "center": center,
                "text": result.text,
                "stores": result.stores,
            });
            Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
        }
        OutputFormat::Geojson => {
            let collection = pins_feature_collection(center, &result.stores);
            Ok(format!("{}\n", serde_json::to_string_pretty(&collection)?))
        }
    }
}

fn render_table(center: Coordinates, result: &SearchResult) -> String {
    let mut out = String::new();

    if result.stores.is_empty() {
        let _ = writeln!(out, "No stores found near {center}.");
        return out;
    }

    let _ = writeln!(
        out,
        "Found {} store(s) near {center}\n",
        result.stores.len()
    );

    for (idx, store) in result.stores.iter().enumerate() {
        match store.mappable_coordinates() {
            Some(coords) => {
                let _ = writeln!(
                    out,
                    "{:>3}. {} ({:.1} km)",
                    idx + 1,
                    store.name,
                    haversine_km(center, coords)
                );
            }
            None => {
                let _ = writeln!(out, "{:>3}. {} (distance unknown)", idx + 1, store.name);
            }
        }
        let _ = writeln!(out, "     {}", store.address);
        let _ = writeln!(out, "     {}", directions_url(Some(center), store));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use konbini_core::StoreRecord;

    fn result_with_stores(stores: Vec<StoreRecord>) -> SearchResult {
        SearchResult {
            text: "raw".to_owned(),
            stores,
        }
    }

    fn store(name: &str, lat: Option<f64>, lng: Option<f64>, uri: Option<&str>) -> StoreRecord {
        StoreRecord {
            name: name.to_owned(),
            address: "1 Main St".to_owned(),
            lat,
            lng,
            uri: uri.map(ToOwned::to_owned),
            title: None,
        }
    }

    const CENTER: Coordinates = Coordinates {
        latitude: 35.6715,
        longitude: 139.7649,
    };

    #[test]
    fn table_lists_stores_in_order_with_distance() {
        let result = result_with_stores(vec![
            store("7-Eleven Ginza", Some(35.6698), Some(139.7615), None),
            store("7-Eleven Shimbashi", None, None, Some("https://maps.google.com/?cid=2")),
        ]);
        let out = render(OutputFormat::Table, CENTER, &result).expect("render");

        assert!(out.contains("Found 2 store(s)"));
        let ginza = out.find("7-Eleven Ginza").expect("first store listed");
        let shimbashi = out.find("7-Eleven Shimbashi").expect("second store listed");
        assert!(ginza < shimbashi, "list order preserved");
        assert!(out.contains("km)"), "mappable store shows a distance");
        assert!(out.contains("(distance unknown)"));
        assert!(out.contains("https://maps.google.com/?cid=2"));
    }

    #[test]
    fn table_empty_result_is_a_friendly_message() {
        let out = render(OutputFormat::Table, CENTER, &result_with_stores(vec![]))
            .expect("render");
        assert!(out.contains("No stores found"));
    }

    #[test]
    fn json_format_carries_center_text_and_stores() {
        let result = result_with_stores(vec![store("A", Some(1.0), Some(2.0), None)]);
        let out = render(OutputFormat::Json, CENTER, &result).expect("render");
        let doc: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(doc["text"], "raw");
        assert_eq!(doc["stores"][0]["name"], "A");
        assert!((doc["center"]["latitude"].as_f64().unwrap() - 35.6715).abs() < 1e-9);
    }

    #[test]
    fn geojson_format_emits_only_mappable_pins() {
        let result = result_with_stores(vec![
            store("Mapped", Some(35.0), Some(139.0), None),
            store("Unmapped", None, None, None),
        ]);
        let out = render(OutputFormat::Geojson, CENTER, &result).expect("render");
        let doc: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(doc["type"], "FeatureCollection");
        assert_eq!(doc["features"].as_array().map(Vec::len), Some(1));
    }
}
