//! GeoJSON projection for the map sink.
//!
//! The map widget consumes a center point plus a FeatureCollection of pins;
//! this module builds the collection from the mappable subset of a result,
//! in list order.

use crate::geo::{haversine_km, Coordinates};
use crate::store::StoreRecord;

/// One point feature per mappable store. Grounding-only fallback records have
/// no coordinates and are never emitted. Each feature carries the name,
/// address, optional grounding URI, and the distance from `center` in km.
#[must_use]
pub fn pins_feature_collection(center: Coordinates, stores: &[StoreRecord]) -> serde_json::Value {
    let features: Vec<serde_json::Value> = stores
        .iter()
        .filter_map(|store| {
            let coords = store.mappable_coordinates()?;
            Some(serde_json::json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [coords.longitude, coords.latitude]
                },
                "properties": {
                    "name": store.name,
                    "address": store.address,
                    "uri": store.uri,
                    "distance_km": haversine_km(center, coords)
                }
            }))
        })
        .collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(name: &str, lat: Option<f64>, lng: Option<f64>) -> StoreRecord {
        StoreRecord {
            name: name.to_owned(),
            address: "addr".to_owned(),
            lat,
            lng,
            uri: None,
            title: None,
        }
    }

    #[test]
    fn collection_contains_only_mappable_stores() {
        let center = Coordinates::new(35.6715, 139.7649);
        let stores = vec![
            store("Mapped", Some(35.6698), Some(139.7615)),
            store("Fallback only", None, None),
        ];

        let collection = pins_feature_collection(center, &stores);
        let features = collection["features"].as_array().expect("features array");
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["properties"]["name"], "Mapped");
        // GeoJSON positions are [lng, lat].
        assert!(
            (features[0]["geometry"]["coordinates"][0].as_f64().unwrap() - 139.7615).abs() < 1e-9
        );
        assert!(
            (features[0]["geometry"]["coordinates"][1].as_f64().unwrap() - 35.6698).abs() < 1e-9
        );
    }

    #[test]
    fn features_keep_list_order() {
        let center = Coordinates::new(0.0, 0.0);
        let stores = vec![
            store("First", Some(1.0), Some(1.0)),
            store("Second", Some(2.0), Some(2.0)),
        ];
        let collection = pins_feature_collection(center, &stores);
        let names: Vec<&str> = collection["features"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["properties"]["name"].as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn distance_is_zero_at_center() {
        let center = Coordinates::new(35.6715, 139.7649);
        let stores = vec![store("Here", Some(35.6715), Some(139.7649))];
        let collection = pins_feature_collection(center, &stores);
        let d = collection["features"][0]["properties"]["distance_km"]
            .as_f64()
            .expect("distance");
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn empty_input_yields_empty_feature_collection() {
        let collection = pins_feature_collection(Coordinates::new(0.0, 0.0), &[]);
        assert_eq!(collection["type"], "FeatureCollection");
        assert!(collection["features"].as_array().unwrap().is_empty());
    }
}
