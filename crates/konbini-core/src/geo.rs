//! Coordinate pairs and spherical-earth distance.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS84 latitude/longitude pair.
///
/// Produced by the caller (device location, a tapped map point), by geocoding
/// a free-text address, or the fixed default. Immutable once obtained; no
/// validation beyond finiteness where a consumer requires it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Ginza, Tokyo: the fixed fallback center used when the caller supplies
/// neither coordinates nor an address.
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    latitude: 35.6715,
    longitude: 139.7649,
};

/// Great-circle distance between two points in kilometres (haversine).
#[must_use]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIBUYA: Coordinates = Coordinates {
        latitude: 35.6580,
        longitude: 139.7016,
    };

    #[test]
    fn haversine_zero_for_identical_points() {
        assert!(haversine_km(DEFAULT_CENTER, DEFAULT_CENTER).abs() < 1e-9);
    }

    #[test]
    fn haversine_ginza_to_shibuya_is_about_five_km() {
        let d = haversine_km(DEFAULT_CENTER, SHIBUYA);
        assert!((d - 4.9).abs() < 0.5, "expected ~4.9 km, got {d}");
    }

    #[test]
    fn haversine_is_symmetric() {
        let ab = haversine_km(DEFAULT_CENTER, SHIBUYA);
        let ba = haversine_km(SHIBUYA, DEFAULT_CENTER);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn is_finite_rejects_nan_components() {
        let c = Coordinates::new(f64::NAN, 139.0);
        assert!(!c.is_finite());
        assert!(DEFAULT_CENTER.is_finite());
    }

    #[test]
    fn coordinates_serde_round_trip() {
        let json = serde_json::to_string(&DEFAULT_CENTER).expect("serialize");
        let back: Coordinates = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, DEFAULT_CENTER);
    }

    #[test]
    fn display_uses_four_decimal_places() {
        assert_eq!(DEFAULT_CENTER.to_string(), "35.6715, 139.7649");
    }
}
