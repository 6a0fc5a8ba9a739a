//! Driver markers: raw driver records jittered onto the rider's position.
//!
//! The driver list provider only supplies placeholder coordinates, so each
//! marker is scattered around the rider with a small random offset to keep
//! overlapping pins readable on the map.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Maximum jitter applied to each axis, in degrees (uniform in ±this).
pub const JITTER_MAX_DEG: f64 = 0.005;

/// A driver as supplied by the driver list provider.
///
/// Identity and names drive marker titles; the vehicle and rating fields are
/// carried through untouched for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub car_image_url: Option<String>,
    #[serde(default)]
    pub car_seats: u32,
    #[serde(default)]
    pub rating: f64,
}

/// A displayable driver marker, optionally enriched with a fare quote.
///
/// Created by [`generate_markers`], enriched by the fare estimator, and
/// replaced wholesale whenever the driver list or destination changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerData {
    #[serde(flatten)]
    pub driver: DriverRecord,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    /// Estimated total trip time in minutes, set by the fare estimator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    /// Estimated price, formatted to 2 decimal places.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl MarkerData {
    /// The marker's display position.
    pub fn position(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Scatter driver markers around the rider's position.
///
/// Output preserves input order and maps one-to-one onto `drivers`. Returns
/// an empty list when the rider location is unknown. Offsets are sampled
/// uniformly from ±[`JITTER_MAX_DEG`] per axis; pass a seeded RNG for
/// reproducible placement in tests.
pub fn generate_markers<R: Rng>(
    drivers: &[DriverRecord],
    rider: Option<Coordinate>,
    rng: &mut R,
) -> Vec<MarkerData> {
    let Some(rider) = rider else {
        return Vec::new();
    };

    drivers
        .iter()
        .map(|driver| {
            let lat_offset = rng.gen_range(-JITTER_MAX_DEG..=JITTER_MAX_DEG);
            let lng_offset = rng.gen_range(-JITTER_MAX_DEG..=JITTER_MAX_DEG);
            MarkerData {
                // Jitter near the poles/antimeridian could leave the valid range.
                latitude: (rider.latitude + lat_offset).clamp(-90.0, 90.0),
                longitude: (rider.longitude + lng_offset).clamp(-180.0, 180.0),
                title: format!("{} {}", driver.first_name, driver.last_name),
                time: None,
                price: None,
                driver: driver.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn driver(id: u64, first_name: &str, last_name: &str) -> DriverRecord {
        DriverRecord {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            profile_image_url: None,
            car_image_url: None,
            car_seats: 4,
            rating: 4.8,
        }
    }

    #[test]
    fn markers_stay_within_jitter_bounds() {
        let drivers: Vec<_> = (0..100).map(|i| driver(i, "Test", "Driver")).collect();
        let rider = Coordinate::new(1.0, 1.0).expect("valid coordinate");
        let mut rng = StdRng::seed_from_u64(42);

        let markers = generate_markers(&drivers, Some(rider), &mut rng);
        assert_eq!(markers.len(), 100);
        for marker in &markers {
            assert!(marker.latitude >= 1.0 - JITTER_MAX_DEG);
            assert!(marker.latitude <= 1.0 + JITTER_MAX_DEG);
            assert!(marker.longitude >= 1.0 - JITTER_MAX_DEG);
            assert!(marker.longitude <= 1.0 + JITTER_MAX_DEG);
        }
    }

    #[test]
    fn markers_preserve_input_order() {
        let drivers = vec![driver(7, "Ada", "Okafor"), driver(3, "Liam", "Eze")];
        let rider = Coordinate::new(6.5244, 3.3792).expect("valid coordinate");
        let mut rng = StdRng::seed_from_u64(7);

        let markers = generate_markers(&drivers, Some(rider), &mut rng);
        assert_eq!(markers[0].driver.id, 7);
        assert_eq!(markers[0].title, "Ada Okafor");
        assert_eq!(markers[1].driver.id, 3);
        assert_eq!(markers[1].title, "Liam Eze");
        assert!(markers.iter().all(|m| m.time.is_none() && m.price.is_none()));
    }

    #[test]
    fn missing_rider_yields_no_markers() {
        let drivers = vec![driver(1, "Ada", "Okafor")];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_markers(&drivers, None, &mut rng).is_empty());
    }

    #[test]
    fn jitter_clamps_at_the_pole() {
        let drivers = vec![driver(1, "Polar", "Pilot")];
        let rider = Coordinate::new(90.0, 0.0).expect("valid coordinate");
        let mut rng = StdRng::seed_from_u64(9);

        let markers = generate_markers(&drivers, Some(rider), &mut rng);
        assert!(markers[0].latitude <= 90.0);
    }
}
