//! Geographic primitives: coordinates, Haversine distance, path interpolation.
//!
//! This module provides:
//!
//! - **Coordinate**: immutable lat/lng value type with range validation
//! - **Distance calculation**: great-circle distance via the Haversine formula
//! - **Interpolation**: evenly spaced points between two coordinates, used to
//!   fill visual gaps between a route polyline and its endpoint markers
//!
//! Distances assume a spherical Earth of radius 6371 km.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84-style lat/lng pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Coordinate outside the valid lat/lng range.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("coordinate out of range: latitude {latitude}, longitude {longitude}")]
pub struct InvalidCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, validating latitude ∈ [-90, 90] and
    /// longitude ∈ [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Great-circle distance between two coordinates in kilometres.
///
/// Symmetric, and zero iff both coordinates are equal.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lon1) = (a.latitude.to_radians(), a.longitude.to_radians());
    let (lat2, lon2) = (b.latitude.to_radians(), b.longitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Evenly spaced points strictly between `start` and `end` (both exclusive),
/// interpolated linearly per axis. Returns `count - 1` points; `count <= 1`
/// yields an empty sequence.
///
/// Not geodesically correct over long distances; intended for short visual
/// gap-filling between a route polyline and the origin/destination markers.
pub fn interpolate(start: Coordinate, end: Coordinate, count: usize) -> Vec<Coordinate> {
    if count <= 1 {
        return Vec::new();
    }
    let lat_step = (end.latitude - start.latitude) / count as f64;
    let lon_step = (end.longitude - start.longitude) / count as f64;
    (1..count)
        .map(|i| Coordinate {
            latitude: start.latitude + lat_step * i as f64,
            longitude: start.longitude + lon_step * i as f64,
        })
        .collect()
}
