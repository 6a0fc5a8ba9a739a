//! Map viewport calculation from rider and destination coordinates.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Fallback viewport center when no rider location is known (San Francisco).
pub const DEFAULT_LATITUDE: f64 = 37.78825;
pub const DEFAULT_LONGITUDE: f64 = -122.4324;

/// Span used for single-point viewports, in degrees.
pub const DEFAULT_SPAN_DEG: f64 = 0.01;

/// Padding applied around a two-point viewport (30% margin).
pub const PADDING_FACTOR: f64 = 1.3;

/// Minimum span enforced on the display path so coincident rider and
/// destination never produce a zero-area viewport.
pub const MIN_SPAN_DEG: f64 = 0.01;

/// A rectangular map viewport: center plus per-axis spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    /// Enforce a minimum span on both axes, keeping the center.
    pub fn clamp_min_span(self, min_span: f64) -> Region {
        Region {
            latitude_delta: self.latitude_delta.max(min_span),
            longitude_delta: self.longitude_delta.max(min_span),
            ..self
        }
    }
}

/// Derive the viewport for the current rider/destination pair.
///
/// - No rider: fixed fallback region.
/// - Rider only: centered on the rider with the default span.
/// - Both: centered on the midpoint, spans padded by [`PADDING_FACTOR`].
///
/// Total over its domain; never fails. Coincident or axis-aligned inputs can
/// yield a zero delta on an axis, so the render path should go through
/// [`display_region`], which clamps to [`MIN_SPAN_DEG`].
pub fn calculate_region(rider: Option<Coordinate>, destination: Option<Coordinate>) -> Region {
    let Some(rider) = rider else {
        return Region {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            latitude_delta: DEFAULT_SPAN_DEG,
            longitude_delta: DEFAULT_SPAN_DEG,
        };
    };

    let Some(destination) = destination else {
        return Region {
            latitude: rider.latitude,
            longitude: rider.longitude,
            latitude_delta: DEFAULT_SPAN_DEG,
            longitude_delta: DEFAULT_SPAN_DEG,
        };
    };

    let min_lat = rider.latitude.min(destination.latitude);
    let max_lat = rider.latitude.max(destination.latitude);
    let min_lng = rider.longitude.min(destination.longitude);
    let max_lng = rider.longitude.max(destination.longitude);

    Region {
        latitude: (rider.latitude + destination.latitude) / 2.0,
        longitude: (rider.longitude + destination.longitude) / 2.0,
        latitude_delta: (max_lat - min_lat) * PADDING_FACTOR,
        longitude_delta: (max_lng - min_lng) * PADDING_FACTOR,
    }
}

/// [`calculate_region`] with the minimum-span clamp applied.
pub fn display_region(rider: Option<Coordinate>, destination: Option<Coordinate>) -> Region {
    calculate_region(rider, destination).clamp_min_span(MIN_SPAN_DEG)
}
