use serde::Deserialize;

/// Minimal directions JSON response structures. Only `routes[0].legs[0]` is
/// ever consumed; everything else in the body is ignored.
#[derive(Debug, Deserialize)]
pub(super) struct DirectionsResponse {
    /// Service-level status string (e.g. `"OK"`, `"ZERO_RESULTS"`).
    pub(super) status: Option<String>,
    #[serde(default)]
    pub(super) routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DirectionsRoute {
    #[serde(default)]
    pub(super) legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DirectionsLeg {
    pub(super) duration: ScalarValue,
    pub(super) distance: ScalarValue,
}

/// `{ "text": "...", "value": n }` pair; only the numeric value is used
/// (seconds for durations, metres for distances).
#[derive(Debug, Deserialize)]
pub(super) struct ScalarValue {
    pub(super) value: f64,
}
