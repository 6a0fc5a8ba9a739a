use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fare_core::directions::{
    build_directions_provider, CachedDirections, DirectionsError, DirectionsKind,
    DirectionsProvider, HaversineDirectionsProvider, RetryingDirections, RouteLeg,
};
use fare_core::geo::{self, Coordinate};
use fare_core::test_helpers::{test_destination, test_rider};

#[tokio::test]
async fn haversine_provider_returns_leg() {
    let provider = HaversineDirectionsProvider;
    let leg = provider
        .route_leg(test_rider(), test_destination())
        .await
        .expect("leg");

    let expected_km = geo::distance_km(test_rider(), test_destination());
    assert!((leg.distance_m - expected_km * 1000.0).abs() < 1e-6);
    assert!(leg.duration_secs > 0.0);
}

#[tokio::test]
async fn haversine_provider_same_point_is_zero() {
    let provider = HaversineDirectionsProvider;
    let leg = provider
        .route_leg(test_rider(), test_rider())
        .await
        .expect("leg");
    assert_eq!(leg.duration_secs, 0.0);
    assert_eq!(leg.distance_m, 0.0);
}

#[test]
fn directions_kind_default_is_haversine() {
    assert_eq!(DirectionsKind::default(), DirectionsKind::Haversine);
}

#[tokio::test]
async fn build_directions_provider_haversine() {
    let provider = build_directions_provider(&DirectionsKind::Haversine).expect("provider");
    assert!(provider
        .route_leg(test_rider(), test_destination())
        .await
        .is_ok());
}

/// Fails with a transient error for the first `failures` calls, then succeeds.
struct FlakyProvider {
    failures: u32,
    calls: AtomicU32,
}

impl FlakyProvider {
    fn new(failures: u32) -> Self {
        Self {
            failures,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl DirectionsProvider for FlakyProvider {
    async fn route_leg(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<RouteLeg, DirectionsError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(DirectionsError::Status(503));
        }
        Ok(RouteLeg {
            duration_secs: 60.0,
            distance_m: 500.0,
        })
    }
}

#[tokio::test]
async fn retrying_provider_recovers_from_transient_failures() {
    let retrying = RetryingDirections::new(
        Box::new(FlakyProvider::new(2)),
        2,
        Duration::from_millis(1),
    );

    let leg = retrying
        .route_leg(test_rider(), test_destination())
        .await
        .expect("third attempt should succeed");
    assert_eq!(leg.duration_secs, 60.0);
}

#[tokio::test]
async fn retrying_provider_gives_up_after_max_retries() {
    let retrying = RetryingDirections::new(
        Box::new(FlakyProvider::new(5)),
        2,
        Duration::from_millis(1),
    );

    let result = retrying.route_leg(test_rider(), test_destination()).await;
    assert!(matches!(result, Err(DirectionsError::Status(503))));
}

/// Always rejects with a deterministic service error.
struct RejectingProvider {
    calls: Arc<AtomicU32>,
}

#[async_trait]
impl DirectionsProvider for RejectingProvider {
    async fn route_leg(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<RouteLeg, DirectionsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DirectionsError::Api("ZERO_RESULTS".to_string()))
    }
}

#[tokio::test]
async fn retrying_provider_does_not_retry_service_rejections() {
    let calls = Arc::new(AtomicU32::new(0));
    let retrying = RetryingDirections::new(
        Box::new(RejectingProvider {
            calls: Arc::clone(&calls),
        }),
        3,
        Duration::from_millis(1),
    );

    let result = retrying.route_leg(test_rider(), test_destination()).await;
    assert!(matches!(result, Err(DirectionsError::Api(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Counts how often the inner provider is actually queried.
struct CountingProvider {
    calls: Arc<AtomicU32>,
}

#[async_trait]
impl DirectionsProvider for CountingProvider {
    async fn route_leg(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, DirectionsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        HaversineDirectionsProvider
            .route_leg(origin, destination)
            .await
    }
}

#[tokio::test]
async fn cached_provider_collapses_identical_queries() {
    let calls = Arc::new(AtomicU32::new(0));
    let cached = CachedDirections::new(
        Box::new(CountingProvider {
            calls: Arc::clone(&calls),
        }),
        100,
    );

    let first = cached
        .route_leg(test_rider(), test_destination())
        .await
        .expect("leg");
    let second = cached
        .route_leg(test_rider(), test_destination())
        .await
        .expect("leg");
    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Reversed direction is a different key.
    cached
        .route_leg(test_destination(), test_rider())
        .await
        .expect("leg");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
