//! Pluggable directions providers: trait abstraction for route-leg queries.
//!
//! Implementations, selectable via [`DirectionsKind`]:
//!
//! - **`HaversineDirectionsProvider`**: straight-line estimate at a fixed
//!   free-flow speed. Zero external dependencies; deterministic.
//! - **`HttpDirectionsProvider`**: calls a Google-style directions HTTP
//!   endpoint.
//!
//! Two decorators wrap any provider: [`RetryingDirections`] (bounded retries
//! on transport failures) and [`CachedDirections`] (LRU over identical
//! origin/destination pairs; the rider-to-destination leg repeats once per
//! marker, so this collapses N identical queries).

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use serde::{Deserialize, Serialize};

use crate::geo::{self, Coordinate};

mod client;
mod error;
mod parser;
mod response;

pub use client::{HttpDirectionsProvider, API_KEY_ENV, DEFAULT_ENDPOINT};
pub use error::DirectionsError;

/// One origin-to-destination segment: duration and distance.
///
/// Consumed immediately into a fare; never retained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub duration_secs: f64,
    pub distance_m: f64,
}

/// Which directions backend to use. Serializes into configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum DirectionsKind {
    /// Straight-line estimate, zero external dependencies.
    #[default]
    Haversine,
    /// Google-style directions HTTP endpoint; the API key comes from the
    /// [`API_KEY_ENV`] environment variable.
    Http { endpoint: String },
}

/// Trait for directions backends. Implementations must be `Send + Sync` so a
/// provider can be shared across concurrent estimation tasks.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Query one leg from `origin` to `destination`.
    async fn route_leg(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, DirectionsError>;
}

// ---------------------------------------------------------------------------
// Haversine provider (always available)
// ---------------------------------------------------------------------------

/// Average free-flow city speed used to estimate leg durations (km/h).
const FALLBACK_SPEED_KMH: f64 = 40.0;

/// Estimates legs from the great-circle distance at a fixed average speed.
/// Useful offline, in development, and as a deterministic test double.
pub struct HaversineDirectionsProvider;

#[async_trait]
impl DirectionsProvider for HaversineDirectionsProvider {
    async fn route_leg(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, DirectionsError> {
        let distance_km = geo::distance_km(origin, destination);
        let duration_secs = if distance_km > 0.0 {
            (distance_km / FALLBACK_SPEED_KMH) * 3600.0
        } else {
            0.0
        };
        Ok(RouteLeg {
            duration_secs,
            distance_m: distance_km * 1000.0,
        })
    }
}

// ---------------------------------------------------------------------------
// Retrying wrapper
// ---------------------------------------------------------------------------

/// Bounded-retry wrapper around any [`DirectionsProvider`].
///
/// Only transport-level failures are retried; service rejections and
/// malformed bodies fail immediately.
pub struct RetryingDirections {
    inner: Box<dyn DirectionsProvider>,
    max_retries: u32,
    backoff: Duration,
}

impl RetryingDirections {
    pub fn new(inner: Box<dyn DirectionsProvider>, max_retries: u32, backoff: Duration) -> Self {
        Self {
            inner,
            max_retries,
            backoff,
        }
    }
}

#[async_trait]
impl DirectionsProvider for RetryingDirections {
    async fn route_leg(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, DirectionsError> {
        let mut attempt = 0;
        loop {
            match self.inner.route_leg(origin, destination).await {
                Ok(leg) => return Ok(leg),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(error = %err, attempt, "transient directions failure, retrying");
                    tokio::time::sleep(self.backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Caching wrapper
// ---------------------------------------------------------------------------

/// Cache key: both endpoints quantised to microdegrees (~0.1 m).
type LegKey = (i64, i64, i64, i64);

fn leg_key(origin: Coordinate, destination: Coordinate) -> LegKey {
    const MICRODEG: f64 = 1e6;
    (
        (origin.latitude * MICRODEG).round() as i64,
        (origin.longitude * MICRODEG).round() as i64,
        (destination.latitude * MICRODEG).round() as i64,
        (destination.longitude * MICRODEG).round() as i64,
    )
}

/// LRU-cached wrapper around any [`DirectionsProvider`].
///
/// Keys are directional (origin, destination) pairs. Only successful legs are
/// cached; failures are not cached and will retry on the next query.
pub struct CachedDirections {
    inner: Box<dyn DirectionsProvider>,
    cache: Mutex<LruCache<LegKey, RouteLeg>>,
}

impl CachedDirections {
    pub fn new(inner: Box<dyn DirectionsProvider>, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity.max(1)).expect("cache capacity must be > 0"),
            )),
        }
    }
}

#[async_trait]
impl DirectionsProvider for CachedDirections {
    async fn route_leg(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, DirectionsError> {
        let key = leg_key(origin, destination);

        // Fast path: cache hit. The lock is released before awaiting.
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(leg) = cache.get(&key) {
                return Ok(*leg);
            }
        }

        let leg = self.inner.route_leg(origin, destination).await?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, leg);
        }
        Ok(leg)
    }
}

// ---------------------------------------------------------------------------
// Factory: build a provider from DirectionsKind
// ---------------------------------------------------------------------------

const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);
const DEFAULT_LEG_CACHE_CAPACITY: usize = 1_000;

/// Construct a boxed [`DirectionsProvider`] from a [`DirectionsKind`].
///
/// - `Haversine` is returned bare (already cheap and deterministic).
/// - `Http` is wrapped in retry and LRU-cache decorators.
pub fn build_directions_provider(
    kind: &DirectionsKind,
) -> Result<Box<dyn DirectionsProvider>, DirectionsError> {
    match kind {
        DirectionsKind::Haversine => Ok(Box::new(HaversineDirectionsProvider)),
        DirectionsKind::Http { endpoint } => {
            let inner = Box::new(HttpDirectionsProvider::from_env_key(endpoint)?);
            let retried = Box::new(RetryingDirections::new(
                inner,
                DEFAULT_MAX_RETRIES,
                DEFAULT_RETRY_BACKOFF,
            ));
            Ok(Box::new(CachedDirections::new(
                retried,
                DEFAULT_LEG_CACHE_CAPACITY,
            )))
        }
    }
}
