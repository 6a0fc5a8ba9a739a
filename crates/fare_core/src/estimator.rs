//! Concurrent per-driver fare estimation.
//!
//! For every marker the estimator queries two legs (driver→rider,
//! rider→destination), combines them through the fare model, and returns the
//! markers enriched with time and price. Fan-out is bounded by a semaphore,
//! output order always matches input order, and a generation counter discards
//! batches that were superseded by a newer request while in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::directions::{DirectionsError, DirectionsProvider};
use crate::geo::Coordinate;
use crate::markers::MarkerData;
use crate::pricing::{format_price, FareConfig};

/// Default cap on concurrently running per-marker tasks.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// What to do when a leg query fails for one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole batch on the first failure.
    #[default]
    FailFast,
    /// Keep failed markers without fare enrichment and log the failure.
    BestEffort,
}

/// Estimator configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig {
    /// Maximum number of per-marker tasks in flight at once.
    pub max_in_flight: usize,
    pub failure_policy: FailurePolicy,
    pub fare: FareConfig,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            failure_policy: FailurePolicy::default(),
            fare: FareConfig::default(),
        }
    }
}

impl EstimatorConfig {
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn with_fare_config(mut self, fare: FareConfig) -> Self {
        self.fare = fare;
        self
    }
}

/// Prices driver markers against a [`DirectionsProvider`].
pub struct FareEstimator {
    provider: Arc<dyn DirectionsProvider>,
    config: EstimatorConfig,
    limiter: Arc<Semaphore>,
    generation: AtomicU64,
}

impl FareEstimator {
    pub fn new(provider: Arc<dyn DirectionsProvider>, config: EstimatorConfig) -> Self {
        let limiter = Arc::new(Semaphore::new(config.max_in_flight.max(1)));
        Self {
            provider,
            config,
            limiter,
            generation: AtomicU64::new(0),
        }
    }

    /// Estimate time and price for every marker.
    ///
    /// Returns `Ok(None)` when rider or destination is unknown (a no-op, not
    /// an error) and when the batch was superseded by a newer call before it
    /// finished. Otherwise the returned markers correspond one-to-one, in
    /// order, to the input. Under [`FailurePolicy::FailFast`] the first leg
    /// failure fails the batch; under [`FailurePolicy::BestEffort`] failed
    /// markers come back without enrichment.
    pub async fn estimate(
        &self,
        markers: &[MarkerData],
        rider: Option<Coordinate>,
        destination: Option<Coordinate>,
    ) -> Result<Option<Vec<MarkerData>>, DirectionsError> {
        let (Some(rider), Some(destination)) = (rider, destination) else {
            tracing::debug!("rider or destination unknown, skipping fare estimation");
            return Ok(None);
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let tasks = markers.iter().map(|marker| {
            let provider = Arc::clone(&self.provider);
            let limiter = Arc::clone(&self.limiter);
            let fare = self.config.fare;
            let marker = marker.clone();
            async move {
                let _permit = limiter.acquire().await.expect("limiter never closes");
                estimate_marker(provider.as_ref(), &fare, marker, rider, destination).await
            }
        });

        // join_all resolves in input order regardless of completion order.
        let results = join_all(tasks).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding superseded fare batch");
            return Ok(None);
        }

        let mut enriched = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(marker) => enriched.push(marker),
                Err((marker, err)) => match self.config.failure_policy {
                    FailurePolicy::FailFast => {
                        tracing::error!(
                            error = %err,
                            driver_id = marker.driver.id,
                            "fare estimation failed, aborting batch"
                        );
                        return Err(err);
                    }
                    FailurePolicy::BestEffort => {
                        tracing::warn!(
                            error = %err,
                            driver_id = marker.driver.id,
                            "fare estimation failed, keeping marker without fare"
                        );
                        enriched.push(marker);
                    }
                },
            }
        }

        Ok(Some(enriched))
    }
}

/// Price one marker: two sequential leg queries, then the fare model.
///
/// Failures hand the unmodified marker back so best-effort batches can keep
/// it without enrichment.
async fn estimate_marker(
    provider: &dyn DirectionsProvider,
    fare: &FareConfig,
    marker: MarkerData,
    rider: Coordinate,
    destination: Coordinate,
) -> Result<MarkerData, (MarkerData, DirectionsError)> {
    let to_rider = match provider.route_leg(marker.position(), rider).await {
        Ok(leg) => leg,
        Err(err) => return Err((marker, err)),
    };
    let to_destination = match provider.route_leg(rider, destination).await {
        Ok(leg) => leg,
        Err(err) => return Err((marker, err)),
    };

    let total_time_min = (to_rider.duration_secs + to_destination.duration_secs) / 60.0;
    let total_distance_km = to_rider.distance_m / 1000.0 + to_destination.distance_m / 1000.0;
    let price = fare.quote(total_time_min, total_distance_km);

    let mut marker = marker;
    marker.time = Some(total_time_min);
    marker.price = Some(format_price(price));
    Ok(marker)
}
