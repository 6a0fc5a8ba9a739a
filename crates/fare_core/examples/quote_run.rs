//! Generate jittered driver markers and price them with the offline
//! haversine provider.
//!
//! Run with: cargo run -p fare_core --example quote_run

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use fare_core::directions::HaversineDirectionsProvider;
use fare_core::estimator::{EstimatorConfig, FareEstimator};
use fare_core::geo::Coordinate;
use fare_core::markers::{generate_markers, DriverRecord};
use fare_core::region::display_region;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    const NUM_DRIVERS: u64 = 8;

    let rider = Coordinate::new(6.5244, 3.3792).expect("rider coordinate");
    let destination = Coordinate::new(6.4281, 3.4219).expect("destination coordinate");

    let drivers: Vec<DriverRecord> = (0..NUM_DRIVERS)
        .map(|i| DriverRecord {
            id: i,
            first_name: format!("Driver{}", i),
            last_name: "Demo".to_string(),
            profile_image_url: None,
            car_image_url: None,
            car_seats: 4,
            rating: 4.0 + (i % 10) as f64 / 10.0,
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(123);
    let markers = generate_markers(&drivers, Some(rider), &mut rng);

    let region = display_region(Some(rider), Some(destination));
    println!(
        "--- Quote run ({} drivers, seed 123) ---",
        NUM_DRIVERS
    );
    println!(
        "Viewport: center ({:.5}, {:.5})  span ({:.5}, {:.5})",
        region.latitude, region.longitude, region.latitude_delta, region.longitude_delta
    );

    let estimator = FareEstimator::new(
        Arc::new(HaversineDirectionsProvider),
        EstimatorConfig::default(),
    );

    match estimator
        .estimate(&markers, Some(rider), Some(destination))
        .await
    {
        Ok(Some(enriched)) => {
            println!("\nQuotes:");
            for marker in &enriched {
                println!(
                    "  {:<12}  pos=({:.5}, {:.5})  time={:>6.1} min  price={}",
                    marker.title,
                    marker.latitude,
                    marker.longitude,
                    marker.time.unwrap_or(0.0),
                    marker.price.as_deref().unwrap_or("-"),
                );
            }
        }
        Ok(None) => println!("\nNo quotes: rider or destination unknown."),
        Err(err) => println!("\nFare estimation failed: {}", err),
    }
}
