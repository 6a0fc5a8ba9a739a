//! Test helpers for common fixtures across test files.

use crate::geo::Coordinate;
use crate::markers::{DriverRecord, MarkerData};

/// A rider position in central Lagos used across test files for consistency.
pub fn test_rider() -> Coordinate {
    Coordinate::new(6.5244, 3.3792).expect("test rider coordinate should be valid")
}

/// A destination a few kilometres from [`test_rider`].
pub fn test_destination() -> Coordinate {
    Coordinate::new(6.4281, 3.4219).expect("test destination coordinate should be valid")
}

/// Build a driver record with placeholder vehicle metadata.
pub fn test_driver(id: u64, first_name: &str, last_name: &str) -> DriverRecord {
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

/// Build an unenriched marker at the given position.
pub fn test_marker(id: u64, position: Coordinate) -> MarkerData {
    let driver = test_driver(id, "Test", "Driver");
    MarkerData {
        title: format!("{} {}", driver.first_name, driver.last_name),
        latitude: position.latitude,
        longitude: position.longitude,
        time: None,
        price: None,
        driver,
    }
}
