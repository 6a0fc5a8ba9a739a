//! Fare cost model: base fare plus time, distance, and fuel components.

use serde::{Deserialize, Serialize};

/// Fuel price in currency units per liter.
pub const FUEL_PRICE_PER_LITER: f64 = 1200.0;

/// Base fare in currency units.
pub const BASE_FARE: f64 = 1500.0;

/// Per-minute rate in currency units.
pub const TIME_FARE_PER_MINUTE: f64 = 20.0;

/// Per-kilometer rate in currency units.
pub const DISTANCE_FARE_PER_KM: f64 = 150.0;

/// Average fuel consumption in kilometres per liter.
pub const AVG_FUEL_CONSUMPTION_KM_PER_LITER: f64 = 8.0;

/// Prices are rounded up to the nearest multiple of this unit.
pub const ROUNDING_UNIT: f64 = 100.0;

/// Configurable fare model. Defaults match the production cost constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareConfig {
    pub fuel_price_per_liter: f64,
    pub base_fare: f64,
    pub time_fare_per_minute: f64,
    pub distance_fare_per_km: f64,
    pub avg_fuel_consumption_km_per_liter: f64,
    /// Round the final price up to a multiple of this; `<= 0` disables rounding.
    pub rounding_unit: f64,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            fuel_price_per_liter: FUEL_PRICE_PER_LITER,
            base_fare: BASE_FARE,
            time_fare_per_minute: TIME_FARE_PER_MINUTE,
            distance_fare_per_km: DISTANCE_FARE_PER_KM,
            avg_fuel_consumption_km_per_liter: AVG_FUEL_CONSUMPTION_KM_PER_LITER,
            rounding_unit: ROUNDING_UNIT,
        }
    }
}

impl FareConfig {
    pub fn with_base_fare(mut self, base_fare: f64) -> Self {
        self.base_fare = base_fare;
        self
    }

    pub fn with_time_fare_per_minute(mut self, rate: f64) -> Self {
        self.time_fare_per_minute = rate;
        self
    }

    pub fn with_distance_fare_per_km(mut self, rate: f64) -> Self {
        self.distance_fare_per_km = rate;
        self
    }

    pub fn with_fuel_price_per_liter(mut self, price: f64) -> Self {
        self.fuel_price_per_liter = price;
        self
    }

    pub fn with_avg_fuel_consumption(mut self, km_per_liter: f64) -> Self {
        self.avg_fuel_consumption_km_per_liter = km_per_liter;
        self
    }

    pub fn with_rounding_unit(mut self, unit: f64) -> Self {
        self.rounding_unit = unit;
        self
    }

    /// Fuel cost for the given trip distance.
    pub fn fuel_cost(&self, total_distance_km: f64) -> f64 {
        (total_distance_km / self.avg_fuel_consumption_km_per_liter) * self.fuel_price_per_liter
    }

    /// Price a trip from its total time and distance.
    ///
    /// Formula: `base + minutes * per_minute + km * per_km + fuel_cost`,
    /// rounded up to the nearest [`rounding_unit`](Self::rounding_unit).
    pub fn quote(&self, total_time_min: f64, total_distance_km: f64) -> f64 {
        let raw = self.base_fare
            + total_time_min * self.time_fare_per_minute
            + total_distance_km * self.distance_fare_per_km
            + self.fuel_cost(total_distance_km);
        self.round_up(raw)
    }

    fn round_up(&self, price: f64) -> f64 {
        if self.rounding_unit <= 0.0 {
            return price;
        }
        (price / self.rounding_unit).ceil() * self.rounding_unit
    }
}

/// Format a price for display with exactly two decimal places.
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_matches_reference_scenario() {
        // Legs: 600 s / 5 km to the rider, 600 s / 10 km to the destination.
        let total_time_min = (600.0 + 600.0) / 60.0;
        let total_distance_km = 5.0 + 10.0;

        let config = FareConfig::default();
        assert_eq!(config.fuel_cost(total_distance_km), 2250.0);

        let price = config.quote(total_time_min, total_distance_km);
        assert_eq!(price, 6400.0);
        assert_eq!(format_price(price), "6400.00");
    }

    #[test]
    fn quote_rounds_up_to_the_next_unit() {
        // 1500 + 0.05 min * 20 = 1501, which must round up to 1600.
        let price = FareConfig::default().quote(0.05, 0.0);
        assert_eq!(price, 1600.0);
    }

    #[test]
    fn zero_rounding_unit_disables_rounding() {
        let config = FareConfig::default().with_rounding_unit(0.0);
        let price = config.quote(1.0, 0.0);
        assert_eq!(price, BASE_FARE + TIME_FARE_PER_MINUTE);
    }

    #[test]
    fn builders_override_constants() {
        let config = FareConfig::default()
            .with_base_fare(1000.0)
            .with_time_fare_per_minute(0.0)
            .with_distance_fare_per_km(0.0)
            .with_fuel_price_per_liter(0.0)
            .with_rounding_unit(0.0);
        assert_eq!(config.quote(30.0, 12.0), 1000.0);
    }

    #[test]
    fn zero_distance_trip_costs_no_fuel() {
        assert_eq!(FareConfig::default().fuel_cost(0.0), 0.0);
    }
}
