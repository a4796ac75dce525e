//! Value objects for the booking domain.

use serde::{Deserialize, Serialize};

/// Flight and hotel costs of a booking, fixed when the booking is created.
///
/// Amounts use plain `f64` arithmetic with no rounding policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    flight_cost: f64,
    hotel_cost: f64,
    total_cost: f64,
}

impl CostBreakdown {
    /// Prices `passengers` seats and `nights` nights from the quoted unit prices.
    pub fn quote(price_per_seat: f64, passengers: u32, price_per_night: f64, nights: u32) -> Self {
        let flight_cost = price_per_seat * f64::from(passengers);
        let hotel_cost = price_per_night * f64::from(nights);
        Self {
            flight_cost,
            hotel_cost,
            total_cost: flight_cost + hotel_cost,
        }
    }

    /// Rebuilds a breakdown from stored amounts without recomputing the total.
    pub fn from_parts(flight_cost: f64, hotel_cost: f64, total_cost: f64) -> Self {
        Self {
            flight_cost,
            hotel_cost,
            total_cost,
        }
    }

    /// Cost of the flight seats.
    pub fn flight_cost(&self) -> f64 {
        self.flight_cost
    }

    /// Cost of the hotel nights.
    pub fn hotel_cost(&self) -> f64 {
        self.hotel_cost
    }

    /// Flight plus hotel cost.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}
