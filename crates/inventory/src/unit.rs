//! A single capacity pool: one flight's seats or one hotel's rooms.

use serde::{Deserialize, Serialize};

/// Which inventory service a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Flight,
    Hotel,
}

impl UnitKind {
    /// Plural name of the places a unit of this kind holds.
    pub fn unit_name(&self) -> &'static str {
        match self {
            UnitKind::Flight => "seats",
            UnitKind::Hotel => "rooms",
        }
    }

    /// Lower-case name used inside sentences.
    pub fn noun(&self) -> &'static str {
        match self {
            UnitKind::Flight => "flight",
            UnitKind::Hotel => "hotel",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Flight => "Flight",
            UnitKind::Hotel => "Hotel",
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reservation asked for more places than were free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub requested: u32,
    pub available: u32,
}

/// Capacity record of one flight or hotel.
///
/// Invariant: `available <= total`. The only mutation is [`InventoryUnit::reserve`].
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryUnit {
    label: String,
    total: u32,
    available: u32,
    unit_price: f64,
}

impl InventoryUnit {
    /// Creates a unit with all capacity free.
    pub fn new(label: impl Into<String>, total: u32, unit_price: f64) -> Self {
        Self {
            label: label.into(),
            total,
            available: total,
            unit_price,
        }
    }

    /// Flight number or hotel name.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    /// Price per seat or per night.
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// A unit is available while at least one place is free.
    pub fn is_available(&self) -> bool {
        self.available > 0
    }

    /// Takes `count` places, returning how many remain.
    pub fn reserve(&mut self, count: u32) -> Result<u32, Shortfall> {
        if self.available < count {
            return Err(Shortfall {
                requested: count,
                available: self.available,
            });
        }

        self.available -= count;
        Ok(self.available)
    }

    /// Point-in-time view of the unit.
    pub fn availability(&self) -> Availability {
        Availability {
            label: self.label.clone(),
            available: self.is_available(),
            available_units: self.available,
            total_units: self.total,
            unit_price: self.unit_price,
        }
    }
}

/// Snapshot returned by an availability check.
///
/// It is only an observation: nothing is held until a reservation is made.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Availability {
    pub label: String,
    pub available: bool,
    pub available_units: u32,
    pub total_units: u32,
    pub unit_price: f64,
}
