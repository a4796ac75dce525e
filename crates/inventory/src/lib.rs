//! Capacity pools for the flight and hotel inventory services.
//!
//! Each inventory unit (a flight's seats, a hotel's rooms) is an owned record
//! behind its own lock. Capacity only changes through [`InventoryPool::reserve`],
//! which checks and decrements atomically.

pub mod error;
pub mod http;
pub mod pool;
pub mod unit;

pub use error::{InventoryError, Result};
pub use pool::{FlightInventory, HotelInventory, InventoryKey, InventoryPool};
pub use unit::{Availability, InventoryUnit, Shortfall, UnitKind};
