//! Inventory error types.

use thiserror::Error;

use crate::unit::UnitKind;

/// Errors returned by an inventory pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// No unit is registered under the given ID.
    #[error("{kind} not found with id: {id}")]
    NotFound { kind: UnitKind, id: String },

    /// The unit has fewer free places than requested.
    #[error(
        "Not enough {} available on {} {id}. Requested: {requested}, Available: {available}",
        .kind.unit_name(),
        .kind.noun()
    )]
    InsufficientCapacity {
        kind: UnitKind,
        id: String,
        requested: u32,
        available: u32,
    },

    /// A reservation must cover at least one place.
    #[error("Reservation quantity must be at least 1")]
    InvalidQuantity,
}

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;
