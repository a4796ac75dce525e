//! Orchestrator error types.

use std::time::Duration;

use booking_store::StoreError;
use common::{BookingId, UserId};
use domain::{DomainError, ValidationError};
use inventory::InventoryError;
use thiserror::Error;

/// Which inventory a booking failed to obtain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryKind {
    Flight,
    Hotel,
}

impl std::fmt::Display for InventoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InventoryKind::Flight => write!(f, "Flight"),
            InventoryKind::Hotel => write!(f, "Hotel"),
        }
    }
}

/// The reservation call a confirmation was on when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStep {
    FlightSeats,
    HotelRoom,
}

impl ReservationStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStep::FlightSeats => "reserve_flight_seats",
            ReservationStep::HotelRoom => "reserve_hotel_room",
        }
    }
}

impl std::fmt::Display for ReservationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A failed call to a collaborator service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// The collaborator has no record with the requested ID.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Not enough free capacity for the requested reservation.
    #[error("Insufficient capacity: requested {requested}, available {available}")]
    InsufficientCapacity { requested: u32, available: u32 },

    /// The collaborator answered with an error status.
    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The collaborator could not be reached.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// No answer within the configured bound.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The answer could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<InventoryError> for GatewayError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::NotFound { .. } => GatewayError::NotFound(err.to_string()),
            InventoryError::InsufficientCapacity {
                requested,
                available,
                ..
            } => GatewayError::InsufficientCapacity {
                requested,
                available,
            },
            InventoryError::InvalidQuantity => GatewayError::Rejected {
                status: 400,
                message: err.to_string(),
            },
        }
    }
}

/// Why a flight or hotel cannot be booked.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnavailableReason {
    /// The availability lookup itself failed.
    #[error("availability lookup failed: {0}")]
    Lookup(#[source] GatewayError),

    /// The collaborator reports no free capacity.
    #[error("sold out")]
    SoldOut,

    /// Free capacity exists but is below what the booking needs.
    #[error("requested {requested}, available {available}")]
    Insufficient { requested: u32, available: u32 },
}

/// Errors returned by booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The request failed its preconditions.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The identity service did not confirm the user.
    #[error("User validation failed for user {user_id}: {source}")]
    UserValidationFailed {
        user_id: UserId,
        #[source]
        source: GatewayError,
    },

    /// Flight or hotel cannot satisfy the request.
    #[error("{kind} is not available: {reason}")]
    InventoryUnavailable {
        kind: InventoryKind,
        #[source]
        reason: UnavailableReason,
    },

    /// No booking with this ID exists.
    #[error("Booking not found with id: {0}")]
    BookingNotFound(BookingId),

    /// A reservation step failed and the booking was marked FAILED.
    #[error("Booking {booking_id} confirmation failed at {step}: {source}")]
    ConfirmationFailed {
        booking_id: BookingId,
        step: ReservationStep,
        #[source]
        source: GatewayError,
    },

    /// Storage error.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Convenience type alias for booking results.
pub type Result<T> = std::result::Result<T, BookingError>;
