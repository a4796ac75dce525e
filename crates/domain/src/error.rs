//! Domain error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::booking::BookingStatus;

/// A booking request that fails its preconditions.
///
/// These are rejected before any collaborator is contacted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Travel date is today or in the past.
    #[error("Travel date must be in the future: {travel_date} is not after {today}")]
    TravelDateNotInFuture {
        travel_date: NaiveDate,
        today: NaiveDate,
    },

    /// Fewer than one night requested.
    #[error("Must book at least 1 night, got {nights}")]
    InvalidNights { nights: u32 },

    /// Fewer than one passenger requested.
    #[error("Must have at least 1 passenger, got {passengers}")]
    InvalidPassengers { passengers: u32 },
}

/// Errors that can occur when manipulating a booking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The booking is not in a state that allows the requested action.
    #[error("Invalid state transition: cannot {action} from {current} state")]
    InvalidStateTransition {
        current: BookingStatus,
        action: &'static str,
    },

    /// A persisted status string is not one of the known statuses.
    #[error("Unknown booking status: {0}")]
    UnknownStatus(String),
}
