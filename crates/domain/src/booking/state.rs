//! Booking status state machine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The status of a booking in its lifecycle.
///
/// State transitions:
/// ```text
/// Pending ──┬──► Confirmed
///           └──► Failed
///
/// Cancelled is set only by collaborators outside the orchestrator.
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Booking is priced and persisted, awaiting payment.
    #[default]
    Pending,

    /// Inventory was reserved after payment (terminal state).
    Confirmed,

    /// Booking was cancelled by an external collaborator (terminal state).
    Cancelled,

    /// Inventory reservation failed during confirmation (terminal state).
    Failed,
}

impl BookingStatus {
    /// Returns true if the booking can still be confirmed.
    pub fn can_confirm(&self) -> bool {
        matches!(self, BookingStatus::Pending)
    }

    /// Returns true if the booking can be marked as failed.
    pub fn can_fail(&self) -> bool {
        matches!(self, BookingStatus::Pending)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Pending)
    }

    /// Returns the status name as persisted and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(BookingStatus::Pending),
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            "FAILED" => Ok(BookingStatus::Failed),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}
