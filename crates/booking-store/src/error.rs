use common::BookingId;
use domain::BookingStatus;
use thiserror::Error;

/// Errors that can occur when interacting with the booking store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The booking to update does not exist.
    #[error("Booking not found: {0}")]
    NotFound(BookingId),

    /// A booking with the same ID was already created.
    #[error("Booking already exists: {0}")]
    DuplicateId(BookingId),

    /// A conditional update found a different status than expected.
    #[error(
        "Status conflict for booking {booking_id}: expected {expected}, found {actual}"
    )]
    StatusConflict {
        booking_id: BookingId,
        expected: BookingStatus,
        actual: BookingStatus,
    },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row could not be mapped back to a booking.
    #[error("Corrupt booking row: {0}")]
    Corrupt(String),
}

/// Result type for booking store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
