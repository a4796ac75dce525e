use std::sync::Arc;

use async_trait::async_trait;
use common::{BookingId, UserId};
use domain::{Booking, BookingStatus};

use crate::Result;

/// Options for updating a stored booking.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Status the stored booking must currently have for the update to apply.
    /// If None, the update is unconditional (use with caution).
    pub expected_status: Option<BookingStatus>,
}

impl UpdateOptions {
    /// Creates options with no status check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options expecting the stored booking to be in `status`.
    pub fn expect_status(status: BookingStatus) -> Self {
        Self {
            expected_status: Some(status),
        }
    }
}

/// Core trait for booking store implementations.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persists a new booking.
    ///
    /// Fails with `DuplicateId` if a booking with the same ID exists.
    async fn create(&self, booking: &Booking) -> Result<()>;

    /// Retrieves a booking by ID.
    ///
    /// Returns None if the booking doesn't exist.
    async fn get(&self, id: BookingId) -> Result<Option<Booking>>;

    /// Retrieves all bookings of a user in insertion order.
    async fn get_by_user(&self, user_id: UserId) -> Result<Vec<Booking>>;

    /// Overwrites the status and confirmation timestamp of a stored booking.
    ///
    /// If `options.expected_status` is set, the write is atomic with the status
    /// check and fails with `StatusConflict` when the stored status differs.
    async fn update(&self, booking: &Booking, options: UpdateOptions) -> Result<()>;
}

#[async_trait]
impl<T: BookingStore + ?Sized> BookingStore for Arc<T> {
    async fn create(&self, booking: &Booking) -> Result<()> {
        (**self).create(booking).await
    }

    async fn get(&self, id: BookingId) -> Result<Option<Booking>> {
        (**self).get(id).await
    }

    async fn get_by_user(&self, user_id: UserId) -> Result<Vec<Booking>> {
        (**self).get_by_user(user_id).await
    }

    async fn update(&self, booking: &Booking, options: UpdateOptions) -> Result<()> {
        (**self).update(booking, options).await
    }
}
