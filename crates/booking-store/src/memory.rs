use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{BookingId, UserId};
use domain::{Booking, BookingRecord};
use tokio::sync::RwLock;

use crate::{
    Result, StoreError,
    store::{BookingStore, UpdateOptions},
};

#[derive(Default)]
struct Inner {
    bookings: HashMap<BookingId, Booking>,
    insertion_order: Vec<BookingId>,
}

/// In-memory booking store implementation for testing.
///
/// This implementation keeps all bookings in memory and provides
/// the same interface as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryBookingStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryBookingStore {
    /// Creates a new empty in-memory booking store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of bookings stored.
    pub async fn booking_count(&self) -> usize {
        self.inner.read().await.bookings.len()
    }

    /// Clears all bookings.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.bookings.clear();
        inner.insertion_order.clear();
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn create(&self, booking: &Booking) -> Result<()> {
        let mut inner = self.inner.write().await;

        if inner.bookings.contains_key(&booking.id()) {
            return Err(StoreError::DuplicateId(booking.id()));
        }

        inner.insertion_order.push(booking.id());
        inner.bookings.insert(booking.id(), booking.clone());
        Ok(())
    }

    async fn get(&self, id: BookingId) -> Result<Option<Booking>> {
        Ok(self.inner.read().await.bookings.get(&id).cloned())
    }

    async fn get_by_user(&self, user_id: UserId) -> Result<Vec<Booking>> {
        let inner = self.inner.read().await;
        Ok(inner
            .insertion_order
            .iter()
            .filter_map(|id| inner.bookings.get(id))
            .filter(|b| b.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, booking: &Booking, options: UpdateOptions) -> Result<()> {
        let mut inner = self.inner.write().await;

        let stored = inner
            .bookings
            .get_mut(&booking.id())
            .ok_or(StoreError::NotFound(booking.id()))?;

        if let Some(expected) = options.expected_status
            && stored.status() != expected
        {
            return Err(StoreError::StatusConflict {
                booking_id: booking.id(),
                expected,
                actual: stored.status(),
            });
        }

        let mut record = BookingRecord::from(&*stored);
        record.status = booking.status();
        record.confirmed_at = booking.confirmed_at();
        *stored = Booking::from(record);
        Ok(())
    }
}
