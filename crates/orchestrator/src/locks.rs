//! Per-booking mutual exclusion for confirmations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use common::BookingId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Held for the whole load, reserve and persist sequence of one confirmation.
pub type BookingGuard = OwnedMutexGuard<()>;

/// Async locks keyed by booking ID.
///
/// Entries that nobody holds or waits on are dropped on the next acquire,
/// so the map only grows with the number of bookings in flight.
#[derive(Debug, Default)]
pub struct BookingLocks {
    entries: Mutex<HashMap<BookingId, Arc<AsyncMutex<()>>>>,
}

impl BookingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other task holds the lock for `booking_id`.
    pub async fn acquire(&self, booking_id: BookingId) -> BookingGuard {
        let lock = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            entries.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(entries.entry(booking_id).or_default())
        };

        lock.lock_owned().await
    }

    /// Number of bookings currently held or awaited.
    pub fn active(&self) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, lock| Arc::strong_count(lock) > 1);
        entries.len()
    }
}
