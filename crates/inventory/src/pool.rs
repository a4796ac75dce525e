//! Keyed collection of inventory units, one lock per unit.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use common::{FlightId, HotelId};
use tokio::sync::{Mutex, RwLock};

use crate::error::{InventoryError, Result};
use crate::unit::{Availability, InventoryUnit, UnitKind};

/// Identifier type usable as an inventory pool key.
pub trait InventoryKey: Copy + Eq + Hash + Display + Send + Sync + 'static {
    const KIND: UnitKind;
}

impl InventoryKey for FlightId {
    const KIND: UnitKind = UnitKind::Flight;
}

impl InventoryKey for HotelId {
    const KIND: UnitKind = UnitKind::Hotel;
}

/// Seat pools of the flight inventory service.
pub type FlightInventory = InventoryPool<FlightId>;

/// Room pools of the hotel inventory service.
pub type HotelInventory = InventoryPool<HotelId>;

/// In-memory inventory service state.
///
/// The map lock is held only long enough to find a unit. Reservations then
/// lock that unit alone, so different flights or hotels never contend.
pub struct InventoryPool<K: InventoryKey> {
    units: Arc<RwLock<HashMap<K, Arc<Mutex<InventoryUnit>>>>>,
}

impl<K: InventoryKey> Clone for InventoryPool<K> {
    fn clone(&self) -> Self {
        Self {
            units: Arc::clone(&self.units),
        }
    }
}

impl<K: InventoryKey> Default for InventoryPool<K> {
    fn default() -> Self {
        Self {
            units: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<K: InventoryKey> InventoryPool<K> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a unit under `id`, replacing any previous one.
    pub async fn register(&self, id: K, unit: InventoryUnit) {
        tracing::debug!(kind = %K::KIND, %id, total = unit.total(), "inventory unit registered");
        self.units
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(unit)));
    }

    /// Returns the number of registered units.
    pub async fn unit_count(&self) -> usize {
        self.units.read().await.len()
    }

    /// Observes the current capacity and price of a unit.
    pub async fn availability(&self, id: K) -> Result<Availability> {
        let unit = self.unit(id).await?;
        let unit = unit.lock().await;
        Ok(unit.availability())
    }

    /// Reserves `count` places, returning the remaining capacity.
    ///
    /// The capacity check and the decrement happen under the unit's lock.
    pub async fn reserve(&self, id: K, count: u32) -> Result<u32> {
        if count == 0 {
            return Err(InventoryError::InvalidQuantity);
        }

        let unit = self.unit(id).await?;
        let mut unit = unit.lock().await;

        let remaining = unit
            .reserve(count)
            .map_err(|shortfall| InventoryError::InsufficientCapacity {
                kind: K::KIND,
                id: id.to_string(),
                requested: shortfall.requested,
                available: shortfall.available,
            })?;

        tracing::info!(
            kind = %K::KIND,
            %id,
            reserved = count,
            remaining,
            "inventory reserved"
        );
        Ok(remaining)
    }

    async fn unit(&self, id: K) -> Result<Arc<Mutex<InventoryUnit>>> {
        self.units
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| InventoryError::NotFound {
                kind: K::KIND,
                id: id.to_string(),
            })
    }
}
