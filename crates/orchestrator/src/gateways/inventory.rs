//! Inventory service trait and in-memory implementation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use ::inventory::{FlightInventory, HotelInventory, InventoryUnit};
use async_trait::async_trait;
use common::{FlightId, HotelId};

use crate::error::GatewayError;

/// Flight availability as reported by the flight service.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightAvailability {
    pub flight_id: FlightId,
    pub flight_number: String,
    pub available: bool,
    pub available_seats: u32,
    pub price_per_seat: f64,
}

/// Hotel availability as reported by the hotel service.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelAvailability {
    pub hotel_id: HotelId,
    pub hotel_name: String,
    pub available: bool,
    pub available_rooms: u32,
    pub price_per_night: f64,
}

/// Checks and reserves capacity in the flight and hotel services.
///
/// Availability answers are observations only. Nothing is held until a
/// reserve call succeeds.
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    async fn flight_availability(
        &self,
        flight_id: FlightId,
    ) -> Result<FlightAvailability, GatewayError>;

    async fn hotel_availability(&self, hotel_id: HotelId)
    -> Result<HotelAvailability, GatewayError>;

    /// Reserves seats, returning the seats left afterwards.
    async fn reserve_flight_seats(&self, flight_id: FlightId, seats: u32)
    -> Result<u32, GatewayError>;

    /// Reserves rooms, returning the rooms left afterwards.
    async fn reserve_hotel_rooms(&self, hotel_id: HotelId, rooms: u32)
    -> Result<u32, GatewayError>;
}

#[async_trait]
impl<T: InventoryGateway + ?Sized> InventoryGateway for Arc<T> {
    async fn flight_availability(
        &self,
        flight_id: FlightId,
    ) -> Result<FlightAvailability, GatewayError> {
        (**self).flight_availability(flight_id).await
    }

    async fn hotel_availability(
        &self,
        hotel_id: HotelId,
    ) -> Result<HotelAvailability, GatewayError> {
        (**self).hotel_availability(hotel_id).await
    }

    async fn reserve_flight_seats(
        &self,
        flight_id: FlightId,
        seats: u32,
    ) -> Result<u32, GatewayError> {
        (**self).reserve_flight_seats(flight_id, seats).await
    }

    async fn reserve_hotel_rooms(
        &self,
        hotel_id: HotelId,
        rooms: u32,
    ) -> Result<u32, GatewayError> {
        (**self).reserve_hotel_rooms(hotel_id, rooms).await
    }
}

#[derive(Debug, Default)]
struct Knobs {
    fail_on_flight_reserve: bool,
    fail_on_hotel_reserve: bool,
    unreachable: bool,
    latency: Option<Duration>,
}

#[derive(Debug, Default)]
struct CallCounts {
    availability: AtomicUsize,
    flight_reservations: AtomicUsize,
    hotel_reservations: AtomicUsize,
}

/// In-memory flight and hotel services for testing.
///
/// Backed by real [`InventoryPool`](::inventory::InventoryPool)s, so capacity
/// checks and decrements behave like the services themselves.
#[derive(Clone, Default)]
pub struct InMemoryInventoryGateway {
    flights: FlightInventory,
    hotels: HotelInventory,
    knobs: Arc<Mutex<Knobs>>,
    calls: Arc<CallCounts>,
}

impl InMemoryInventoryGateway {
    /// Creates a gateway with empty flight and hotel pools.
    pub fn new() -> Self {
        Self::default()
    }

    /// The flight pool behind this gateway.
    pub fn flights(&self) -> &FlightInventory {
        &self.flights
    }

    /// The hotel pool behind this gateway.
    pub fn hotels(&self) -> &HotelInventory {
        &self.hotels
    }

    /// Registers a flight with all seats free.
    pub async fn add_flight(
        &self,
        flight_id: FlightId,
        flight_number: &str,
        seats: u32,
        price_per_seat: f64,
    ) {
        self.flights
            .register(
                flight_id,
                InventoryUnit::new(flight_number, seats, price_per_seat),
            )
            .await;
    }

    /// Registers a hotel with all rooms free.
    pub async fn add_hotel(
        &self,
        hotel_id: HotelId,
        hotel_name: &str,
        rooms: u32,
        price_per_night: f64,
    ) {
        self.hotels
            .register(hotel_id, InventoryUnit::new(hotel_name, rooms, price_per_night))
            .await;
    }

    /// Makes flight reservations fail with a service error.
    pub fn set_fail_on_flight_reserve(&self, fail: bool) {
        self.knobs().fail_on_flight_reserve = fail;
    }

    /// Makes hotel reservations fail with a service error.
    pub fn set_fail_on_hotel_reserve(&self, fail: bool) {
        self.knobs().fail_on_hotel_reserve = fail;
    }

    /// Makes every call fail as if both services were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.knobs().unreachable = unreachable;
    }

    /// Delays every answer by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.knobs().latency = latency;
    }

    /// Number of availability lookups received.
    pub fn availability_calls(&self) -> usize {
        self.calls.availability.load(Ordering::SeqCst)
    }

    /// Number of flight reservation calls received.
    pub fn flight_reservation_calls(&self) -> usize {
        self.calls.flight_reservations.load(Ordering::SeqCst)
    }

    /// Number of hotel reservation calls received.
    pub fn hotel_reservation_calls(&self) -> usize {
        self.calls.hotel_reservations.load(Ordering::SeqCst)
    }

    fn knobs(&self) -> MutexGuard<'_, Knobs> {
        self.knobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies latency and reachability, then reports whether a forced
    /// reservation failure applies.
    async fn simulate(&self, forced: impl Fn(&Knobs) -> bool) -> Result<bool, GatewayError> {
        let (latency, unreachable, fail) = {
            let knobs = self.knobs();
            (knobs.latency, knobs.unreachable, forced(&knobs))
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if unreachable {
            return Err(GatewayError::Unavailable(
                "inventory service unreachable".to_string(),
            ));
        }

        Ok(fail)
    }
}

#[async_trait]
impl InventoryGateway for InMemoryInventoryGateway {
    async fn flight_availability(
        &self,
        flight_id: FlightId,
    ) -> Result<FlightAvailability, GatewayError> {
        self.calls.availability.fetch_add(1, Ordering::SeqCst);
        self.simulate(|_| false).await?;

        let availability = self.flights.availability(flight_id).await?;
        Ok(FlightAvailability {
            flight_id,
            flight_number: availability.label,
            available: availability.available,
            available_seats: availability.available_units,
            price_per_seat: availability.unit_price,
        })
    }

    async fn hotel_availability(
        &self,
        hotel_id: HotelId,
    ) -> Result<HotelAvailability, GatewayError> {
        self.calls.availability.fetch_add(1, Ordering::SeqCst);
        self.simulate(|_| false).await?;

        let availability = self.hotels.availability(hotel_id).await?;
        Ok(HotelAvailability {
            hotel_id,
            hotel_name: availability.label,
            available: availability.available,
            available_rooms: availability.available_units,
            price_per_night: availability.unit_price,
        })
    }

    async fn reserve_flight_seats(
        &self,
        flight_id: FlightId,
        seats: u32,
    ) -> Result<u32, GatewayError> {
        self.calls.flight_reservations.fetch_add(1, Ordering::SeqCst);

        if self.simulate(|k| k.fail_on_flight_reserve).await? {
            return Err(GatewayError::Rejected {
                status: 500,
                message: "flight service error".to_string(),
            });
        }

        Ok(self.flights.reserve(flight_id, seats).await?)
    }

    async fn reserve_hotel_rooms(
        &self,
        hotel_id: HotelId,
        rooms: u32,
    ) -> Result<u32, GatewayError> {
        self.calls.hotel_reservations.fetch_add(1, Ordering::SeqCst);

        if self.simulate(|k| k.fail_on_hotel_reserve).await? {
            return Err(GatewayError::Rejected {
                status: 500,
                message: "hotel service error".to_string(),
            });
        }

        Ok(self.hotels.reserve(hotel_id, rooms).await?)
    }
}
