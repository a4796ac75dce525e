//! The booking orchestrator: create and confirm bookings across services.

use std::future::Future;
use std::time::Instant;

use booking_store::{BookingStore, StoreError, UpdateOptions};
use chrono::Utc;
use common::{BookingId, UserId};
use domain::{Booking, BookingStatus, CostBreakdown, CreateBooking};

use crate::config::OrchestratorConfig;
use crate::dispatch::NotificationDispatcher;
use crate::error::{
    BookingError, GatewayError, InventoryKind, ReservationStep, Result, UnavailableReason,
};
use crate::gateways::{IdentityGateway, InventoryGateway, Notification, NotificationGateway};
use crate::locks::BookingLocks;

/// A reservation call that failed during confirmation.
#[derive(Debug)]
struct ReservationFailure {
    step: ReservationStep,
    source: GatewayError,
}

/// Coordinates identity, inventory, storage and notification for bookings.
///
/// Every operation is one sequential chain of calls. Confirmations of the
/// same booking are serialized by a per-booking lock, and the status write
/// is additionally conditional on the booking still being `PENDING`.
pub struct BookingOrchestrator<S, I, U, N>
where
    S: BookingStore,
    I: InventoryGateway,
    U: IdentityGateway,
    N: NotificationGateway + 'static,
{
    store: S,
    inventory: I,
    identity: U,
    notifier: NotificationDispatcher<N>,
    locks: BookingLocks,
    config: OrchestratorConfig,
}

impl<S, I, U, N> BookingOrchestrator<S, I, U, N>
where
    S: BookingStore,
    I: InventoryGateway,
    U: IdentityGateway,
    N: NotificationGateway + 'static,
{
    /// Creates a new orchestrator.
    ///
    /// Must be called from within a Tokio runtime, which hosts the
    /// notification tasks.
    pub fn new(
        store: S,
        inventory: I,
        identity: U,
        notifications: N,
        config: OrchestratorConfig,
    ) -> Self {
        let notifier = NotificationDispatcher::new(notifications, config.gateway_timeout);
        Self {
            store,
            inventory,
            identity,
            notifier,
            locks: BookingLocks::new(),
            config,
        }
    }

    /// Number of confirmation notifications that could not be delivered.
    pub fn notification_failures(&self) -> u64 {
        self.notifier.failed_count()
    }

    /// Creates a `PENDING` booking after checking the user and both inventories.
    ///
    /// Inventory is only observed here, never reserved. Nothing is written
    /// unless every check passes.
    #[tracing::instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn create_booking(&self, request: CreateBooking) -> Result<Booking> {
        let start = Instant::now();

        request.validate(Utc::now().date_naive())?;

        tracing::info!(step = "validate_user", "checking user");
        self.call(self.identity.validate_user(request.user_id))
            .await
            .map_err(|source| BookingError::UserValidationFailed {
                user_id: request.user_id,
                source,
            })?;

        tracing::info!(step = "flight_availability", flight_id = %request.flight_id, "checking flight");
        let flight = self
            .call(self.inventory.flight_availability(request.flight_id))
            .await
            .map_err(|e| unavailable(InventoryKind::Flight, UnavailableReason::Lookup(e)))?;
        check_capacity(
            InventoryKind::Flight,
            flight.available,
            flight.available_seats,
            request.passengers,
        )?;

        tracing::info!(step = "hotel_availability", hotel_id = %request.hotel_id, "checking hotel");
        let hotel = self
            .call(self.inventory.hotel_availability(request.hotel_id))
            .await
            .map_err(|e| unavailable(InventoryKind::Hotel, UnavailableReason::Lookup(e)))?;
        check_capacity(
            InventoryKind::Hotel,
            hotel.available,
            hotel.available_rooms,
            1,
        )?;

        let costs = CostBreakdown::quote(
            flight.price_per_seat,
            request.passengers,
            hotel.price_per_night,
            request.nights,
        );
        let booking = Booking::pending(&request, costs, Utc::now());
        self.store.create(&booking).await?;

        metrics::counter!("bookings_created_total").increment(1);
        metrics::histogram!("booking_operation_duration_seconds", "operation" => "create")
            .record(start.elapsed().as_secs_f64());
        tracing::info!(
            booking_id = %booking.id(),
            total_cost = booking.total_cost(),
            "booking created"
        );

        Ok(booking)
    }

    /// Confirms a `PENDING` booking by reserving its seats and room.
    ///
    /// Bookings that are already `CONFIRMED` or `FAILED` are returned
    /// unchanged without contacting inventory. A failed reservation marks
    /// the booking `FAILED` and is returned as
    /// [`BookingError::ConfirmationFailed`].
    ///
    /// If the `CONFIRMED` write fails after both reservations succeeded, the
    /// booking is marked `FAILED` and the store error is returned. If another
    /// writer settled the booking first, the stored booking is returned.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_booking(&self, booking_id: BookingId) -> Result<Booking> {
        let start = Instant::now();
        let _guard = self.locks.acquire(booking_id).await;

        let mut booking = self
            .store
            .get(booking_id)
            .await?
            .ok_or(BookingError::BookingNotFound(booking_id))?;

        if !booking.status().can_confirm() {
            tracing::warn!(
                status = %booking.status(),
                "booking already processed, confirmation ignored"
            );
            return Ok(booking);
        }

        let outcome = self.reserve_inventory(&booking).await;

        match outcome {
            Ok(()) => {
                let pending = booking.clone();
                booking.confirm(Utc::now())?;
                match self
                    .store
                    .update(&booking, UpdateOptions::expect_status(BookingStatus::Pending))
                    .await
                {
                    Ok(()) => {}
                    Err(StoreError::StatusConflict { actual, .. }) => {
                        tracing::warn!(
                            status = %actual,
                            flight_id = %booking.flight_id(),
                            seats = booking.passengers(),
                            hotel_id = %booking.hotel_id(),
                            rooms = 1,
                            "booking settled by another writer; reserved seats and room are not released"
                        );
                        return self.get_booking(booking_id).await;
                    }
                    Err(err) => {
                        tracing::warn!(
                            error = %err,
                            flight_id = %booking.flight_id(),
                            seats = booking.passengers(),
                            hotel_id = %booking.hotel_id(),
                            rooms = 1,
                            "could not record confirmation; reserved seats and room are held"
                        );
                        self.record_failure(pending).await;
                        metrics::counter!("booking_confirmations_failed_total").increment(1);
                        return Err(err.into());
                    }
                }

                metrics::counter!("bookings_confirmed_total").increment(1);
                metrics::histogram!("booking_operation_duration_seconds", "operation" => "confirm")
                    .record(start.elapsed().as_secs_f64());
                tracing::info!(total_cost = booking.total_cost(), "booking confirmed");

                self.notify_confirmed(&booking);
                Ok(booking)
            }
            Err(failure) => {
                tracing::warn!(
                    step = %failure.step,
                    error = %failure.source,
                    "booking confirmation failed"
                );
                self.record_failure(booking).await;

                metrics::counter!("booking_confirmations_failed_total").increment(1);
                metrics::histogram!("booking_operation_duration_seconds", "operation" => "confirm")
                    .record(start.elapsed().as_secs_f64());

                Err(BookingError::ConfirmationFailed {
                    booking_id,
                    step: failure.step,
                    source: failure.source,
                })
            }
        }
    }

    /// Loads a booking by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_booking(&self, booking_id: BookingId) -> Result<Booking> {
        self.store
            .get(booking_id)
            .await?
            .ok_or(BookingError::BookingNotFound(booking_id))
    }

    /// All bookings of a user, in the order they were created.
    #[tracing::instrument(skip(self))]
    pub async fn get_user_bookings(&self, user_id: UserId) -> Result<Vec<Booking>> {
        Ok(self.store.get_by_user(user_id).await?)
    }

    /// Reserves flight seats, then one hotel room.
    ///
    /// Stops at the first failure. Seats already reserved when the hotel
    /// step fails are not released.
    async fn reserve_inventory(
        &self,
        booking: &Booking,
    ) -> std::result::Result<(), ReservationFailure> {
        tracing::info!(step = %ReservationStep::FlightSeats, seats = booking.passengers(), "reserving");
        let remaining_seats = self
            .call(
                self.inventory
                    .reserve_flight_seats(booking.flight_id(), booking.passengers()),
            )
            .await
            .map_err(|source| ReservationFailure {
                step: ReservationStep::FlightSeats,
                source,
            })?;
        tracing::debug!(remaining_seats, "flight seats reserved");

        tracing::info!(step = %ReservationStep::HotelRoom, rooms = 1, "reserving");
        match self
            .call(self.inventory.reserve_hotel_rooms(booking.hotel_id(), 1))
            .await
        {
            Ok(remaining_rooms) => {
                tracing::debug!(remaining_rooms, "hotel room reserved");
                Ok(())
            }
            Err(source) => {
                tracing::warn!(
                    flight_id = %booking.flight_id(),
                    seats = booking.passengers(),
                    "hotel reservation failed after flight seats were reserved; seats stay reserved"
                );
                Err(ReservationFailure {
                    step: ReservationStep::HotelRoom,
                    source,
                })
            }
        }
    }

    /// Moves a `PENDING` booking to `FAILED`, so a retried confirmation
    /// cannot reserve a second time.
    ///
    /// A write that loses to another writer or fails outright is logged.
    async fn record_failure(&self, mut booking: Booking) {
        if let Err(err) = booking.fail() {
            tracing::error!(error = %err, "booking cannot be marked failed");
            return;
        }
        if let Err(err) = self
            .store
            .update(&booking, UpdateOptions::expect_status(BookingStatus::Pending))
            .await
        {
            tracing::error!(error = %err, "could not record failed confirmation");
        }
    }

    fn notify_confirmed(&self, booking: &Booking) {
        let message = format!(
            "Your booking #{} has been CONFIRMED! Total: ${:.2}",
            booking.id(),
            booking.total_cost()
        );
        self.notifier.dispatch(
            booking.id(),
            Notification::new(booking.user_id(), message, self.config.notification_channel),
        );
    }

    /// Bounds a gateway call by the configured timeout.
    async fn call<T>(
        &self,
        future: impl Future<Output = std::result::Result<T, GatewayError>>,
    ) -> std::result::Result<T, GatewayError> {
        let timeout = self.config.gateway_timeout;
        tokio::time::timeout(timeout, future)
            .await
            .map_err(|_| GatewayError::Timeout(timeout))?
    }
}

fn unavailable(kind: InventoryKind, reason: UnavailableReason) -> BookingError {
    BookingError::InventoryUnavailable { kind, reason }
}

fn check_capacity(kind: InventoryKind, available: bool, free: u32, needed: u32) -> Result<()> {
    if !available {
        return Err(unavailable(kind, UnavailableReason::SoldOut));
    }
    if free < needed {
        return Err(unavailable(
            kind,
            UnavailableReason::Insufficient {
                requested: needed,
                available: free,
            },
        ));
    }
    Ok(())
}
