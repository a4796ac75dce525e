//! Booking record and its lifecycle transitions.

use chrono::{DateTime, NaiveDate, Utc};
use common::{BookingId, FlightId, HotelId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::{BookingStatus, CostBreakdown, CreateBooking};

/// A user's paired flight + hotel purchase.
///
/// Costs are fixed when the booking is created. Status only moves out of
/// `Pending` through [`Booking::confirm`] or [`Booking::fail`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    user_id: UserId,
    flight_id: FlightId,
    hotel_id: HotelId,
    travel_date: NaiveDate,
    nights: u32,
    passengers: u32,
    costs: CostBreakdown,
    status: BookingStatus,
    created_at: DateTime<Utc>,
    confirmed_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Creates a pending booking for a request priced at `costs`.
    pub fn pending(request: &CreateBooking, costs: CostBreakdown, created_at: DateTime<Utc>) -> Self {
        Self {
            id: BookingId::new(),
            user_id: request.user_id,
            flight_id: request.flight_id,
            hotel_id: request.hotel_id,
            travel_date: request.travel_date,
            nights: request.nights,
            passengers: request.passengers,
            costs,
            status: BookingStatus::Pending,
            created_at,
            confirmed_at: None,
        }
    }

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn flight_id(&self) -> FlightId {
        self.flight_id
    }

    pub fn hotel_id(&self) -> HotelId {
        self.hotel_id
    }

    pub fn travel_date(&self) -> NaiveDate {
        self.travel_date
    }

    pub fn nights(&self) -> u32 {
        self.nights
    }

    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    pub fn costs(&self) -> CostBreakdown {
        self.costs
    }

    pub fn flight_cost(&self) -> f64 {
        self.costs.flight_cost()
    }

    pub fn hotel_cost(&self) -> f64 {
        self.costs.hotel_cost()
    }

    pub fn total_cost(&self) -> f64 {
        self.costs.total_cost()
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        self.confirmed_at
    }

    /// Marks the booking confirmed at `at`.
    ///
    /// The confirmation time never precedes the creation time.
    pub fn confirm(&mut self, at: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.status.can_confirm() {
            return Err(DomainError::InvalidStateTransition {
                current: self.status,
                action: "confirm",
            });
        }

        self.status = BookingStatus::Confirmed;
        self.confirmed_at = Some(at.max(self.created_at));
        Ok(())
    }

    /// Marks the booking failed after an unsuccessful confirmation.
    pub fn fail(&mut self) -> Result<(), DomainError> {
        if !self.status.can_fail() {
            return Err(DomainError::InvalidStateTransition {
                current: self.status,
                action: "fail",
            });
        }

        self.status = BookingStatus::Failed;
        Ok(())
    }
}

/// Flat persisted layout of a [`Booking`], used by storage backends.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    pub id: BookingId,
    pub user_id: UserId,
    pub flight_id: FlightId,
    pub hotel_id: HotelId,
    pub travel_date: NaiveDate,
    pub nights: u32,
    pub passengers: u32,
    pub flight_cost: f64,
    pub hotel_cost: f64,
    pub total_cost: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl From<&Booking> for BookingRecord {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            user_id: booking.user_id,
            flight_id: booking.flight_id,
            hotel_id: booking.hotel_id,
            travel_date: booking.travel_date,
            nights: booking.nights,
            passengers: booking.passengers,
            flight_cost: booking.flight_cost(),
            hotel_cost: booking.hotel_cost(),
            total_cost: booking.total_cost(),
            status: booking.status,
            created_at: booking.created_at,
            confirmed_at: booking.confirmed_at,
        }
    }
}

impl From<BookingRecord> for Booking {
    fn from(record: BookingRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            flight_id: record.flight_id,
            hotel_id: record.hotel_id,
            travel_date: record.travel_date,
            nights: record.nights,
            passengers: record.passengers,
            costs: CostBreakdown::from_parts(
                record.flight_cost,
                record.hotel_cost,
                record.total_cost,
            ),
            status: record.status,
            created_at: record.created_at,
            confirmed_at: record.confirmed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn pending_booking() -> Booking {
        let request = CreateBooking::new(
            UserId::new(1),
            FlightId::new(10),
            HotelId::new(20),
            NaiveDate::from_ymd_opt(2031, 3, 14).unwrap(),
            3,
            2,
        );
        Booking::pending(&request, CostBreakdown::quote(100.0, 2, 50.0, 3), Utc::now())
    }

    #[test]
    fn test_pending_booking_copies_request() {
        let booking = pending_booking();
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.user_id(), UserId::new(1));
        assert_eq!(booking.flight_id(), FlightId::new(10));
        assert_eq!(booking.hotel_id(), HotelId::new(20));
        assert_eq!(booking.nights(), 3);
        assert_eq!(booking.passengers(), 2);
        assert_eq!(booking.total_cost(), 350.0);
        assert!(booking.confirmed_at().is_none());
    }

    #[test]
    fn test_confirm_sets_timestamp() {
        let mut booking = pending_booking();
        let at = booking.created_at() + Duration::seconds(5);
        booking.confirm(at).unwrap();

        assert_eq!(booking.status(), BookingStatus::Confirmed);
        assert_eq!(booking.confirmed_at(), Some(at));
    }

    #[test]
    fn test_confirm_never_precedes_creation() {
        let mut booking = pending_booking();
        let earlier = booking.created_at() - Duration::seconds(30);
        booking.confirm(earlier).unwrap();

        assert_eq!(booking.confirmed_at(), Some(booking.created_at()));
    }

    #[test]
    fn test_confirm_twice_is_rejected() {
        let mut booking = pending_booking();
        booking.confirm(Utc::now()).unwrap();

        let err = booking.confirm(Utc::now()).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidStateTransition {
                current: BookingStatus::Confirmed,
                action: "confirm",
            }
        );
    }

    #[test]
    fn test_fail_leaves_costs_and_timestamp() {
        let mut booking = pending_booking();
        booking.fail().unwrap();

        assert_eq!(booking.status(), BookingStatus::Failed);
        assert!(booking.confirmed_at().is_none());
        assert_eq!(booking.total_cost(), 350.0);
        assert!(booking.confirm(Utc::now()).is_err());
    }

    #[test]
    fn test_record_conversion_preserves_fields() {
        let mut booking = pending_booking();
        booking.confirm(Utc::now()).unwrap();

        let record = BookingRecord::from(&booking);
        assert_eq!(record.status, BookingStatus::Confirmed);
        assert_eq!(record.flight_cost, 200.0);

        let restored = Booking::from(record);
        assert_eq!(restored, booking);
    }
}
