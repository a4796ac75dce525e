//! Booking requests.

use chrono::NaiveDate;
use common::{FlightId, HotelId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Request to create a booking pairing one flight with one hotel stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBooking {
    /// The user making the booking.
    pub user_id: UserId,

    /// The flight to book seats on.
    pub flight_id: FlightId,

    /// The hotel to book a room in.
    pub hotel_id: HotelId,

    /// Departure date; must be strictly after today.
    pub travel_date: NaiveDate,

    /// Number of hotel nights.
    pub nights: u32,

    /// Number of flight seats.
    pub passengers: u32,
}

impl CreateBooking {
    /// Creates a new CreateBooking request.
    pub fn new(
        user_id: UserId,
        flight_id: FlightId,
        hotel_id: HotelId,
        travel_date: NaiveDate,
        nights: u32,
        passengers: u32,
    ) -> Self {
        Self {
            user_id,
            flight_id,
            hotel_id,
            travel_date,
            nights,
            passengers,
        }
    }

    /// Checks the request preconditions against the given current date.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.travel_date <= today {
            return Err(ValidationError::TravelDateNotInFuture {
                travel_date: self.travel_date,
                today,
            });
        }
        if self.nights < 1 {
            return Err(ValidationError::InvalidNights {
                nights: self.nights,
            });
        }
        if self.passengers < 1 {
            return Err(ValidationError::InvalidPassengers {
                passengers: self.passengers,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()
    }

    fn request(travel_date: NaiveDate, nights: u32, passengers: u32) -> CreateBooking {
        CreateBooking::new(
            UserId::new(1),
            FlightId::new(10),
            HotelId::new(20),
            travel_date,
            nights,
            passengers,
        )
    }

    #[test]
    fn test_valid_request() {
        let tomorrow = today().succ_opt().unwrap();
        assert!(request(tomorrow, 1, 1).validate(today()).is_ok());
    }

    #[test]
    fn test_travel_date_today_is_rejected() {
        let err = request(today(), 1, 1).validate(today()).unwrap_err();
        assert!(matches!(err, ValidationError::TravelDateNotInFuture { .. }));
    }

    #[test]
    fn test_travel_date_in_past_is_rejected() {
        let yesterday = today().pred_opt().unwrap();
        let err = request(yesterday, 2, 2).validate(today()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TravelDateNotInFuture {
                travel_date: yesterday,
                today: today(),
            }
        );
    }

    #[test]
    fn test_zero_nights_is_rejected() {
        let tomorrow = today().succ_opt().unwrap();
        let err = request(tomorrow, 0, 1).validate(today()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidNights { nights: 0 });
    }

    #[test]
    fn test_zero_passengers_is_rejected() {
        let tomorrow = today().succ_opt().unwrap();
        let err = request(tomorrow, 3, 0).validate(today()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPassengers { passengers: 0 });
    }
}
