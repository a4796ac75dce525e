//! HTTP clients for the user, flight, hotel and notification services.

use async_trait::async_trait;
use common::{FlightId, HotelId, UserId};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::identity::IdentityGateway;
use super::inventory::{FlightAvailability, HotelAvailability, InventoryGateway};
use super::notification::{Notification, NotificationGateway};
use crate::error::GatewayError;

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Unavailable(format!("request timed out: {err}"))
    } else if err.is_decode() {
        GatewayError::InvalidResponse(err.to_string())
    } else {
        GatewayError::Unavailable(err.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Passes 2xx responses through and turns everything else into a
/// [`GatewayError`] carrying the service's own message when it sent one.
async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.error.or(body.message))
        .unwrap_or(text);

    Err(match status {
        StatusCode::NOT_FOUND => GatewayError::NotFound(message),
        _ => GatewayError::Rejected {
            status: status.as_u16(),
            message,
        },
    })
}

fn trim_base(url: impl Into<String>) -> String {
    url.into().trim_end_matches('/').to_string()
}

// -- Identity --

/// Client for the user service.
#[derive(Debug, Clone)]
pub struct HttpIdentityGateway {
    client: Client,
    base_url: String,
}

impl HttpIdentityGateway {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
        }
    }
}

#[async_trait]
impl IdentityGateway for HttpIdentityGateway {
    #[tracing::instrument(skip(self))]
    async fn validate_user(&self, user_id: UserId) -> Result<(), GatewayError> {
        let response = self
            .client
            .get(format!("{}/api/users/validate/{user_id}", self.base_url))
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response).await?;
        Ok(())
    }
}

// -- Inventory --

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlightAvailabilityDto {
    #[serde(default)]
    flight_number: String,
    available: bool,
    available_seats: u32,
    price_per_seat: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HotelAvailabilityDto {
    #[serde(default)]
    hotel_name: String,
    available: bool,
    available_rooms: u32,
    price_per_night: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeatReservationDto {
    number_of_seats: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoomReservationDto {
    number_of_rooms: u32,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlightDataDto {
    available_seats: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HotelDataDto {
    available_rooms: u32,
}

/// Client for the flight and hotel services.
#[derive(Debug, Clone)]
pub struct HttpInventoryGateway {
    client: Client,
    flight_base_url: String,
    hotel_base_url: String,
}

impl HttpInventoryGateway {
    pub fn new(
        client: Client,
        flight_base_url: impl Into<String>,
        hotel_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            flight_base_url: trim_base(flight_base_url),
            hotel_base_url: trim_base(hotel_base_url),
        }
    }
}

#[async_trait]
impl InventoryGateway for HttpInventoryGateway {
    #[tracing::instrument(skip(self))]
    async fn flight_availability(
        &self,
        flight_id: FlightId,
    ) -> Result<FlightAvailability, GatewayError> {
        let response = self
            .client
            .get(format!(
                "{}/api/flights/check-availability/{flight_id}",
                self.flight_base_url
            ))
            .send()
            .await
            .map_err(transport_error)?;

        let dto: FlightAvailabilityDto = check_status(response)
            .await?
            .json()
            .await
            .map_err(transport_error)?;

        Ok(FlightAvailability {
            flight_id,
            flight_number: dto.flight_number,
            available: dto.available,
            available_seats: dto.available_seats,
            price_per_seat: dto.price_per_seat,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn hotel_availability(
        &self,
        hotel_id: HotelId,
    ) -> Result<HotelAvailability, GatewayError> {
        let response = self
            .client
            .get(format!(
                "{}/api/hotels/check-availability/{hotel_id}",
                self.hotel_base_url
            ))
            .send()
            .await
            .map_err(transport_error)?;

        let dto: HotelAvailabilityDto = check_status(response)
            .await?
            .json()
            .await
            .map_err(transport_error)?;

        Ok(HotelAvailability {
            hotel_id,
            hotel_name: dto.hotel_name,
            available: dto.available,
            available_rooms: dto.available_rooms,
            price_per_night: dto.price_per_night,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn reserve_flight_seats(
        &self,
        flight_id: FlightId,
        seats: u32,
    ) -> Result<u32, GatewayError> {
        let response = self
            .client
            .put(format!(
                "{}/api/flights/{flight_id}/reserve",
                self.flight_base_url
            ))
            .json(&SeatReservationDto {
                number_of_seats: seats,
            })
            .send()
            .await
            .map_err(transport_error)?;

        let body: Envelope<FlightDataDto> = check_status(response)
            .await?
            .json()
            .await
            .map_err(transport_error)?;

        Ok(body.data.available_seats)
    }

    #[tracing::instrument(skip(self))]
    async fn reserve_hotel_rooms(
        &self,
        hotel_id: HotelId,
        rooms: u32,
    ) -> Result<u32, GatewayError> {
        let response = self
            .client
            .put(format!(
                "{}/api/hotels/{hotel_id}/reserve",
                self.hotel_base_url
            ))
            .json(&RoomReservationDto {
                number_of_rooms: rooms,
            })
            .send()
            .await
            .map_err(transport_error)?;

        let body: Envelope<HotelDataDto> = check_status(response)
            .await?
            .json()
            .await
            .map_err(transport_error)?;

        Ok(body.data.available_rooms)
    }
}

// -- Notification --

/// Client for the notification service.
#[derive(Debug, Clone)]
pub struct HttpNotificationGateway {
    client: Client,
    base_url: String,
}

impl HttpNotificationGateway {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
        }
    }
}

#[async_trait]
impl NotificationGateway for HttpNotificationGateway {
    #[tracing::instrument(skip(self, notification), fields(user_id = %notification.user_id))]
    async fn send(&self, notification: &Notification) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(format!("{}/api/notifications/send", self.base_url))
            .json(notification)
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let gateway = HttpIdentityGateway::new(Client::new(), "http://localhost:8081/");
        assert_eq!(gateway.base_url, "http://localhost:8081");
    }

    #[test]
    fn test_error_body_prefers_error_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"Flight not found with id: 9"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("Flight not found with id: 9"));
        assert!(body.message.is_none());
    }
}
