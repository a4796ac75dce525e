//! Flight and hotel inventory HTTP endpoints.
//!
//! These mirror the collaborator services' availability and reservation
//! contract, so the orchestrator's HTTP gateways can be exercised against
//! a real server.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use common::{FlightId, HotelId};
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;
use crate::pool::{FlightInventory, HotelInventory};
use crate::unit::{Availability, UnitKind};

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            InventoryError::NotFound { .. } => StatusCode::NOT_FOUND,
            InventoryError::InsufficientCapacity { .. } => StatusCode::CONFLICT,
            InventoryError::InvalidQuantity => StatusCode::BAD_REQUEST,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

fn availability_message(kind: UnitKind, availability: &Availability) -> String {
    if availability.available {
        format!(
            "{} {} available",
            availability.available_units,
            kind.unit_name()
        )
    } else {
        format!("No {} available", kind.unit_name())
    }
}

// -- Flight service --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightAvailabilityResponse {
    pub flight_id: i64,
    pub flight_number: String,
    pub available: bool,
    pub available_seats: u32,
    pub price_per_seat: f64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatReservationRequest {
    pub number_of_seats: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightData {
    pub id: i64,
    pub flight_number: String,
    pub price_per_seat: f64,
    pub total_seats: u32,
    pub available_seats: u32,
}

#[derive(Debug, Serialize)]
pub struct FlightReservationResponse {
    pub success: bool,
    pub message: String,
    pub data: FlightData,
}

/// Builds the flight service router over `inventory`.
pub fn flight_routes(inventory: FlightInventory) -> Router {
    Router::new()
        .route(
            "/api/flights/check-availability/{id}",
            get(check_flight_availability),
        )
        .route("/api/flights/{id}/reserve", put(reserve_seats))
        .with_state(inventory)
}

/// GET /api/flights/check-availability/{id}
#[tracing::instrument(skip(inventory))]
async fn check_flight_availability(
    State(inventory): State<FlightInventory>,
    Path(id): Path<i64>,
) -> Result<Json<FlightAvailabilityResponse>, InventoryError> {
    let availability = inventory.availability(FlightId::new(id)).await?;

    Ok(Json(FlightAvailabilityResponse {
        flight_id: id,
        message: availability_message(UnitKind::Flight, &availability),
        flight_number: availability.label,
        available: availability.available,
        available_seats: availability.available_units,
        price_per_seat: availability.unit_price,
    }))
}

/// PUT /api/flights/{id}/reserve
#[tracing::instrument(skip(inventory, req))]
async fn reserve_seats(
    State(inventory): State<FlightInventory>,
    Path(id): Path<i64>,
    Json(req): Json<SeatReservationRequest>,
) -> Result<Json<FlightReservationResponse>, InventoryError> {
    let flight_id = FlightId::new(id);
    let remaining = inventory.reserve(flight_id, req.number_of_seats).await?;
    let availability = inventory.availability(flight_id).await?;

    Ok(Json(FlightReservationResponse {
        success: true,
        message: "Seats reserved successfully".to_string(),
        data: FlightData {
            id,
            flight_number: availability.label,
            price_per_seat: availability.unit_price,
            total_seats: availability.total_units,
            available_seats: remaining,
        },
    }))
}

// -- Hotel service --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelAvailabilityResponse {
    pub hotel_id: i64,
    pub hotel_name: String,
    pub available: bool,
    pub available_rooms: u32,
    pub price_per_night: f64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomReservationRequest {
    pub number_of_rooms: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelData {
    pub id: i64,
    pub hotel_name: String,
    pub price_per_night: f64,
    pub total_rooms: u32,
    pub available_rooms: u32,
}

#[derive(Debug, Serialize)]
pub struct HotelReservationResponse {
    pub success: bool,
    pub message: String,
    pub data: HotelData,
}

/// Builds the hotel service router over `inventory`.
pub fn hotel_routes(inventory: HotelInventory) -> Router {
    Router::new()
        .route(
            "/api/hotels/check-availability/{id}",
            get(check_hotel_availability),
        )
        .route("/api/hotels/{id}/reserve", put(reserve_rooms))
        .with_state(inventory)
}

/// GET /api/hotels/check-availability/{id}
#[tracing::instrument(skip(inventory))]
async fn check_hotel_availability(
    State(inventory): State<HotelInventory>,
    Path(id): Path<i64>,
) -> Result<Json<HotelAvailabilityResponse>, InventoryError> {
    let availability = inventory.availability(HotelId::new(id)).await?;

    Ok(Json(HotelAvailabilityResponse {
        hotel_id: id,
        message: availability_message(UnitKind::Hotel, &availability),
        hotel_name: availability.label,
        available: availability.available,
        available_rooms: availability.available_units,
        price_per_night: availability.unit_price,
    }))
}

/// PUT /api/hotels/{id}/reserve
#[tracing::instrument(skip(inventory, req))]
async fn reserve_rooms(
    State(inventory): State<HotelInventory>,
    Path(id): Path<i64>,
    Json(req): Json<RoomReservationRequest>,
) -> Result<Json<HotelReservationResponse>, InventoryError> {
    let hotel_id = HotelId::new(id);
    let remaining = inventory.reserve(hotel_id, req.number_of_rooms).await?;
    let availability = inventory.availability(hotel_id).await?;

    Ok(Json(HotelReservationResponse {
        success: true,
        message: "Rooms reserved successfully".to_string(),
        data: HotelData {
            id,
            hotel_name: availability.label,
            price_per_night: availability.unit_price,
            total_rooms: availability.total_units,
            available_rooms: remaining,
        },
    }))
}
