//! Booking endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, NaiveDate, Utc};
use common::{BookingId, FlightId, HotelId, UserId};
use domain::{Booking, CreateBooking};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub user_id: i64,
    pub flight_id: i64,
    pub hotel_id: i64,
    pub travel_date: NaiveDate,
    pub number_of_nights: u32,
    pub number_of_passengers: u32,
}

impl From<CreateBookingRequest> for CreateBooking {
    fn from(req: CreateBookingRequest) -> Self {
        CreateBooking::new(
            UserId::new(req.user_id),
            FlightId::new(req.flight_id),
            HotelId::new(req.hotel_id),
            req.travel_date,
            req.number_of_nights,
            req.number_of_passengers,
        )
    }
}

// -- Response types --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: String,
    pub user_id: i64,
    pub flight_id: i64,
    pub hotel_id: i64,
    pub travel_date: NaiveDate,
    pub number_of_nights: u32,
    pub number_of_passengers: u32,
    pub flight_cost: f64,
    pub hotel_cost: f64,
    pub total_cost: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id().to_string(),
            user_id: booking.user_id().value(),
            flight_id: booking.flight_id().value(),
            hotel_id: booking.hotel_id().value(),
            travel_date: booking.travel_date(),
            number_of_nights: booking.nights(),
            number_of_passengers: booking.passengers(),
            flight_cost: booking.flight_cost(),
            hotel_cost: booking.hotel_cost(),
            total_cost: booking.total_cost(),
            status: booking.status().to_string(),
            created_at: booking.created_at(),
            confirmed_at: booking.confirmed_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data,
        })
    }
}

fn parse_booking_id(id: &str) -> Result<BookingId, ApiError> {
    id.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid booking id '{id}': {e}")))
}

// -- Handlers --

/// POST /api/bookings: check the user and inventory, then create a PENDING booking.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), ApiError> {
    let booking = state.orchestrator.create_booking(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(
            "Booking created successfully. Status: PENDING. Please proceed to payment.",
            BookingResponse::from(&booking),
        ),
    ))
}

/// GET /api/bookings/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let booking_id = parse_booking_id(&id)?;
    let booking = state.orchestrator.get_booking(booking_id).await?;

    Ok(ApiResponse::ok(
        "Booking retrieved successfully",
        BookingResponse::from(&booking),
    ))
}

/// PUT /api/bookings/{id}/confirm: called by the payment service once paid.
#[tracing::instrument(skip(state))]
pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let booking_id = parse_booking_id(&id)?;
    let booking = state.orchestrator.confirm_booking(booking_id).await?;

    Ok(ApiResponse::ok(
        "Booking confirmed successfully",
        BookingResponse::from(&booking),
    ))
}

/// GET /api/bookings/user/{user_id}
#[tracing::instrument(skip(state))]
pub async fn list_for_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let bookings = state
        .orchestrator
        .get_user_bookings(UserId::new(user_id))
        .await?;

    Ok(Json(bookings.iter().map(BookingResponse::from).collect()))
}
