//! Domain layer for the travel booking orchestrator.
//!
//! This crate provides:
//! - The `Booking` record and its `PENDING → {CONFIRMED, FAILED}` lifecycle
//! - The `CreateBooking` request with its precondition checks
//! - Cost computation for a flight + hotel quote

pub mod booking;
pub mod error;

pub use booking::{Booking, BookingRecord, BookingStatus, CostBreakdown, CreateBooking};
pub use error::{DomainError, ValidationError};
