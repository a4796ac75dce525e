//! Booking record and related types.

mod aggregate;
mod commands;
mod state;
mod value_objects;

pub use aggregate::{Booking, BookingRecord};
pub use commands::CreateBooking;
pub use state::BookingStatus;
pub use value_objects::CostBreakdown;
