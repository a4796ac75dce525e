//! Booking orchestration for the travel platform.
//!
//! A booking is created by checking the user and observing flight and hotel
//! availability, then persisted as `PENDING`. After payment it is confirmed:
//! flight seats and a hotel room are reserved in that order, the booking
//! becomes `CONFIRMED` or `FAILED`, and the user is notified on a best-effort
//! basis.
//!
//! Collaborators are reached through the [`IdentityGateway`],
//! [`InventoryGateway`] and [`NotificationGateway`] traits. In-memory and
//! HTTP implementations of each are provided.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod gateways;
pub mod locks;
pub mod orchestrator;

pub use config::{DEFAULT_GATEWAY_TIMEOUT, OrchestratorConfig};
pub use dispatch::{NotificationDispatcher, NotificationFailure};
pub use error::{
    BookingError, GatewayError, InventoryKind, ReservationStep, Result, UnavailableReason,
};
pub use gateways::{
    FlightAvailability, HotelAvailability, HttpIdentityGateway, HttpInventoryGateway,
    HttpNotificationGateway, IdentityGateway, InMemoryIdentityGateway, InMemoryInventoryGateway,
    InMemoryNotificationGateway, InventoryGateway, Notification, NotificationChannel,
    NotificationGateway,
};
pub use locks::{BookingGuard, BookingLocks};
pub use orchestrator::BookingOrchestrator;
