//! Collaborator service traits with in-memory and HTTP implementations.

pub mod http;
pub mod identity;
pub mod inventory;
pub mod notification;

pub use self::http::{HttpIdentityGateway, HttpInventoryGateway, HttpNotificationGateway};
pub use self::identity::{IdentityGateway, InMemoryIdentityGateway};
pub use self::inventory::{
    FlightAvailability, HotelAvailability, InMemoryInventoryGateway, InventoryGateway,
};
pub use self::notification::{
    InMemoryNotificationGateway, Notification, NotificationChannel, NotificationGateway,
};
