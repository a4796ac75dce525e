//! Notification service trait and in-memory implementation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use common::UserId;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Delivery channel requested from the notification service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationChannel {
    #[default]
    Email,
    Sms,
}

/// A message addressed to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub user_id: UserId,
    pub message: String,
    #[serde(rename = "type")]
    pub channel: NotificationChannel,
}

impl Notification {
    pub fn new(user_id: UserId, message: impl Into<String>, channel: NotificationChannel) -> Self {
        Self {
            user_id,
            message: message.into(),
            channel,
        }
    }
}

/// Best-effort delivery of messages to users.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), GatewayError>;
}

#[async_trait]
impl<T: NotificationGateway + ?Sized> NotificationGateway for Arc<T> {
    async fn send(&self, notification: &Notification) -> Result<(), GatewayError> {
        (**self).send(notification).await
    }
}

#[derive(Debug, Default)]
struct InMemoryNotificationState {
    sent: Vec<Notification>,
    fail_on_send: bool,
}

/// In-memory notification service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationGateway {
    state: Arc<Mutex<InMemoryNotificationState>>,
}

impl InMemoryNotificationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to reject every message.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state().fail_on_send = fail;
    }

    /// Messages accepted so far, oldest first.
    pub fn sent(&self) -> Vec<Notification> {
        self.state().sent.clone()
    }

    fn state(&self) -> MutexGuard<'_, InMemoryNotificationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl NotificationGateway for InMemoryNotificationGateway {
    async fn send(&self, notification: &Notification) -> Result<(), GatewayError> {
        let mut state = self.state();

        if state.fail_on_send {
            return Err(GatewayError::Unavailable(
                "notification service unreachable".to_string(),
            ));
        }

        state.sent.push(notification.clone());
        Ok(())
    }
}
