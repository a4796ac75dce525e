//! Identity service trait and in-memory implementation.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use common::UserId;

use crate::error::GatewayError;

/// Confirms that a user exists.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Succeeds only if the user is known to the identity service.
    async fn validate_user(&self, user_id: UserId) -> Result<(), GatewayError>;
}

#[async_trait]
impl<T: IdentityGateway + ?Sized> IdentityGateway for Arc<T> {
    async fn validate_user(&self, user_id: UserId) -> Result<(), GatewayError> {
        (**self).validate_user(user_id).await
    }
}

#[derive(Debug, Default)]
struct InMemoryIdentityState {
    users: HashSet<UserId>,
    unreachable: bool,
    latency: Option<Duration>,
}

/// In-memory identity service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityGateway {
    state: Arc<Mutex<InMemoryIdentityState>>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryIdentityGateway {
    /// Creates a new in-memory identity service with no users.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a known user.
    pub fn register_user(&self, user_id: UserId) {
        self.state().users.insert(user_id);
    }

    /// Makes every call fail as if the service were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.state().unreachable = unreachable;
    }

    /// Delays every answer by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.state().latency = latency;
    }

    /// Returns the number of validation calls received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn state(&self) -> MutexGuard<'_, InMemoryIdentityState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl IdentityGateway for InMemoryIdentityGateway {
    async fn validate_user(&self, user_id: UserId) -> Result<(), GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let (latency, unreachable, known) = {
            let state = self.state();
            (
                state.latency,
                state.unreachable,
                state.users.contains(&user_id),
            )
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if unreachable {
            return Err(GatewayError::Unavailable(
                "user service unreachable".to_string(),
            ));
        }

        if !known {
            return Err(GatewayError::NotFound(format!(
                "User not found with id: {user_id}"
            )));
        }

        Ok(())
    }
}
