//! Fire-and-forget notification delivery.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use common::BookingId;
use tokio::sync::mpsc;

use crate::error::GatewayError;
use crate::gateways::{Notification, NotificationGateway};

/// A notification the service did not accept.
#[derive(Debug)]
pub struct NotificationFailure {
    pub booking_id: BookingId,
    pub notification: Notification,
    pub error: GatewayError,
}

/// Sends notifications on detached tasks.
///
/// Callers never wait for delivery. Failures go to an error channel whose
/// only consumer logs and counts them.
pub struct NotificationDispatcher<N> {
    gateway: Arc<N>,
    timeout: Duration,
    failures: mpsc::UnboundedSender<NotificationFailure>,
    failed: Arc<AtomicU64>,
}

impl<N: NotificationGateway + 'static> NotificationDispatcher<N> {
    /// Creates the dispatcher and spawns its failure drain.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(gateway: N, timeout: Duration) -> Self {
        let (failures, mut rx) = mpsc::unbounded_channel::<NotificationFailure>();
        let failed = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&failed);
        tokio::spawn(async move {
            while let Some(failure) = rx.recv().await {
                counter.fetch_add(1, Ordering::SeqCst);
                metrics::counter!("booking_notifications_failed_total").increment(1);
                tracing::warn!(
                    booking_id = %failure.booking_id,
                    user_id = %failure.notification.user_id,
                    error = %failure.error,
                    "booking notification failed"
                );
            }
        });

        Self {
            gateway: Arc::new(gateway),
            timeout,
            failures,
            failed,
        }
    }

    /// Queues `notification` for delivery and returns immediately.
    pub fn dispatch(&self, booking_id: BookingId, notification: Notification) {
        let gateway = Arc::clone(&self.gateway);
        let failures = self.failures.clone();
        let timeout = self.timeout;

        tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, gateway.send(&notification)).await {
                Ok(result) => result,
                Err(_) => Err(GatewayError::Timeout(timeout)),
            };

            if let Err(error) = result {
                // The drain only stops once the dispatcher is gone.
                let _ = failures.send(NotificationFailure {
                    booking_id,
                    notification,
                    error,
                });
            }
        });
    }

    /// Number of notifications that failed so far.
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::SeqCst)
    }
}
