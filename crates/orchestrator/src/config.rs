//! Orchestrator settings.

use std::time::Duration;

use crate::gateways::NotificationChannel;

/// Upper bound applied to every collaborator call.
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(5);

/// Runtime settings for [`BookingOrchestrator`](crate::BookingOrchestrator).
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Bound on each gateway call. Exceeding it fails that step.
    pub gateway_timeout: Duration,
    /// Channel used for confirmation notifications.
    pub notification_channel: NotificationChannel,
}

impl OrchestratorConfig {
    pub fn with_gateway_timeout(mut self, timeout: Duration) -> Self {
        self.gateway_timeout = timeout;
        self
    }

    pub fn with_notification_channel(mut self, channel: NotificationChannel) -> Self {
        self.notification_channel = channel;
        self
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            gateway_timeout: DEFAULT_GATEWAY_TIMEOUT,
            notification_channel: NotificationChannel::Email,
        }
    }
}
