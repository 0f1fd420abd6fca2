use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

/// A channel welcome messages can be delivered through. Actual delivery is
/// outside the ledger; the built-in channels emit structured log events.
pub trait NotificationChannel: Send + Sync {
    fn name(&self) -> &str;

    fn send(&self, from: &str, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Delivers messages to the log, tagged as email.
pub struct EmailChannel;

impl NotificationChannel for EmailChannel {
    fn name(&self) -> &str {
        "email"
    }

    fn send(&self, from: &str, to: &str, subject: &str, body: &str) -> Result<()> {
        info!(channel = "email", from, to, subject, body, "notification sent");
        Ok(())
    }
}

/// Delivers messages to the log, tagged as SMS.
pub struct SmsChannel;

impl NotificationChannel for SmsChannel {
    fn name(&self) -> &str {
        "sms"
    }

    fn send(&self, from: &str, to: &str, subject: &str, body: &str) -> Result<()> {
        info!(channel = "sms", from, to, subject, body, "notification sent");
        Ok(())
    }
}

/// Registry of notification channels with a designated default.
/// Lookups by unknown name return None so callers can fall back to the
/// default channel.
pub struct NotificationGateway {
    channels: HashMap<String, Arc<dyn NotificationChannel>>,
    default_name: String,
}

impl NotificationGateway {
    pub fn new(default: Arc<dyn NotificationChannel>) -> Self {
        let default_name = default.name().to_string();
        let mut channels = HashMap::new();
        channels.insert(default_name.clone(), default);
        Self {
            channels,
            default_name,
        }
    }

    /// Gateway with the built-in channels registered; email is the default.
    pub fn with_defaults() -> Self {
        let mut gateway = Self::new(Arc::new(EmailChannel));
        gateway.register(Arc::new(SmsChannel));
        gateway
    }

    pub fn register(&mut self, channel: Arc<dyn NotificationChannel>) {
        self.channels.insert(channel.name().to_string(), channel);
    }

    pub fn default_channel(&self) -> Arc<dyn NotificationChannel> {
        // The default is always registered by construction.
        Arc::clone(&self.channels[&self.default_name])
    }

    pub fn channel_by_name(&self, name: &str) -> Option<Arc<dyn NotificationChannel>> {
        self.channels.get(name).map(Arc::clone)
    }
}

impl Default for NotificationGateway {
    fn default() -> Self {
        Self::with_defaults()
    }
}
