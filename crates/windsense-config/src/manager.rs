//! Settings manager implementation

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

use crate::{
    error::ConfigResult,
    types::{Settings, SettingsProvider},
};

const CHANNEL_CAPACITY: usize = 16;

/// In-process settings holder that notifies subscribers on every update
pub struct SettingsManager {
    current: RwLock<Settings>,
    changes: broadcast::Sender<Settings>,
}

impl SettingsManager {
    /// Create a manager holding default settings
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Create a manager holding the given settings
    pub fn with_settings(settings: Settings) -> Self {
        let (changes, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            current: RwLock::new(settings),
            changes,
        }
    }

    /// Replace the settings and notify subscribers
    pub fn update(&self, settings: Settings) {
        *self.current.write() = settings.clone();
        // No receivers is fine; nobody is listening yet.
        let delivered = self.changes.send(settings).unwrap_or(0);
        debug!("Settings updated, notified {} subscriber(s)", delivered);
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.changes.receiver_count()
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsProvider for SettingsManager {
    async fn get_settings(&self) -> ConfigResult<Settings> {
        Ok(self.current.read().clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<Settings> {
        self.changes.subscribe()
    }
}
