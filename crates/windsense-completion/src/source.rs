//! Completion source
//!
//! The entry point the host calls when it builds a completion popup, plus the
//! handler for the host's follow-up notifications. Everything here marshals
//! inputs for the pure pipeline in [`crate::scope`], [`crate::span`],
//! [`crate::generator`] and [`crate::composer`].

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use windsense_config::{ConfigurationScanner, SettingsProvider};

use crate::composer::compose;
use crate::generator::generate;
use crate::host::{ConfigurationChanged, HostEvent};
use crate::late_filter::{LateFilter, LateFilterOutcome};
use crate::reload::ConfigurationReloader;
use crate::scope::{current_token, detect_scope};
use crate::span::{compute_replacement_span, TextBuffer};
use crate::types::CompletionList;

/// Cached value of the "completion enabled" setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnabledState {
    /// Not read from the settings provider yet
    Unknown,
    Enabled,
    Disabled,
}

impl From<bool> for EnabledState {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Augments host completion popups with utility classes
pub struct CompletionSource {
    settings: Arc<dyn SettingsProvider>,
    scanner: Arc<dyn ConfigurationScanner>,
    reloader: Arc<ConfigurationReloader>,
    late_filter: LateFilter,
    enabled: Arc<Mutex<EnabledState>>,
    subscriptions: Mutex<Vec<JoinHandle<()>>>,
}

impl CompletionSource {
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        scanner: Arc<dyn ConfigurationScanner>,
        reloader: Arc<ConfigurationReloader>,
        late_filter: LateFilter,
    ) -> Self {
        Self {
            settings,
            scanner,
            reloader,
            late_filter,
            enabled: Arc::new(Mutex::new(EnabledState::Unknown)),
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    pub fn enabled_state(&self) -> EnabledState {
        *self.enabled.lock()
    }

    /// Listen for settings changes and configuration-file changes.
    ///
    /// Must be called from within a tokio runtime. The listeners run until
    /// [`dispose`](Self::dispose) is called or the source is dropped.
    pub fn subscribe(&self, config_changes: broadcast::Receiver<ConfigurationChanged>) {
        let mut settings_rx = self.settings.subscribe();
        let enabled = Arc::clone(&self.enabled);
        let settings_task = tokio::spawn(async move {
            loop {
                match settings_rx.recv().await {
                    Ok(settings) => *enabled.lock() = settings.enable_tailwind_css.into(),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Missed {} settings notification(s)", skipped)
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        let mut config_rx = config_changes;
        let reloader = Arc::clone(&self.reloader);
        let config_task = tokio::spawn(async move {
            loop {
                match config_rx.recv().await {
                    // Failures are already reported by the reloader.
                    Ok(ConfigurationChanged) => {
                        let _ = reloader.reload().await;
                    }
                    Err(RecvError::Lagged(_)) => {
                        let _ = reloader.reload().await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        self.subscriptions.lock().extend([settings_task, config_task]);
    }

    /// Stop every listener started by [`subscribe`](Self::subscribe)
    pub fn dispose(&self) {
        for handle in self.subscriptions.lock().drain(..) {
            handle.abort();
        }
    }

    async fn is_enabled(&self) -> bool {
        let cached = self.enabled_state();
        let state = match cached {
            EnabledState::Unknown => {
                let state = match self.settings.get_settings().await {
                    Ok(settings) => EnabledState::from(settings.enable_tailwind_css),
                    Err(e) => {
                        warn!("Could not read settings: {}", e);
                        return false;
                    }
                };
                *self.enabled.lock() = state;
                state
            }
            known => known,
        };
        state == EnabledState::Enabled
    }

    /// Add utility-class candidates to the host's lists.
    ///
    /// Returns the lists unchanged whenever augmentation does not apply:
    /// disabled, no configuration file, configuration not loadable, or the
    /// caret outside a class attribute.
    pub async fn augment(
        &self,
        buffer: &dyn TextBuffer,
        caret: usize,
        host_lists: Vec<CompletionList>,
    ) -> Vec<CompletionList> {
        if !self.is_enabled().await || !self.scanner.has_configuration_file() {
            return host_lists;
        }

        if !self.reloader.is_ready() && !self.reloader.initialize().await {
            debug!("Configuration unavailable, skipping augmentation");
            return host_lists;
        }

        let scope = detect_scope(&buffer.text_before(caret));
        if !scope.in_scope {
            return host_lists;
        }

        let snapshot = self.reloader.store().snapshot();
        let token = current_token(&scope.partial_text);
        let generated = generate(&snapshot.vocabulary, token);
        let span = compute_replacement_span(buffer, caret);

        debug!(
            "Offering {} candidate(s) for '{}' from vocabulary v{}",
            generated.len(),
            token,
            snapshot.version
        );
        compose(host_lists, generated, span)
    }

    /// Handle a host notification
    pub async fn handle_event(&self, event: HostEvent) -> Option<LateFilterOutcome> {
        match event {
            HostEvent::ComputationFinished { view, native } => {
                Some(self.late_filter.on_computation_finished(view, native.as_ref()).await)
            }
            HostEvent::SettingsChanged(settings) => {
                *self.enabled.lock() = settings.enable_tailwind_css.into();
                None
            }
            HostEvent::ConfigurationChanged => {
                let _ = self.reloader.reload().await;
                None
            }
        }
    }
}

impl Drop for CompletionSource {
    fn drop(&mut self) {
        self.dispose();
    }
}
