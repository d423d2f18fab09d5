//! Host editor contracts
//!
//! The editor owns sessions, popups and the status bar. The engine reaches
//! them only through these traits, and the host talks back through
//! [`HostEvent`] messages.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use windsense_config::Settings;

use crate::types::{CompletionCandidate, CompletionList, Icon};

/// Identifies an editor view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

/// Identifies a completion session within a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// An item computed by the host's own completion machinery
#[derive(Debug, Clone, PartialEq)]
pub struct HostItem {
    pub display_text: String,
    pub insert_text: String,
    pub icon: Option<Icon>,
}

impl HostItem {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            display_text: text.clone(),
            insert_text: text,
            icon: None,
        }
    }
}

/// A completion session that is currently shown in a view
pub trait ActiveSession: Send + Sync {
    fn id(&self) -> SessionId;

    /// Incremented whenever a later keystroke supersedes the session's contents
    fn generation(&self) -> u64;

    fn is_dismissed(&self) -> bool;

    /// The list the user is looking at
    fn selected_list(&self) -> Option<CompletionList>;

    /// Buffer text from the start up to the caret
    fn preceding_text(&self) -> String;

    /// Append to the selected list
    fn append_to_selected(&self, items: Vec<CompletionCandidate>);

    /// Re-filter and re-render the visible items
    fn refilter(&self);
}

/// The host's own, natively computed completion session
#[async_trait]
pub trait NativeSession: Send + Sync {
    /// Wait for the host to finish computing and return its items
    async fn computed_items(&self) -> Vec<HostItem>;

    /// Close the host's popup
    fn dismiss(&self);
}

/// Lists the sessions active in a view
pub trait CompletionBroker: Send + Sync {
    fn active_sessions(&self, view: ViewId) -> Vec<Arc<dyn ActiveSession>>;
}

/// User-visible status line
pub trait StatusSink: Send + Sync {
    fn show_message(&self, message: &str);
    fn show_progress(&self, label: &str, step: u32, total: u32);
}

/// Status sink that only writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogStatusSink;

impl StatusSink for LogStatusSink {
    fn show_message(&self, message: &str) {
        info!("{}", message);
    }

    fn show_progress(&self, label: &str, step: u32, total: u32) {
        info!("{} ({}/{})", label, step, total);
    }
}

/// Marker carried by configuration-file change notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationChanged;

/// Notifications delivered by the host
#[derive(Clone)]
pub enum HostEvent {
    /// The host finished computing its own items for a session in `view`
    ComputationFinished {
        view: ViewId,
        native: Arc<dyn NativeSession>,
    },
    SettingsChanged(Settings),
    ConfigurationChanged,
}

impl std::fmt::Debug for HostEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ComputationFinished { view, .. } => f
                .debug_struct("ComputationFinished")
                .field("view", view)
                .finish_non_exhaustive(),
            Self::SettingsChanged(settings) => f.debug_tuple("SettingsChanged").field(settings).finish(),
            Self::ConfigurationChanged => f.write_str("ConfigurationChanged"),
        }
    }
}
