//! Configuration loading and reloading
//!
//! Loads the configuration tree, merges it onto the pristine vocabulary and
//! commits the result. A failure at any step leaves the last committed
//! vocabulary in place.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info};
use windsense_config::{ConfigurationParser, ConfigurationScanner};

use crate::host::StatusSink;
use crate::merge::merge;
use crate::types::CompletionResult;
use crate::vocabulary::VocabularyStore;

pub const LOAD_FAILED_MESSAGE: &str =
    "Tailwind CSS: Failed to load configuration file; check the output log for more details";
pub const RELOADING_LABEL: &str = "Reloading TailwindCSS configuration";
pub const RELOADED_MESSAGE: &str = "Finished reloading TailwindCSS configuration";

/// Initialization state of the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    NotStarted,
    Ready,
    Failed,
}

/// Loads configuration into a [`VocabularyStore`]
pub struct ConfigurationReloader {
    store: Arc<VocabularyStore>,
    parser: Arc<dyn ConfigurationParser>,
    scanner: Arc<dyn ConfigurationScanner>,
    status: Arc<dyn StatusSink>,
    state: Mutex<InitState>,
    // Serializes read-pristine, merge, commit.
    reload_guard: tokio::sync::Mutex<()>,
}

impl ConfigurationReloader {
    pub fn new(
        store: Arc<VocabularyStore>,
        parser: Arc<dyn ConfigurationParser>,
        scanner: Arc<dyn ConfigurationScanner>,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            store,
            parser,
            scanner,
            status,
            state: Mutex::new(InitState::NotStarted),
            reload_guard: tokio::sync::Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<VocabularyStore> {
        &self.store
    }

    pub fn state(&self) -> InitState {
        *self.state.lock()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == InitState::Ready
    }

    /// Load the configuration for the first time (or retry a failed load).
    ///
    /// Returns whether the vocabulary is now backed by the configuration file.
    pub async fn initialize(&self) -> bool {
        let _guard = self.reload_guard.lock().await;
        match self.load_and_commit().await {
            Ok(version) => {
                info!("Configuration initialized (vocabulary v{})", version);
                *self.state.lock() = InitState::Ready;
                true
            }
            Err(e) => {
                error!("Failed to initialize configuration: {}", e);
                let previous = std::mem::replace(&mut *self.state.lock(), InitState::Failed);
                // Retries after a failure stay silent until a load succeeds.
                if previous != InitState::Failed {
                    self.status.show_message(LOAD_FAILED_MESSAGE);
                }
                false
            }
        }
    }

    /// Re-derive the vocabulary after the configuration file changed.
    ///
    /// Returns the committed version, or `None` when there is no
    /// configuration file to read.
    pub async fn reload(&self) -> CompletionResult<Option<u64>> {
        if !self.scanner.has_configuration_file() {
            debug!("No configuration file, skipping reload");
            return Ok(None);
        }

        let _guard = self.reload_guard.lock().await;
        self.status.show_progress(RELOADING_LABEL, 1, 2);

        match self.load_and_commit().await {
            Ok(version) => {
                self.status.show_progress("", 2, 2);
                self.status.show_message(RELOADED_MESSAGE);
                *self.state.lock() = InitState::Ready;
                Ok(Some(version))
            }
            Err(e) => {
                self.status.show_progress("", 2, 2);
                self.status.show_message(LOAD_FAILED_MESSAGE);
                error!("Failed to reload configuration: {}", e);
                Err(e)
            }
        }
    }

    async fn load_and_commit(&self) -> CompletionResult<u64> {
        let config = self.parser.get_configuration().await?;
        let merged = merge(&self.store.pristine(), &config)?;
        Ok(self.store.commit(merged))
    }
}
