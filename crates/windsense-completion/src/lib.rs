//! Windsense Completion Engine
//!
//! Augments an editor's completion popup with utility-class names, driven by
//! the user's utility framework configuration file.
//!
//! # Architecture
//!
//! The engine is a short pipeline of pure functions wrapped by a thin
//! event-handling layer:
//!
//! 1. **Scope Detection** ([`scope`]): is the caret inside an open
//!    `class="..."` value, and what has been typed there so far
//! 2. **Span Calculation** ([`span`]): which characters an accepted
//!    suggestion replaces
//! 3. **Configuration Merge** ([`merge`]): base vocabulary + configuration
//!    tree → vocabulary, in global / override / extend phases
//! 4. **Candidate Generation** ([`generator`]): vocabulary + token →
//!    candidates
//! 5. **Composition** ([`composer`]): candidates folded into the host's lists
//! 6. **Late Filtering** ([`late_filter`]): host items computed after the
//!    popup opened are moved into the composed list
//!
//! [`CompletionSource`] wires these to the host, and
//! [`ConfigurationReloader`] keeps the [`VocabularyStore`] in sync with the
//! configuration file.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use windsense_completion::*;
//! use windsense_config::{FileConfigurationParser, FileScanner, SettingsManager};
//!
//! let store = Arc::new(VocabularyStore::default());
//! let reloader = Arc::new(ConfigurationReloader::new(
//!     store,
//!     Arc::new(FileConfigurationParser::new("tailwind.config.json")),
//!     Arc::new(FileScanner::new("tailwind.config.json")),
//!     Arc::new(LogStatusSink),
//! ));
//! let source = CompletionSource::new(
//!     Arc::new(SettingsManager::new()),
//!     Arc::new(FileScanner::new("tailwind.config.json")),
//!     reloader,
//!     LateFilter::new(broker),
//! );
//!
//! let buffer = TextSnapshot::new(SnapshotId(1), "<div class=\"p-");
//! let lists = source.augment(&buffer, 14, host_lists).await;
//! ```
pub mod composer;
pub mod generator;
pub mod hex;
pub mod host;
pub mod late_filter;
pub mod logging;
pub mod merge;
pub mod reload;
pub mod scope;
pub mod source;
pub mod span;
pub mod types;
pub mod vocabulary;

pub use composer::{append_unique, compose, ALL_LIST_MONIKER};
pub use generator::generate;
pub use hex::normalize_hex;
pub use host::{
    ActiveSession, CompletionBroker, ConfigurationChanged, HostEvent, HostItem, LogStatusSink,
    NativeSession, SessionId, StatusSink, ViewId,
};
pub use late_filter::{filter_host_items, LateFilter, LateFilterOutcome};
pub use logging::init_logging;
pub use merge::{merge, MergeMode};
pub use reload::{ConfigurationReloader, InitState};
pub use scope::{current_token, detect_scope};
pub use source::{CompletionSource, EnabledState};
pub use span::{compute_replacement_span, TextBuffer, TextSnapshot};
pub use types::*;
pub use vocabulary::{
    ClassCategory, ScreenBreakpoint, UtilityClass, Vocabulary, VocabularySnapshot,
    VocabularyStore,
};
