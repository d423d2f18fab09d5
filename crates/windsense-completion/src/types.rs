//! Core types shared by the completion pipeline

use serde::{Deserialize, Serialize};
use windsense_config::ConfigError;

/// Result type for completion operations
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Completion error type
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Reading or merging the configuration failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Completion was requested before the vocabulary was loaded
    #[error("Completion engine is not initialized")]
    NotInitialized,

    /// A host collaborator failed
    #[error("Host error: {0}")]
    Host(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Identifies an immutable version of an editor buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotId(pub u64);

/// Range of a buffer that an accepted suggestion replaces.
///
/// Offsets count characters and are only meaningful against the snapshot
/// they were computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementSpan {
    pub snapshot: SnapshotId,
    pub start: usize,
    pub end: usize,
}

impl ReplacementSpan {
    pub fn new(snapshot: SnapshotId, start: usize, end: usize) -> Self {
        Self {
            snapshot,
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// Outcome of scope detection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScopeMatch {
    pub in_scope: bool,
    /// Everything typed after the opening quote of the class attribute
    pub partial_text: String,
}

impl ScopeMatch {
    pub fn in_scope(partial_text: impl Into<String>) -> Self {
        Self {
            in_scope: true,
            partial_text: partial_text.into(),
        }
    }

    pub fn out_of_scope() -> Self {
        Self::default()
    }
}

/// Icon shown next to a completion entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    /// Utility class icon
    Class,
    /// Color swatch for the given hex value
    Swatch(String),
    Modifier,
    /// Fallback for host items that carry no icon
    LocalVariable,
    /// Host-defined image reference
    Image { guid: String, id: i32 },
}

/// Kind of completion candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateKind {
    Class,
    Color,
    Spacing,
    Screen,
    Modifier,
    /// Produced by the host editor, not by this engine
    Host,
}

/// One suggestion offered at the caret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionCandidate {
    pub display_text: String,
    pub insert_text: String,
    pub icon: Option<Icon>,
    pub kind: CandidateKind,
    pub detail: Option<String>,
}

impl CompletionCandidate {
    pub fn new(text: impl Into<String>, kind: CandidateKind) -> Self {
        let text = text.into();
        Self {
            display_text: text.clone(),
            insert_text: text,
            icon: None,
            kind,
            detail: None,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Where a completion list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListOrigin {
    Host,
    /// Built by the composer; the late filter only touches these
    Composed,
}

/// A tab of suggestions in the host's completion popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionList {
    pub moniker: String,
    pub display_name: String,
    pub applicable_to: Option<ReplacementSpan>,
    pub candidates: Vec<CompletionCandidate>,
    pub builders: Vec<CompletionCandidate>,
    pub origin: ListOrigin,
}

impl CompletionList {
    /// A list supplied by the host
    pub fn host(moniker: impl Into<String>, candidates: Vec<CompletionCandidate>) -> Self {
        let moniker = moniker.into();
        Self {
            display_name: moniker.clone(),
            moniker,
            applicable_to: None,
            candidates,
            builders: Vec::new(),
            origin: ListOrigin::Host,
        }
    }

    pub fn is_composed(&self) -> bool {
        self.origin == ListOrigin::Composed
    }

    pub fn contains_display_text(&self, text: &str) -> bool {
        self.candidates.iter().any(|c| c.display_text == text)
    }
}
