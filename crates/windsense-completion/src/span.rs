//! Replacement span calculation
//!
//! Class names inside an attribute value are space-delimited and the value
//! itself is quote-delimited, so the token under the caret extends back to the
//! nearest quote or space.

use std::sync::Arc;

use crate::types::{ReplacementSpan, SnapshotId};

/// Read-only, character-addressed view of an editor buffer version
pub trait TextBuffer: Send + Sync {
    /// Snapshot the offsets of this buffer refer to
    fn snapshot_id(&self) -> SnapshotId;

    /// Length in characters
    fn len_chars(&self) -> usize;

    /// Character at `offset`, or `None` past the end
    fn char_at(&self, offset: usize) -> Option<char>;

    /// Text from the start of the buffer up to `offset`
    fn text_before(&self, offset: usize) -> String;
}

/// Immutable buffer snapshot backed by a character vector
#[derive(Debug, Clone)]
pub struct TextSnapshot {
    id: SnapshotId,
    chars: Arc<[char]>,
}

impl TextSnapshot {
    pub fn new(id: SnapshotId, text: &str) -> Self {
        Self {
            id,
            chars: text.chars().collect::<Vec<_>>().into(),
        }
    }
}

impl TextBuffer for TextSnapshot {
    fn snapshot_id(&self) -> SnapshotId {
        self.id
    }

    fn len_chars(&self) -> usize {
        self.chars.len()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    fn text_before(&self, offset: usize) -> String {
        self.chars[..offset.min(self.chars.len())].iter().collect()
    }
}

fn is_boundary(ch: char) -> bool {
    ch == '"' || ch == ' '
}

/// Compute the span of the class token being typed at `caret`.
///
/// The walk stops at the start of the buffer when no quote or space precedes
/// the caret.
pub fn compute_replacement_span<B: TextBuffer + ?Sized>(buffer: &B, caret: usize) -> ReplacementSpan {
    let end = caret.min(buffer.len_chars());
    let mut start = end;
    while start > 0 {
        match buffer.char_at(start - 1) {
            Some(ch) if !is_boundary(ch) => start -= 1,
            _ => break,
        }
    }
    ReplacementSpan::new(buffer.snapshot_id(), start, end)
}
