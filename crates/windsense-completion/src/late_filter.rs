//! Late filtering of host items
//!
//! The host computes its own items asynchronously and usually finishes after
//! the composed list has already been shown. When it does, the matching host
//! items are moved into the composed list and the host's competing popup is
//! closed.

use std::sync::Arc;

use tracing::debug;

use crate::composer::append_unique;
use crate::host::{ActiveSession, CompletionBroker, HostItem, NativeSession, ViewId};
use crate::scope::{current_token, detect_scope};
use crate::types::{CandidateKind, CompletionCandidate, Icon};

/// What happened when a host computation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LateFilterOutcome {
    /// No active session shows a composed list
    NoComposedSession,
    /// The caret has left the class attribute
    OutOfScope,
    /// The session was dismissed or restarted while the host was computing
    Superseded,
    /// This many host items were appended
    Injected(usize),
}

/// Keep host items whose display text starts with the token being typed,
/// ignoring case
pub fn filter_host_items(partial_text: &str, items: &[HostItem]) -> Vec<CompletionCandidate> {
    let token = current_token(partial_text).to_lowercase();
    items
        .iter()
        .filter(|item| item.display_text.to_lowercase().starts_with(&token))
        .map(|item| CompletionCandidate {
            display_text: item.display_text.clone(),
            insert_text: item.insert_text.clone(),
            icon: Some(item.icon.clone().unwrap_or(Icon::LocalVariable)),
            kind: CandidateKind::Host,
            detail: None,
        })
        .collect()
}

/// Injects host items into composed sessions
pub struct LateFilter {
    broker: Arc<dyn CompletionBroker>,
}

impl LateFilter {
    pub fn new(broker: Arc<dyn CompletionBroker>) -> Self {
        Self { broker }
    }

    fn composed_session(&self, view: ViewId) -> Option<Arc<dyn ActiveSession>> {
        self.broker.active_sessions(view).into_iter().find(|session| {
            !session.is_dismissed()
                && session
                    .selected_list()
                    .map(|list| list.is_composed())
                    .unwrap_or(false)
        })
    }

    /// Handle the host finishing its own computation in `view`
    pub async fn on_computation_finished(
        &self,
        view: ViewId,
        native: &dyn NativeSession,
    ) -> LateFilterOutcome {
        let Some(session) = self.composed_session(view) else {
            return LateFilterOutcome::NoComposedSession;
        };
        let generation = session.generation();

        let scope = detect_scope(&session.preceding_text());
        if !scope.in_scope {
            return LateFilterOutcome::OutOfScope;
        }

        let items = native.computed_items().await;

        if session.is_dismissed() || session.generation() != generation {
            debug!("Session {:?} superseded, dropping host items", session.id());
            return LateFilterOutcome::Superseded;
        }

        let mut filtered = filter_host_items(&scope.partial_text, &items);
        if let Some(list) = session.selected_list() {
            let mut existing = list.candidates;
            let before = existing.len();
            append_unique(&mut existing, filtered);
            filtered = existing.split_off(before);
        }

        let injected = filtered.len();
        session.append_to_selected(filtered);
        native.dismiss();
        // The append lands after the first render; refilter so entries are not cut off.
        session.refilter();

        debug!("Injected {} host item(s) into session {:?}", injected, session.id());
        LateFilterOutcome::Injected(injected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_uses_last_token_case_insensitively() {
        let items = vec![
            HostItem::new("Tooltip"),
            HostItem::new("toggle"),
            HostItem::new("flex"),
        ];
        let filtered = filter_host_items("flex to", &items);
        let names: Vec<&str> = filtered.iter().map(|c| c.display_text.as_str()).collect();
        assert_eq!(names, vec!["Tooltip", "toggle"]);
    }

    #[test]
    fn test_filter_defaults_icon() {
        let mut with_icon = HostItem::new("ab");
        with_icon.icon = Some(Icon::Image {
            guid: "g".to_string(),
            id: 3,
        });
        let filtered = filter_host_items("a", &[HostItem::new("aa"), with_icon.clone()]);
        assert_eq!(filtered[0].icon, Some(Icon::LocalVariable));
        assert_eq!(filtered[1].icon, with_icon.icon);
        assert!(filtered.iter().all(|c| c.kind == CandidateKind::Host));
    }

    #[test]
    fn test_empty_token_keeps_everything() {
        let filtered = filter_host_items("flex ", &[HostItem::new("a"), HostItem::new("b")]);
        assert_eq!(filtered.len(), 2);
    }
}
