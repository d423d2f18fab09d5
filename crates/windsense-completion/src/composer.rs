//! Completion set composition
//!
//! Folds generated candidates into whatever lists the host already offered.

use std::collections::HashSet;

use crate::types::{CompletionCandidate, CompletionList, ListOrigin, ReplacementSpan};

/// Moniker and display name of the list added when the host offered no single list
pub const ALL_LIST_MONIKER: &str = "All";

/// Merge `generated` into the host's lists.
///
/// With exactly one host list the result is a single list that keeps the
/// host's moniker, so the popup shows one tab. Otherwise the host's lists are
/// left alone and an `All` list with only the generated candidates is added.
pub fn compose(
    mut host_lists: Vec<CompletionList>,
    generated: Vec<CompletionCandidate>,
    applicable_to: ReplacementSpan,
) -> Vec<CompletionList> {
    if host_lists.len() == 1 {
        let host = host_lists.remove(0);
        let mut candidates = host.candidates;
        append_unique(&mut candidates, generated);
        return vec![CompletionList {
            moniker: host.moniker,
            display_name: host.display_name,
            applicable_to: Some(applicable_to),
            candidates,
            builders: host.builders,
            origin: ListOrigin::Composed,
        }];
    }

    let mut candidates = Vec::with_capacity(generated.len());
    append_unique(&mut candidates, generated);
    host_lists.push(CompletionList {
        moniker: ALL_LIST_MONIKER.to_string(),
        display_name: ALL_LIST_MONIKER.to_string(),
        applicable_to: Some(applicable_to),
        candidates,
        builders: Vec::new(),
        origin: ListOrigin::Composed,
    });
    host_lists
}

/// Append candidates whose display text is not in `target` yet, returning how
/// many were added
pub fn append_unique(
    target: &mut Vec<CompletionCandidate>,
    items: impl IntoIterator<Item = CompletionCandidate>,
) -> usize {
    let mut seen: HashSet<String> = target.iter().map(|c| c.display_text.clone()).collect();
    let before = target.len();
    target.extend(items.into_iter().filter(|c| seen.insert(c.display_text.clone())));
    target.len() - before
}
