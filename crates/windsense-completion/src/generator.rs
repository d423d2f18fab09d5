//! Candidate generation
//!
//! Expands the vocabulary into concrete class names for the token being
//! typed. A token may carry a modifier chain (`md:hover:bg-`); the chain is
//! kept verbatim and only the part after the last `:` is completed.

use std::collections::HashSet;

use crate::types::{CandidateKind, CompletionCandidate, Icon};
use crate::vocabulary::{ClassCategory, Vocabulary};

/// Generate candidates for `token` from `vocabulary`
pub fn generate(vocabulary: &Vocabulary, token: &str) -> Vec<CompletionCandidate> {
    let (chain, stem) = match token.rfind(':') {
        Some(i) => token.split_at(i + 1),
        None => ("", token),
    };
    let stem = stem.to_lowercase();

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let mut offer = |candidate: CompletionCandidate| {
        if !candidate.display_text.to_lowercase().starts_with(&stem) {
            return;
        }
        let display_text = format!("{chain}{}", candidate.display_text);
        if seen.insert(display_text.clone()) {
            candidates.push(CompletionCandidate {
                insert_text: display_text.clone(),
                display_text,
                ..candidate
            });
        }
    };

    for class in vocabulary.classes.values() {
        match &class.category {
            None => offer(
                CompletionCandidate::new(vocabulary.prefixed(&class.name), CandidateKind::Class)
                    .with_icon(Icon::Class),
            ),
            Some(ClassCategory::Tag(tag)) => offer(
                CompletionCandidate::new(vocabulary.prefixed(&class.name), CandidateKind::Class)
                    .with_icon(Icon::Class)
                    .with_detail(tag.clone()),
            ),
            Some(ClassCategory::Spacing) => {
                for (key, length) in &vocabulary.spacing {
                    let name = vocabulary.prefixed(&format!("{}-{}", class.name, key));
                    offer(
                        CompletionCandidate::new(name, CandidateKind::Spacing)
                            .with_icon(Icon::Class)
                            .with_detail(length.clone()),
                    );
                }
            }
            Some(ClassCategory::Color) => {
                for (key, hex) in &vocabulary.colors {
                    let name = vocabulary.prefixed(&format!("{}-{}", class.name, key));
                    offer(
                        CompletionCandidate::new(name, CandidateKind::Color)
                            .with_icon(Icon::Swatch(hex.clone()))
                            .with_detail(format!("#{hex}")),
                    );
                }
            }
            Some(ClassCategory::Screen) => {
                for screen in &vocabulary.screens {
                    let name = vocabulary.prefixed(&format!("{}-{}", class.name, screen.name));
                    offer(
                        CompletionCandidate::new(name, CandidateKind::Class)
                            .with_icon(Icon::Class)
                            .with_detail(screen.value.clone()),
                    );
                }
            }
        }
    }

    for modifier in &vocabulary.modifiers {
        offer(
            CompletionCandidate::new(format!("{modifier}:"), CandidateKind::Modifier)
                .with_icon(Icon::Modifier),
        );
    }
    for screen in &vocabulary.screens {
        offer(
            CompletionCandidate::new(format!("{}:", screen.name), CandidateKind::Screen)
                .with_icon(Icon::Modifier)
                .with_detail(screen.value.clone()),
        );
    }

    candidates
}
