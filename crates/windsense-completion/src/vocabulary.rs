//! Utility-class vocabulary and its versioned store
//!
//! The [`Vocabulary`] is the merged set of classes, modifiers, breakpoints and
//! design tokens that candidates are generated from. The [`VocabularyStore`]
//! keeps the pristine base next to the last committed merge result so every
//! reload starts from the same place.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use tracing::info;

/// Token family a utility class expands over
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassCategory {
    /// `name-{spacing key}`
    Spacing,
    /// `name-{color key}`
    Color,
    /// `name-{screen name}`
    Screen,
    /// Free-form label; the class is offered as-is
    Tag(String),
}

impl ClassCategory {
    /// Interpret a category label from the configuration file
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "spacing" => Self::Spacing,
            "color" | "colors" => Self::Color,
            "screen" | "screens" => Self::Screen,
            _ => Self::Tag(raw.to_string()),
        }
    }
}

/// A single utility class; identity is its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilityClass {
    pub name: String,
    pub category: Option<ClassCategory>,
}

impl UtilityClass {
    pub fn new(name: impl Into<String>, category: Option<ClassCategory>) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Named responsive threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenBreakpoint {
    pub name: String,
    pub value: String,
}

impl ScreenBreakpoint {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Everything candidate generation draws from
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vocabulary {
    pub classes: IndexMap<String, UtilityClass>,
    pub modifiers: IndexSet<String>,
    pub screens: Vec<ScreenBreakpoint>,
    /// Color name to six-digit uppercase hex
    pub colors: IndexMap<String, String>,
    /// Spacing name to length value
    pub spacing: IndexMap<String, String>,
    pub prefix: Option<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a class by name
    pub fn upsert_class(&mut self, class: UtilityClass) {
        self.classes.insert(class.name.clone(), class);
    }

    pub fn screen(&self, name: &str) -> Option<&ScreenBreakpoint> {
        self.screens.iter().find(|s| s.name == name)
    }

    /// Replace a breakpoint's value in place, or append it
    pub fn upsert_screen(&mut self, screen: ScreenBreakpoint) {
        match self.screens.iter_mut().find(|s| s.name == screen.name) {
            Some(existing) => existing.value = screen.value,
            None => self.screens.push(screen),
        }
    }

    /// The class name with the configured prefix applied
    pub fn prefixed(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{name}"),
            None => name.to_string(),
        }
    }

    /// The base vocabulary shipped with the engine
    pub fn builtin() -> Self {
        let mut vocabulary = Self::new();

        for name in [
            "block", "inline", "inline-block", "flex", "inline-flex", "grid", "hidden",
            "container", "items-center", "items-start", "items-end", "justify-center",
            "justify-between", "justify-start", "justify-end", "font-bold", "font-medium",
            "italic", "underline", "rounded", "rounded-lg", "shadow", "shadow-md", "truncate",
        ] {
            vocabulary.upsert_class(UtilityClass::new(name, None));
        }
        for name in [
            "p", "px", "py", "pt", "pr", "pb", "pl", "m", "mx", "my", "mt", "mr", "mb", "ml",
            "w", "h", "gap", "space-x", "space-y",
        ] {
            vocabulary.upsert_class(UtilityClass::new(name, Some(ClassCategory::Spacing)));
        }
        for name in ["bg", "text", "border", "ring", "from", "to", "fill", "stroke"] {
            vocabulary.upsert_class(UtilityClass::new(name, Some(ClassCategory::Color)));
        }
        vocabulary.upsert_class(UtilityClass::new("max-w-screen", Some(ClassCategory::Screen)));

        vocabulary.modifiers.extend(
            [
                "hover", "focus", "active", "disabled", "visited", "first", "last", "odd",
                "even", "group-hover", "focus-within", "dark",
            ]
            .map(String::from),
        );

        for (name, value) in [
            ("sm", "640px"),
            ("md", "768px"),
            ("lg", "1024px"),
            ("xl", "1280px"),
            ("2xl", "1536px"),
        ] {
            vocabulary.screens.push(ScreenBreakpoint::new(name, value));
        }

        for (name, hex) in [
            ("black", "000000"),
            ("white", "FFFFFF"),
            ("gray-100", "F3F4F6"),
            ("gray-500", "6B7280"),
            ("gray-900", "111827"),
            ("red-500", "EF4444"),
            ("orange-500", "F97316"),
            ("yellow-500", "EAB308"),
            ("green-500", "22C55E"),
            ("blue-500", "3B82F6"),
            ("indigo-500", "6366F1"),
            ("purple-500", "A855F7"),
            ("pink-500", "EC4899"),
        ] {
            vocabulary.colors.insert(name.to_string(), hex.to_string());
        }

        for (name, value) in [
            ("0", "0px"),
            ("px", "1px"),
            ("0.5", "0.125rem"),
            ("1", "0.25rem"),
            ("2", "0.5rem"),
            ("3", "0.75rem"),
            ("4", "1rem"),
            ("5", "1.25rem"),
            ("6", "1.5rem"),
            ("8", "2rem"),
            ("10", "2.5rem"),
            ("12", "3rem"),
            ("16", "4rem"),
            ("20", "5rem"),
            ("24", "6rem"),
        ] {
            vocabulary.spacing.insert(name.to_string(), value.to_string());
        }

        vocabulary
    }
}

/// A committed vocabulary version
#[derive(Debug, Clone)]
pub struct VocabularySnapshot {
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    pub vocabulary: Vocabulary,
}

/// Owner of the pristine base and the current committed vocabulary.
///
/// Readers clone the current `Arc` once and work on that; a commit swaps the
/// whole snapshot, so a reader never sees a half-applied merge.
pub struct VocabularyStore {
    pristine: Arc<Vocabulary>,
    current: RwLock<Arc<VocabularySnapshot>>,
}

impl VocabularyStore {
    /// Create a store whose pristine base and first snapshot are `base`
    pub fn new(base: Vocabulary) -> Self {
        let snapshot = VocabularySnapshot {
            version: 0,
            loaded_at: Utc::now(),
            vocabulary: base.clone(),
        };
        Self {
            pristine: Arc::new(base),
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The pre-configuration base every merge starts from
    pub fn pristine(&self) -> Arc<Vocabulary> {
        Arc::clone(&self.pristine)
    }

    /// The current committed vocabulary
    pub fn snapshot(&self) -> Arc<VocabularySnapshot> {
        self.current.read().clone()
    }

    /// Replace the current vocabulary, returning the new version
    pub fn commit(&self, vocabulary: Vocabulary) -> u64 {
        let mut current = self.current.write();
        let version = current.version + 1;
        *current = Arc::new(VocabularySnapshot {
            version,
            loaded_at: Utc::now(),
            vocabulary,
        });
        info!(
            "Committed vocabulary v{} ({} classes, {} colors, {} spacing values)",
            version,
            current.vocabulary.classes.len(),
            current.vocabulary.colors.len(),
            current.vocabulary.spacing.len()
        );
        version
    }
}

impl Default for VocabularyStore {
    fn default() -> Self {
        Self::new(Vocabulary::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(ClassCategory::parse("spacing"), ClassCategory::Spacing);
        assert_eq!(ClassCategory::parse("Colors"), ClassCategory::Color);
        assert_eq!(ClassCategory::parse("screen"), ClassCategory::Screen);
        assert_eq!(ClassCategory::parse("A2"), ClassCategory::Tag("A2".to_string()));
    }

    #[test]
    fn test_upsert_screen_keeps_position() {
        let mut vocabulary = Vocabulary::builtin();
        vocabulary.upsert_screen(ScreenBreakpoint::new("md", "800px"));
        vocabulary.upsert_screen(ScreenBreakpoint::new("3xl", "1920px"));

        assert_eq!(vocabulary.screens[1], ScreenBreakpoint::new("md", "800px"));
        assert_eq!(vocabulary.screens.last().unwrap().name, "3xl");
    }

    #[test]
    fn test_prefixed() {
        let mut vocabulary = Vocabulary::new();
        assert_eq!(vocabulary.prefixed("flex"), "flex");
        vocabulary.prefix = Some("tw-".to_string());
        assert_eq!(vocabulary.prefixed("flex"), "tw-flex");
    }

    #[test]
    fn test_store_commit_bumps_version_and_keeps_pristine() {
        let store = VocabularyStore::default();
        let before = store.snapshot();

        let mut changed = Vocabulary::builtin();
        changed.prefix = Some("tw-".to_string());
        assert_eq!(store.commit(changed), 1);

        // Readers holding the old snapshot are unaffected.
        assert_eq!(before.version, 0);
        assert!(before.vocabulary.prefix.is_none());
        assert_eq!(store.snapshot().vocabulary.prefix.as_deref(), Some("tw-"));
        assert!(store.pristine().prefix.is_none());
    }
}
