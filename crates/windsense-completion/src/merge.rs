//! Configuration merge
//!
//! Applies a configuration tree to a base vocabulary in three fixed phases:
//!
//! 1. **Global**: the top-level `prefix`. A `prefix` inside a section is
//!    applied with that section's mode.
//! 2. **Override**: the `override` section. Entries replace base entries
//!    with the same key; new keys are inserted.
//! 3. **Extend**: the `extend` section. Entries are only added when their key
//!    is absent; existing entries are never touched.
//!
//! Any other top-level key, `theme` included, is ignored. Each section may
//! carry `classes`, `colors`, `spacing`, `screens` and `modifiers`. Individual malformed values are skipped; only a root that is
//! not a mapping or a prefix that is not a string aborts the merge.

use indexmap::IndexMap;
use tracing::debug;
use windsense_config::{ConfigMap, ConfigResult, ConfigValue};

use crate::hex::normalize_hex;
use crate::vocabulary::{ClassCategory, ScreenBreakpoint, UtilityClass, Vocabulary};

/// How a section's entries combine with existing ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Replace by key, insert when absent
    Override,
    /// Insert only when absent
    Extend,
}

/// Merge `config` into a copy of `base`.
///
/// `base` should always be the pristine vocabulary, so merging the same
/// configuration twice gives the same result.
pub fn merge(base: &Vocabulary, config: &ConfigValue) -> ConfigResult<Vocabulary> {
    let root = config.expect_mapping("configuration")?;
    let mut vocabulary = base.clone();

    apply_global(&mut vocabulary, root)?;

    for (name, mode) in [("override", MergeMode::Override), ("extend", MergeMode::Extend)] {
        if let Some(section) = root_section(root, name) {
            apply_section(&mut vocabulary, name, section, mode);
        }
    }

    Ok(vocabulary)
}

fn apply_global(vocabulary: &mut Vocabulary, root: &ConfigMap) -> ConfigResult<()> {
    let prefix = match root.get("prefix") {
        Some(value) => value.expect_optional_str("prefix")?,
        None => None,
    };
    vocabulary.prefix = prefix.filter(|p| !p.is_empty()).map(str::to_string);
    Ok(())
}

fn root_section<'a>(root: &'a ConfigMap, name: &str) -> Option<&'a ConfigMap> {
    match root.get(name) {
        Some(ConfigValue::Mapping(map)) => Some(map),
        Some(ConfigValue::Null) | None => None,
        Some(_) => {
            debug!("Skipping section '{}': not a mapping", name);
            None
        }
    }
}

/// Apply one section's categories to the vocabulary
pub fn apply_section(
    vocabulary: &mut Vocabulary,
    section: &str,
    entries: &ConfigMap,
    mode: MergeMode,
) {
    for (category, value) in entries {
        match category.as_str() {
            "classes" => apply_classes(vocabulary, section, value, mode),
            "colors" => apply_colors(vocabulary, section, value, mode),
            "spacing" => apply_spacing(vocabulary, section, value, mode),
            "screens" => apply_screens(vocabulary, section, value, mode),
            "modifiers" => apply_modifiers(vocabulary, section, value),
            "prefix" => apply_section_prefix(vocabulary, section, value, mode),
            "extend" | "override" => {
                debug!("Ignoring nested section '{}.{}'", section, category)
            }
            other => debug!("Ignoring unknown key '{}.{}'", section, other),
        }
    }
}

fn apply_section_prefix(
    vocabulary: &mut Vocabulary,
    section: &str,
    value: &ConfigValue,
    mode: MergeMode,
) {
    let Some(prefix) = value.as_str() else {
        debug!("Skipping '{}.prefix': not a string", section);
        return;
    };
    if mode == MergeMode::Override || vocabulary.prefix.is_none() {
        vocabulary.prefix = Some(prefix).filter(|p| !p.is_empty()).map(str::to_string);
    }
}

fn place<V>(map: &mut IndexMap<String, V>, key: String, value: V, mode: MergeMode) {
    match mode {
        MergeMode::Override => {
            map.insert(key, value);
        }
        MergeMode::Extend => {
            map.entry(key).or_insert(value);
        }
    }
}

fn apply_classes(vocabulary: &mut Vocabulary, section: &str, value: &ConfigValue, mode: MergeMode) {
    match value {
        ConfigValue::Mapping(map) => {
            for (name, raw) in map {
                let category = match raw {
                    ConfigValue::Null => None,
                    other => match other.scalar_to_string() {
                        Some(label) => Some(ClassCategory::parse(&label)),
                        None => {
                            debug!("Skipping class '{}.classes.{}': not a label", section, name);
                            continue;
                        }
                    },
                };
                place(
                    &mut vocabulary.classes,
                    name.clone(),
                    UtilityClass::new(name.clone(), category),
                    mode,
                );
            }
        }
        ConfigValue::Sequence(items) => {
            for name in items.iter().filter_map(ConfigValue::as_str) {
                place(
                    &mut vocabulary.classes,
                    name.to_string(),
                    UtilityClass::new(name, None),
                    mode,
                );
            }
        }
        _ => debug!("Skipping '{}.classes': not a mapping or sequence", section),
    }
}

fn apply_colors(vocabulary: &mut Vocabulary, section: &str, value: &ConfigValue, mode: MergeMode) {
    let Some(map) = value.as_mapping() else {
        debug!("Skipping '{}.colors': not a mapping", section);
        return;
    };

    let mut flattened = Vec::new();
    flatten_colors(None, map, &mut flattened);

    for (name, raw) in flattened {
        match normalize_hex(&raw) {
            Some(hex) => place(&mut vocabulary.colors, name, hex, mode),
            None => debug!("Skipping color '{}.colors.{}': '{}' is not hex", section, name, raw),
        }
    }
}

// Nested palettes flatten to `parent-child`; a `DEFAULT` key names the parent itself.
fn flatten_colors(parent: Option<&str>, map: &ConfigMap, out: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let name = match (parent, key.as_str()) {
            (Some(parent), "DEFAULT") => parent.to_string(),
            (None, "DEFAULT") => continue,
            (Some(parent), key) => format!("{parent}-{key}"),
            (None, key) => key.to_string(),
        };
        match value {
            ConfigValue::Mapping(nested) => flatten_colors(Some(&name), nested, out),
            other => {
                if let Some(raw) = other.scalar_to_string() {
                    out.push((name, raw));
                }
            }
        }
    }
}

fn apply_spacing(vocabulary: &mut Vocabulary, section: &str, value: &ConfigValue, mode: MergeMode) {
    let Some(map) = value.as_mapping() else {
        debug!("Skipping '{}.spacing': not a mapping", section);
        return;
    };
    for (name, raw) in map {
        match raw.scalar_to_string() {
            Some(length) => place(&mut vocabulary.spacing, name.clone(), length, mode),
            None => debug!("Skipping spacing '{}.spacing.{}': not a length", section, name),
        }
    }
}

fn screen_value(raw: &ConfigValue) -> Option<String> {
    match raw {
        ConfigValue::Mapping(map) => ["min", "max", "raw"]
            .iter()
            .find_map(|key| map.get(*key).and_then(ConfigValue::scalar_to_string)),
        other => other.scalar_to_string(),
    }
}

fn apply_screens(vocabulary: &mut Vocabulary, section: &str, value: &ConfigValue, mode: MergeMode) {
    let Some(map) = value.as_mapping() else {
        debug!("Skipping '{}.screens': not a mapping", section);
        return;
    };
    for (name, raw) in map {
        let Some(width) = screen_value(raw) else {
            debug!("Skipping screen '{}.screens.{}': no usable width", section, name);
            continue;
        };
        match mode {
            MergeMode::Override => vocabulary.upsert_screen(ScreenBreakpoint::new(name, width)),
            MergeMode::Extend => {
                if vocabulary.screen(name).is_none() {
                    vocabulary.screens.push(ScreenBreakpoint::new(name, width));
                }
            }
        }
    }
}

// Modifiers are a set, so override and extend both come down to "insert if absent".
fn apply_modifiers(vocabulary: &mut Vocabulary, section: &str, value: &ConfigValue) {
    match value {
        ConfigValue::Sequence(items) => {
            for item in items {
                match item.as_str() {
                    Some(modifier) => {
                        vocabulary.modifiers.insert(modifier.to_string());
                    }
                    None => debug!("Skipping non-string modifier in '{}.modifiers'", section),
                }
            }
        }
        ConfigValue::Mapping(map) => {
            vocabulary.modifiers.extend(map.keys().cloned());
        }
        _ => debug!("Skipping '{}.modifiers': not a sequence or mapping", section),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Vocabulary {
        let mut vocabulary = Vocabulary::new();
        vocabulary.upsert_class(UtilityClass::new("a", None));
        vocabulary.colors.insert("brand".to_string(), "112233".to_string());
        vocabulary.spacing.insert("4".to_string(), "1rem".to_string());
        vocabulary.screens.push(ScreenBreakpoint::new("sm", "640px"));
        vocabulary.modifiers.insert("hover".to_string());
        vocabulary
    }

    fn section(name: &str, body: ConfigValue) -> ConfigValue {
        ConfigValue::mapping([(name, body)])
    }

    #[test]
    fn test_override_replaces_class_by_name() {
        let config = section(
            "override",
            ConfigValue::mapping([("classes", ConfigValue::mapping([("a", ConfigValue::from("A2"))]))]),
        );
        let merged = merge(&base(), &config).unwrap();

        assert_eq!(merged.classes.len(), 1);
        assert_eq!(
            merged.classes["a"].category,
            Some(ClassCategory::Tag("A2".to_string()))
        );
    }

    #[test]
    fn test_extend_only_appends_absent_keys() {
        let config = section(
            "extend",
            ConfigValue::mapping([
                (
                    "classes",
                    ConfigValue::mapping([("a", ConfigValue::from("spacing")), ("b", ConfigValue::Null)]),
                ),
                ("spacing", ConfigValue::mapping([("4", ConfigValue::from("2rem"))])),
            ]),
        );
        let merged = merge(&base(), &config).unwrap();

        let names: Vec<&str> = merged.classes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(merged.classes["a"].category, None);
        assert_eq!(merged.spacing["4"], "1rem");
    }

    #[test]
    fn test_global_prefix() {
        let config = ConfigValue::mapping([("prefix", ConfigValue::from("tw-"))]);
        let merged = merge(&base(), &config).unwrap();
        assert_eq!(merged.prefix.as_deref(), Some("tw-"));

        let mut expected = base();
        expected.prefix = Some("tw-".to_string());
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_non_string_prefix_aborts() {
        let config = ConfigValue::mapping([("prefix", ConfigValue::Number(3.0))]);
        assert!(merge(&base(), &config).is_err());
    }

    #[test]
    fn test_non_mapping_root_aborts() {
        assert!(merge(&base(), &ConfigValue::from("tailwind")).is_err());
    }

    #[test]
    fn test_invalid_color_is_skipped_and_rest_applied() {
        let config = section(
            "override",
            ConfigValue::mapping([(
                "colors",
                ConfigValue::mapping([
                    ("bad", ConfigValue::from("12G")),
                    ("brand", ConfigValue::from("#fff")),
                    ("accent", ConfigValue::from("#FF000080")),
                ]),
            )]),
        );
        let merged = merge(&base(), &config).unwrap();

        assert!(!merged.colors.contains_key("bad"));
        assert_eq!(merged.colors["brand"], "FFFFFF");
        assert_eq!(merged.colors["accent"], "FF0000");
    }

    #[test]
    fn test_nested_colors_flatten() {
        let config = section(
            "extend",
            ConfigValue::mapping([(
                "colors",
                ConfigValue::mapping([(
                    "ocean",
                    ConfigValue::mapping([
                        ("DEFAULT", ConfigValue::from("0077BE")),
                        ("100", ConfigValue::from("e0f2fe")),
                        ("deep", ConfigValue::mapping([("900", ConfigValue::from("0c4a6e"))])),
                    ]),
                )]),
            )]),
        );
        let merged = merge(&base(), &config).unwrap();

        assert_eq!(merged.colors["ocean"], "0077BE");
        assert_eq!(merged.colors["ocean-100"], "E0F2FE");
        assert_eq!(merged.colors["ocean-deep-900"], "0C4A6E");
    }

    #[test]
    fn test_malformed_category_is_skipped() {
        let config = section(
            "override",
            ConfigValue::mapping([
                ("colors", ConfigValue::from("red")),
                ("spacing", ConfigValue::sequence([ConfigValue::from("1")])),
                ("screens", ConfigValue::mapping([("md", ConfigValue::from("768px"))])),
            ]),
        );
        let merged = merge(&base(), &config).unwrap();

        assert_eq!(merged.colors, base().colors);
        assert_eq!(merged.spacing, base().spacing);
        assert_eq!(merged.screens.last().unwrap(), &ScreenBreakpoint::new("md", "768px"));
    }

    #[test]
    fn test_screens_override_in_place_and_extend_keeps_existing() {
        let config = ConfigValue::mapping([
            (
                "override",
                ConfigValue::mapping([(
                    "screens",
                    ConfigValue::mapping([(
                        "sm",
                        ConfigValue::mapping([("min", ConfigValue::from("600px"))]),
                    )]),
                )]),
            ),
            (
                "extend",
                ConfigValue::mapping([(
                    "screens",
                    ConfigValue::mapping([("sm", ConfigValue::from("1px")), ("3xl", ConfigValue::from("1920px"))]),
                )]),
            ),
        ]);
        let merged = merge(&base(), &config).unwrap();

        assert_eq!(
            merged.screens,
            vec![
                ScreenBreakpoint::new("sm", "600px"),
                ScreenBreakpoint::new("3xl", "1920px"),
            ]
        );
    }

    #[test]
    fn test_modifiers_collapse_duplicates() {
        let config = section(
            "extend",
            ConfigValue::mapping([(
                "modifiers",
                ConfigValue::sequence([ConfigValue::from("hover"), ConfigValue::from("aria-selected"), ConfigValue::from("hover")]),
            )]),
        );
        let merged = merge(&base(), &config).unwrap();
        let modifiers: Vec<&str> = merged.modifiers.iter().map(String::as_str).collect();
        assert_eq!(modifiers, vec!["hover", "aria-selected"]);
    }

    #[test]
    fn test_theme_key_is_not_a_section() {
        let config = ConfigValue::mapping([
            (
                "theme",
                ConfigValue::mapping([("spacing", ConfigValue::mapping([("4", ConfigValue::from("9rem"))]))]),
            ),
            (
                "extend",
                ConfigValue::mapping([(
                    "extend",
                    ConfigValue::mapping([("spacing", ConfigValue::mapping([("18", ConfigValue::from("4.5rem"))]))]),
                )]),
            ),
        ]);
        let merged = merge(&base(), &config).unwrap();

        assert_eq!(merged, base());
    }

    #[test]
    fn test_merge_is_idempotent_from_pristine() {
        let config = ConfigValue::mapping([
            ("prefix", ConfigValue::from("tw-")),
            (
                "extend",
                ConfigValue::mapping([("spacing", ConfigValue::mapping([("18", ConfigValue::from("4.5rem"))]))]),
            ),
        ]);
        let pristine = Vocabulary::builtin();
        let once = merge(&pristine, &config).unwrap();
        let twice = merge(&pristine, &config).unwrap();
        assert_eq!(once, twice);
        assert_eq!(merge(&once, &config).unwrap(), once);
    }

    #[test]
    fn test_prefix_inside_sections() {
        let config = ConfigValue::mapping([
            ("override", ConfigValue::mapping([("prefix", ConfigValue::from("tw-"))])),
            ("extend", ConfigValue::mapping([("prefix", ConfigValue::from("ignored-"))])),
        ]);
        let merged = merge(&base(), &config).unwrap();
        assert_eq!(merged.prefix.as_deref(), Some("tw-"));

        let extend_only = ConfigValue::mapping([(
            "extend",
            ConfigValue::mapping([("prefix", ConfigValue::from("x-"))]),
        )]);
        assert_eq!(merge(&base(), &extend_only).unwrap().prefix.as_deref(), Some("x-"));
    }
}
