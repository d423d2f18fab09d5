/// Property-based tests for the configuration merge
use proptest::prelude::*;
use windsense_completion::{merge, normalize_hex, Vocabulary};
use windsense_config::ConfigValue;

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,6}".prop_map(|s| s.to_string())
}

fn hex_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "#?[0-9a-fA-F]{3}",
        "#?[0-9a-fA-F]{6}",
        "#?[0-9a-fA-F]{8}",
    ]
    .prop_map(|s| s.to_string())
}

/// Strategy for a section body touching every category
fn section_strategy() -> impl Strategy<Value = ConfigValue> {
    (
        prop::collection::vec((key_strategy(), hex_strategy()), 0..4),
        prop::collection::vec((key_strategy(), "[0-9]{1,2}rem"), 0..4),
        prop::collection::vec(key_strategy(), 0..4),
        prop::collection::vec(key_strategy(), 0..3),
    )
        .prop_map(|(colors, spacing, classes, modifiers)| {
            ConfigValue::mapping([
                (
                    "colors",
                    ConfigValue::mapping(colors.into_iter().map(|(k, v)| (k, ConfigValue::from(v)))),
                ),
                (
                    "spacing",
                    ConfigValue::mapping(spacing.into_iter().map(|(k, v)| (k, ConfigValue::from(v)))),
                ),
                (
                    "classes",
                    ConfigValue::mapping(classes.into_iter().map(|k| (k, ConfigValue::Null))),
                ),
                (
                    "modifiers",
                    ConfigValue::sequence(modifiers.into_iter().map(ConfigValue::from)),
                ),
            ])
        })
}

/// Top-level keys that are not merge sections
fn other_key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("theme".to_string()), Just("plugins".to_string()), "[a-z]{3,8}"]
        .prop_filter("merge sections", |k| k != "override" && k != "extend" && k != "prefix")
}

fn config_strategy() -> impl Strategy<Value = ConfigValue> {
    (
        prop::option::of("[a-z]{1,3}-"),
        prop::option::of(section_strategy()),
        prop::option::of(section_strategy()),
    )
        .prop_map(|(prefix, overrides, extend)| {
            let mut entries = Vec::new();
            if let Some(prefix) = prefix {
                entries.push(("prefix", ConfigValue::from(prefix)));
            }
            if let Some(overrides) = overrides {
                entries.push(("override", overrides));
            }
            if let Some(extend) = extend {
                entries.push(("extend", extend));
            }
            ConfigValue::mapping(entries)
        })
}

proptest! {
    /// Property: merging from the pristine base is idempotent
    #[test]
    fn prop_merge_idempotent(config in config_strategy()) {
        let pristine = Vocabulary::builtin();
        let once = merge(&pristine, &config).unwrap();
        let again = merge(&pristine, &config).unwrap();
        prop_assert_eq!(&once, &again);
        prop_assert_eq!(merge(&once, &config).unwrap(), once);
    }

    /// Property: without override or extend sections only the prefix changes
    #[test]
    fn prop_no_sections_only_prefix_changes(
        prefix in prop::option::of("[a-z]{1,3}-"),
        others in prop::collection::vec((other_key_strategy(), section_strategy()), 0..3),
    ) {
        let base = Vocabulary::builtin();
        let mut entries: Vec<(String, ConfigValue)> = others;
        if let Some(p) = &prefix {
            entries.push(("prefix".to_string(), ConfigValue::from(p.as_str())));
        }
        let merged = merge(&base, &ConfigValue::mapping(entries)).unwrap();

        let mut expected = base.clone();
        expected.prefix = prefix;
        prop_assert_eq!(merged, expected);
    }

    /// Property: extend never removes or replaces an existing entry
    #[test]
    fn prop_extend_is_append_only(extend in section_strategy()) {
        let base = Vocabulary::builtin();
        let config = ConfigValue::mapping([("extend", extend)]);
        let merged = merge(&base, &config).unwrap();

        for (name, hex) in &base.colors {
            prop_assert_eq!(merged.colors.get(name), Some(hex));
        }
        for (name, length) in &base.spacing {
            prop_assert_eq!(merged.spacing.get(name), Some(length));
        }
        for (name, class) in &base.classes {
            prop_assert_eq!(merged.classes.get(name), Some(class));
        }
        prop_assert!(merged.colors.len() >= base.colors.len());
    }

    /// Property: every stored color is six uppercase hex digits
    #[test]
    fn prop_colors_are_normalized(overrides in section_strategy()) {
        let config = ConfigValue::mapping([("override", overrides)]);
        let merged = merge(&Vocabulary::builtin(), &config).unwrap();
        for hex in merged.colors.values() {
            prop_assert_eq!(hex.len(), 6);
            prop_assert!(hex.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }

    /// Property: normalization is stable once a value is canonical
    #[test]
    fn prop_normalize_hex_fixed_point(raw in hex_strategy()) {
        let hex = normalize_hex(&raw).unwrap();
        prop_assert_eq!(normalize_hex(&hex), Some(hex.clone()));
    }
}

#[test]
fn test_hex_examples() {
    assert_eq!(normalize_hex("FFF").as_deref(), Some("FFFFFF"));
    assert_eq!(normalize_hex("ffffff").as_deref(), Some("FFFFFF"));
    assert_eq!(normalize_hex("FFFFFFAA").as_deref(), Some("FFFFFF"));
    assert_eq!(normalize_hex("12G"), None);
}

#[test]
fn test_override_class_never_duplicates() {
    let mut base = Vocabulary::new();
    base.upsert_class(windsense_completion::UtilityClass::new("a", None));
    let config = ConfigValue::mapping([(
        "override",
        ConfigValue::mapping([(
            "classes",
            ConfigValue::mapping([("a", ConfigValue::from("A2"))]),
        )]),
    )]);

    let merged = merge(&base, &config).unwrap();
    assert_eq!(merged.classes.len(), 1);
    assert_eq!(
        merged.classes["a"].category,
        Some(windsense_completion::ClassCategory::Tag("A2".to_string()))
    );
}
