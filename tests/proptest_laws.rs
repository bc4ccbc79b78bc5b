//! Property-based tests for flattening, labels, search and escaping.
//!
//! Uses proptest to generate arbitrary tool output and check the laws the
//! viewer relies on hold for all of it.

use metaview::flatten::flatten;
use metaview::model::MetadataDocument;
use metaview::render::{escape_markup, format_key};
use metaview::search::{count_visible, filter_sections, is_visible};
use metaview::validate::validate;
use metaview::ValidationError;
use proptest::prelude::*;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Arbitrary JSON values with keys free of the key path separator.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::String),
    ];

    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-zA-Z][a-zA-Z0-9]{0,7}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn document() -> impl Strategy<Value = MetadataDocument> {
    prop::collection::btree_map("[a-z]{1,8}", json_value(), 0..5).prop_map(|tools| {
        let map: Map<String, Value> = tools.into_iter().collect();
        MetadataDocument::from_value(Value::Object(map)).expect("object documents always parse")
    })
}

/// A tool member: a scalar, or one level of nested scalars.
#[derive(Debug, Clone)]
enum Field {
    Leaf(Value),
    Group(Vec<(String, Value)>),
}

/// Non-null scalars, so every member yields a row.
fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,8}".prop_map(Value::String),
    ]
}

/// Keep the first occurrence of each name, in generated order.
fn dedup<T>(pairs: Vec<(String, T)>) -> Vec<(String, T)> {
    let mut seen = HashSet::new();
    pairs.into_iter().filter(|(name, _)| seen.insert(name.clone())).collect()
}

fn field() -> impl Strategy<Value = Field> {
    prop_oneof![
        3 => scalar().prop_map(Field::Leaf),
        1 => prop::collection::vec(("[a-z]{1,5}[0-9]", scalar()), 1..4)
            .prop_map(|members| Field::Group(dedup(members))),
    ]
}

/// Tools and members in generation order, which is rarely sorted.
fn ordered_tools() -> impl Strategy<Value = Vec<(String, Vec<(String, Field)>)>> {
    let members = prop::collection::vec(("[a-z]{1,5}[0-9]", field()), 1..5).prop_map(dedup);
    prop::collection::vec(("[a-z]{1,6}", members), 1..5).prop_map(dedup)
}

fn to_document(tools: &[(String, Vec<(String, Field)>)]) -> MetadataDocument {
    let mut doc = Map::new();
    for (tool, members) in tools {
        let mut node = Map::new();
        for (name, field) in members {
            let value = match field {
                Field::Leaf(value) => value.clone(),
                Field::Group(children) => Value::Object(children.iter().cloned().collect()),
            };
            node.insert(name.clone(), value);
        }
        doc.insert(tool.clone(), Value::Object(node));
    }
    MetadataDocument::from_value(Value::Object(doc)).expect("object documents always parse")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Labels never start with whitespace.
    #[test]
    fn label_has_no_leading_whitespace(key in "\\PC{0,20}") {
        let label = format_key(&key);
        prop_assert!(!label.starts_with(char::is_whitespace));
    }

    /// Lowercase keys only gain a capital first letter.
    #[test]
    fn lowercase_key_is_capitalized(key in "[a-z][a-z0-9]{0,15}") {
        let mut expected = key.clone();
        expected[..1].make_ascii_uppercase();
        prop_assert_eq!(format_key(&key), expected);
    }

    /// Escaped text never contains raw markup characters.
    #[test]
    fn escaped_text_is_inert(text in "\\PC{0,40}") {
        let escaped = escape_markup(&text);
        prop_assert!(!escaped.contains(&['<', '>', '"', '\''][..]));
        prop_assert_eq!(
            escaped
                .replace("&lt;", "<")
                .replace("&gt;", ">")
                .replace("&quot;", "\"")
                .replace("&#39;", "'")
                .replace("&amp;", "&"),
            text
        );
    }

    /// Every emitted section has rows, and a failed tool has exactly one.
    #[test]
    fn sections_are_never_empty(doc in document()) {
        for section in flatten(&doc) {
            prop_assert!(!section.rows.is_empty());
            prop_assert!(section.rows.iter().all(|r| r.tool == section.tool));
            if section.rows.iter().any(|r| r.is_error) {
                prop_assert_eq!(section.rows.len(), 1);
            }
        }
    }

    /// A row's label depends only on its leaf key.
    #[test]
    fn label_comes_from_leaf_key(doc in document()) {
        for row in flatten(&doc).iter().flat_map(|s| &s.rows).filter(|r| !r.is_error) {
            let leaf = row.key_path.rsplit('_').next().unwrap_or_default();
            prop_assert_eq!(&row.label, &format_key(leaf));
        }
    }

    /// Flattening the same document twice gives the same rows.
    #[test]
    fn flatten_is_deterministic(doc in document()) {
        prop_assert_eq!(flatten(&doc), flatten(&doc));
    }

    /// Filtering keeps exactly the visible rows, in order.
    #[test]
    fn filter_matches_is_visible(doc in document(), query in "[a-z0-9 ]{0,3}") {
        let sections = flatten(&doc);
        let filtered = filter_sections(&sections, &query);

        let expected: Vec<_> = sections
            .iter()
            .flat_map(|s| &s.rows)
            .filter(|r| is_visible(r, &query))
            .collect();
        let actual: Vec<_> = filtered.iter().flat_map(|s| s.rows.iter().copied()).collect();

        prop_assert_eq!(actual.len(), count_visible(&sections, &query));
        prop_assert_eq!(actual, expected);
        prop_assert!(filtered.iter().all(|s| !s.rows.is_empty()));
    }

    /// The empty query shows everything.
    #[test]
    fn empty_query_is_identity(doc in document()) {
        let sections = flatten(&doc);
        let total: usize = sections.iter().map(|s| s.rows.len()).sum();
        prop_assert_eq!(count_visible(&sections, ""), total);
    }

    /// Sections follow tool order and rows follow member order.
    #[test]
    fn flatten_preserves_input_order(tools in ordered_tools()) {
        let sections = flatten(&to_document(&tools));

        let expected_tools: Vec<String> = tools.iter().map(|(tool, _)| tool.clone()).collect();
        let actual_tools: Vec<String> = sections.iter().map(|s| s.tool.clone()).collect();
        prop_assert_eq!(actual_tools, expected_tools);

        for ((_, members), section) in tools.iter().zip(&sections) {
            let expected: Vec<String> = members
                .iter()
                .flat_map(|(name, field)| match field {
                    Field::Leaf(_) => vec![name.clone()],
                    Field::Group(children) => children
                        .iter()
                        .map(|(child, _)| format!("{name}_{child}"))
                        .collect(),
                })
                .collect();
            let actual: Vec<String> = section.rows.iter().map(|r| r.key_path.clone()).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    /// A key with any character outside ASCII letters and digits is refused.
    #[test]
    fn foreign_key_characters_are_rejected(
        prefix in "[a-zA-Z0-9]{0,5}",
        foreign in "[!-/:-@\\[-`{-~éß中]",
        suffix in "[a-zA-Z0-9 ]{0,5}",
        value in "[a-zA-Z0-9]{1,8}",
    ) {
        let key = format!("{prefix}{foreign}{suffix}");
        prop_assert!(
            matches!(
                validate(&key, &value, true, ""),
                Err(ValidationError::InvalidKeyCharset { .. })
            ),
            "key {:?} was not rejected",
            key
        );
    }

    /// Accepted keys are alphanumeric and accepted values are trimmed.
    #[test]
    fn accepted_entries_are_clean(key in "\\PC{0,12}", value in "\\PC{0,12}") {
        if let Ok(entry) = validate(&key, &value, true, "") {
            prop_assert!(!entry.key.is_empty());
            prop_assert!(entry.key.chars().all(|c| c.is_ascii_alphanumeric()));
            prop_assert_eq!(entry.value.as_str(), value.trim());
            prop_assert!(!entry.value.is_empty());
        }
    }
}
