//! Merging builder inputs and partitioning a style object into rule groups.

use purse_types::{Declarations, StyleEntry, StyleObject, StyleValue};

/// How a group key turns into rule text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupKind {
    /// The `""` group: declarations applied to the class itself.
    Base,
    /// `@media ...`, `@supports ...`: wraps the class rule.
    AtRule,
    /// `&:hover`, `& > li`, `.child`: `&` stands for the class selector.
    Selector,
}

impl GroupKind {
    pub fn of(key: &str) -> Self {
        if key.is_empty() {
            Self::Base
        } else if key.starts_with('@') {
            Self::AtRule
        } else {
            Self::Selector
        }
    }
}

/// Merge raw style objects left to right.
///
/// Scalar keys are overwritten by later inputs. Nested blocks are
/// shallow-merged: a later block's declarations override the earlier
/// block's one by one. When a key switches between scalar and nested, the
/// later input wins outright.
pub fn merge_style_objects<'a, I>(objects: I) -> StyleObject
where
    I: IntoIterator<Item = &'a StyleObject>,
{
    let mut merged = StyleObject::new();
    for object in objects {
        for (key, entry) in object.iter() {
            match entry {
                StyleEntry::Nested(declarations) => match merged.get_mut(key) {
                    Some(StyleEntry::Nested(existing)) => existing.merge_from(declarations),
                    _ => merged.set(key, StyleEntry::Nested(declarations.clone())),
                },
                StyleEntry::Value(value) => merged.set(key, StyleEntry::Value(value.clone())),
            }
        }
    }
    merged
}

/// Partition a style object into `(group key, declarations)` pairs.
///
/// The base group `""` comes first when it has declarations; nested groups
/// follow in the order they were first encountered. Null values are dropped
/// and groups left empty afterwards are removed.
pub fn group_style_object(object: &StyleObject) -> Vec<(String, Declarations)> {
    let mut groups: Vec<(String, Declarations)> = vec![(String::new(), Declarations::new())];

    for (key, entry) in object.iter() {
        match entry {
            StyleEntry::Value(StyleValue::Null) => {}
            StyleEntry::Value(value) => groups[0].1.set(key, value.clone()),
            StyleEntry::Nested(declarations) => {
                let declarations = declarations.without_nulls();
                match groups.iter_mut().find(|(group, _)| group == key) {
                    Some((_, existing)) => existing.merge_from(&declarations),
                    None => groups.push((key.to_owned(), declarations)),
                }
            }
        }
    }

    groups.retain(|(_, declarations)| !declarations.is_empty());
    groups
}
