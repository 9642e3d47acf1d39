//! Compiled style elements and the polymorphic builder input.

use std::sync::Arc;

use serde::Serialize;

use crate::class_name::ClassName;
use crate::declaration::StyleObject;
use crate::rule::StyleRule;

/// The rules and identifier an element contributes itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OwnedFragment {
    /// Content hash of the compiled declarations.
    pub class_name: ClassName,
    /// Rules in insertion order.
    pub style_rules: Vec<StyleRule>,
}

/// An immutable, composable unit of styling.
///
/// Elements form a DAG: `composed` holds shared references to elements built
/// earlier, so a parent can never appear among its own descendants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StyleElement {
    /// Space-joined class list: every composed element's class list, then
    /// the owned class name. Empty when nothing contributes.
    pub class_name: String,
    /// Elements this one was built from, in argument order.
    pub composed: Vec<Arc<StyleElement>>,
    /// Own content, absent for composition-only elements.
    pub owned: Option<OwnedFragment>,
}

impl StyleElement {
    /// An element with no content and no children.
    pub fn empty() -> Self {
        Self {
            class_name: String::new(),
            composed: Vec::new(),
            owned: None,
        }
    }

    /// The owned class name, if this element contributes rules itself.
    pub fn owned_class_name(&self) -> Option<&ClassName> {
        self.owned.as_ref().map(|owned| &owned.class_name)
    }

    /// Returns `true` if neither this element nor any composed element
    /// contributes a class.
    pub fn is_empty(&self) -> bool {
        self.class_name.is_empty()
    }

    /// Number of elements in the composition tree, counting shared children
    /// once per occurrence.
    pub fn tree_size(&self) -> usize {
        1 + self.composed.iter().map(|c| c.tree_size()).sum::<usize>()
    }
}

/// One argument to the element builder: either a previously built element
/// or raw declarations.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleInput {
    Element(Arc<StyleElement>),
    Raw(StyleObject),
}

impl From<Arc<StyleElement>> for StyleInput {
    fn from(element: Arc<StyleElement>) -> Self {
        Self::Element(element)
    }
}

impl From<&Arc<StyleElement>> for StyleInput {
    fn from(element: &Arc<StyleElement>) -> Self {
        Self::Element(Arc::clone(element))
    }
}

impl From<StyleElement> for StyleInput {
    fn from(element: StyleElement) -> Self {
        Self::Element(Arc::new(element))
    }
}

impl From<StyleObject> for StyleInput {
    fn from(object: StyleObject) -> Self {
        Self::Raw(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> Arc<StyleElement> {
        Arc::new(StyleElement {
            class_name: name.to_owned(),
            composed: Vec::new(),
            owned: Some(OwnedFragment {
                class_name: ClassName::new(name).unwrap(),
                style_rules: vec![StyleRule::new(format!(".{name}{{color:red;}}"))],
            }),
        })
    }

    #[test]
    fn empty_element_has_no_class() {
        let el = StyleElement::empty();
        assert!(el.is_empty());
        assert!(el.owned_class_name().is_none());
        assert_eq!(el.tree_size(), 1);
    }

    #[test]
    fn tree_size_counts_shared_children() {
        let shared = leaf("abc");
        let parent = StyleElement {
            class_name: "abc abc".into(),
            composed: vec![Arc::clone(&shared), shared],
            owned: None,
        };
        assert_eq!(parent.tree_size(), 3);
    }

    #[test]
    fn inputs_carry_their_discriminant() {
        let from_element: StyleInput = leaf("abc").into();
        let from_raw: StyleInput = StyleObject::new().with("color", "red").into();
        assert!(matches!(from_element, StyleInput::Element(_)));
        assert!(matches!(from_raw, StyleInput::Raw(_)));
    }
}
