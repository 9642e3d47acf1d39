//! Style-object input model.
//!
//! A [`StyleObject`] is an insertion-ordered map from either a camelCase
//! property name to a [`StyleValue`], or from a nested-rule key (`&:hover`,
//! `@media ...`, `.child`) to a flat [`Declarations`] block. Order matters:
//! it decides the order declarations are rendered in and therefore the
//! content hash of the compiled output.
//!
//! Both maps keep the JavaScript-object overwrite rule: setting a key that
//! already exists replaces its value but keeps its original position.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

/// A single declaration value.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    /// Rendered verbatim.
    Str(String),
    /// Rendered with a `px` suffix unless the property is unit-less.
    Number(f64),
    /// Explicitly absent. Survives merging, dropped at compile time.
    Null,
}

impl StyleValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for StyleValue {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for StyleValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl<T: Into<StyleValue>> From<Option<T>> for StyleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Insertion-ordered `property -> value` block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Declarations {
    entries: Vec<(String, StyleValue)>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(property, value);
        self
    }

    /// Set a property, overwriting in place if it already exists.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<StyleValue>) {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == property) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((property, value)),
        }
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Shallow-merge `other` on top of `self`.
    pub fn merge_from(&mut self, other: &Declarations) {
        for (property, value) in &other.entries {
            self.set(property.clone(), value.clone());
        }
    }

    /// A copy without the [`StyleValue::Null`] entries.
    pub fn without_nulls(&self) -> Declarations {
        Declarations {
            entries: self
                .entries
                .iter()
                .filter(|(_, value)| !value.is_null())
                .cloned()
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for Declarations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut declarations = Declarations::new();
        for (property, value) in iter {
            declarations.set(property, value);
        }
        declarations
    }
}

/// A top-level style-object entry.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleEntry {
    Value(StyleValue),
    Nested(Declarations),
}

impl StyleEntry {
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }
}

impl From<Declarations> for StyleEntry {
    fn from(declarations: Declarations) -> Self {
        Self::Nested(declarations)
    }
}

impl From<StyleValue> for StyleEntry {
    fn from(value: StyleValue) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for StyleEntry {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl From<String> for StyleEntry {
    fn from(value: String) -> Self {
        Self::Value(value.into())
    }
}

impl From<f64> for StyleEntry {
    fn from(value: f64) -> Self {
        Self::Value(value.into())
    }
}

impl From<i32> for StyleEntry {
    fn from(value: i32) -> Self {
        Self::Value(value.into())
    }
}

/// Raw, uncompiled style declarations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleObject {
    entries: Vec<(String, StyleEntry)>,
}

impl StyleObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style scalar declaration.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(property, StyleEntry::Value(value.into()));
        self
    }

    /// Builder-style nested block (`&:hover`, `@media ...`, `.child`).
    pub fn nested(mut self, key: impl Into<String>, declarations: Declarations) -> Self {
        self.set(key, StyleEntry::Nested(declarations));
        self
    }

    /// Set an entry, overwriting in place if the key already exists.
    pub fn set(&mut self, key: impl Into<String>, entry: impl Into<StyleEntry>) {
        let key = key.into();
        let entry = entry.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = entry,
            None => self.entries.push((key, entry)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&StyleEntry> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, entry)| entry)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut StyleEntry> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == key)
            .map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Parse a style object from JSON text, keeping key order.
    pub fn from_json(text: &str) -> Result<Self, crate::TypeError> {
        serde_json::from_str(text).map_err(|e| crate::TypeError::InvalidStyleObject(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

struct StyleValueVisitor;

impl<'de> Visitor<'de> for StyleValueVisitor {
    type Value = StyleValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, a number, or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(StyleValue::Str(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(StyleValue::Str(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(StyleValue::Number(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(StyleValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(StyleValue::Number(v as f64))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(StyleValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(StyleValue::Null)
    }
}

impl<'de> Deserialize<'de> for StyleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StyleValueVisitor)
    }
}

struct DeclarationsVisitor;

impl<'de> Visitor<'de> for DeclarationsVisitor {
    type Value = Declarations;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of property names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut declarations = Declarations::new();
        while let Some((property, value)) = map.next_entry::<String, StyleValue>()? {
            declarations.set(property, value);
        }
        Ok(declarations)
    }
}

impl<'de> Deserialize<'de> for Declarations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DeclarationsVisitor)
    }
}

struct StyleEntryVisitor;

impl<'de> Visitor<'de> for StyleEntryVisitor {
    type Value = StyleEntry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, a number, null, or a nested declaration block")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        StyleValueVisitor.visit_str(v).map(StyleEntry::Value)
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        StyleValueVisitor.visit_string(v).map(StyleEntry::Value)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        StyleValueVisitor.visit_f64(v).map(StyleEntry::Value)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        StyleValueVisitor.visit_i64(v).map(StyleEntry::Value)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        StyleValueVisitor.visit_u64(v).map(StyleEntry::Value)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(StyleEntry::Value(StyleValue::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(StyleEntry::Value(StyleValue::Null))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        DeclarationsVisitor.visit_map(map).map(StyleEntry::Nested)
    }
}

impl<'de> Deserialize<'de> for StyleEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StyleEntryVisitor)
    }
}

struct StyleObjectVisitor;

impl<'de> Visitor<'de> for StyleObjectVisitor {
    type Value = StyleObject;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a style object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut object = StyleObject::new();
        while let Some((key, entry)) = map.next_entry::<String, StyleEntry>()? {
            object.set(key, entry);
        }
        Ok(object)
    }
}

impl<'de> Deserialize<'de> for StyleObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StyleObjectVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_in_place() {
        let mut decls = Declarations::new().with("color", "red").with("width", 10);
        decls.set("color", "blue");
        let keys: Vec<_> = decls.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["color", "width"]);
        assert_eq!(decls.get("color"), Some(&StyleValue::from("blue")));
    }

    #[test]
    fn merge_from_is_shallow_override() {
        let mut base = Declarations::new().with("color", "red").with("margin", 4);
        base.merge_from(&Declarations::new().with("margin", 8).with("padding", 2));
        let rendered: Vec<_> = base.iter().map(|(k, v)| (k.to_owned(), v.clone())).collect();
        assert_eq!(
            rendered,
            vec![
                ("color".to_owned(), StyleValue::from("red")),
                ("margin".to_owned(), StyleValue::from(8)),
                ("padding".to_owned(), StyleValue::from(2)),
            ]
        );
    }

    #[test]
    fn without_nulls_drops_absent_values() {
        let decls = Declarations::new()
            .with("color", "red")
            .with("width", None::<f64>)
            .with("height", 3);
        let cleaned = decls.without_nulls();
        assert_eq!(cleaned.len(), 2);
        assert!(cleaned.get("width").is_none());
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(StyleValue::from(None::<&str>), StyleValue::Null);
        assert_eq!(StyleValue::from(Some(1.5)), StyleValue::Number(1.5));
    }

    #[test]
    fn style_object_builder_keeps_order() {
        let object = StyleObject::new()
            .with("color", "red")
            .nested("&:hover", Declarations::new().with("color", "blue"))
            .with("opacity", 0.5);
        let keys: Vec<_> = object.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["color", "&:hover", "opacity"]);
        assert!(object.get("&:hover").unwrap().is_nested());
    }

    #[test]
    fn deserializes_json_in_key_order() {
        let object = StyleObject::from_json(
            r#"{"zIndex": 3, "color": "red", "&:hover": {"color": "blue", "width": 2}, "margin": null}"#,
        )
        .unwrap();

        let keys: Vec<_> = object.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zIndex", "color", "&:hover", "margin"]);
        assert_eq!(
            object.get("zIndex"),
            Some(&StyleEntry::Value(StyleValue::Number(3.0)))
        );
        assert_eq!(
            object.get("margin"),
            Some(&StyleEntry::Value(StyleValue::Null))
        );
        assert_eq!(
            object.get("&:hover"),
            Some(&StyleEntry::Nested(
                Declarations::new().with("color", "blue").with("width", 2)
            ))
        );
    }

    #[test]
    fn rejects_booleans() {
        let err = StyleObject::from_json(r#"{"color": true}"#).unwrap_err();
        assert!(matches!(err, crate::TypeError::InvalidStyleObject(_)));
    }

    #[test]
    fn rejects_non_object_root() {
        assert!(StyleObject::from_json("[1, 2]").is_err());
    }
}
