//! camelCase to kebab-case property names.

use std::collections::HashMap;

/// Convert a camelCase property name to its kebab-case CSS form.
///
/// Every ASCII uppercase letter becomes `-` plus its lowercase form. A result
/// starting with `ms-` gets an extra leading dash, since the Microsoft vendor
/// prefix is conventionally written `msTransition` rather than `MsTransition`.
pub fn hyphenate_property(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}

/// Memo of hyphenated property names.
///
/// Owned by a single [`Compiler`](crate::Compiler); entries live as long as
/// the compiler or until [`clear`](Self::clear) is called.
#[derive(Clone, Debug, Default)]
pub struct PropertyNameCache {
    entries: HashMap<String, String>,
}

impl PropertyNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The kebab-case form of `name`, computed at most once per cache.
    pub fn hyphenate(&mut self, name: &str) -> &str {
        if !self.entries.contains_key(name) {
            self.entries
                .insert(name.to_owned(), hyphenate_property(name));
        }
        self.entries.get(name).map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_camel_case() {
        assert_eq!(hyphenate_property("backgroundColor"), "background-color");
        assert_eq!(hyphenate_property("borderTopLeftRadius"), "border-top-left-radius");
        assert_eq!(hyphenate_property("color"), "color");
    }

    #[test]
    fn vendor_prefixes() {
        assert_eq!(hyphenate_property("msTransition"), "-ms-transition");
        assert_eq!(hyphenate_property("WebkitTransition"), "-webkit-transition");
        assert_eq!(hyphenate_property("MozAppearance"), "-moz-appearance");
    }

    #[test]
    fn custom_properties_pass_through() {
        assert_eq!(hyphenate_property("--accent-color"), "--accent-color");
    }

    #[test]
    fn cache_memoizes_per_instance() {
        let mut cache = PropertyNameCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.hyphenate("zIndex"), "z-index");
        assert_eq!(cache.hyphenate("zIndex"), "z-index");
        assert_eq!(cache.len(), 1);

        let other = PropertyNameCache::new();
        assert!(other.is_empty());

        cache.clear();
        assert!(cache.is_empty());
    }
}
