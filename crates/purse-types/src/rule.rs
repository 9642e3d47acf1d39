use std::fmt;

use serde::{Deserialize, Serialize};

/// One complete stylesheet rule, e.g. `.abc{color:red;}` or
/// `@media print{.abc{color:red;}}`.
///
/// The text is opaque to everything except the compiler that produced it.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleRule(String);

impl StyleRule {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this rule is wrapped in an at-rule (`@media`, `@supports`, ...).
    pub fn is_at_rule(&self) -> bool {
        self.0.starts_with('@')
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StyleRule({})", self.0)
    }
}

impl fmt::Display for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StyleRule {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for StyleRule {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl PartialEq<str> for StyleRule {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StyleRule {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_at_rules() {
        assert!(StyleRule::new("@media print{.a{color:red;}}").is_at_rule());
        assert!(!StyleRule::new(".a{color:red;}").is_at_rule());
    }

    #[test]
    fn compares_with_str() {
        let rule = StyleRule::from(".a{color:red;}");
        assert_eq!(rule, ".a{color:red;}");
        assert_eq!(rule.to_string(), ".a{color:red;}");
    }
}
