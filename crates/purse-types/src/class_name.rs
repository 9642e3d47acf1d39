use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Content-addressed class name for a compiled fragment.
///
/// A `ClassName` is a single CSS class token made only of ASCII letters, so
/// it can be dropped into a selector (`.{name}`) without escaping. Identical
/// compiled content always produces the same `ClassName`, which is what lets
/// the registry deduplicate rule sets.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName(String);

impl ClassName {
    /// Parse a class name, rejecting anything that is not `[a-zA-Z]+`.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(TypeError::InvalidClassName(name));
        }
        Ok(Self(name))
    }

    /// The class token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The class as a selector, i.e. with a leading `.`.
    pub fn selector(&self) -> String {
        format!(".{}", self.0)
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassName({})", self.0)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClassName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClassName> for String {
    fn from(name: ClassName) -> Self {
        name.0
    }
}
