use std::fmt;

/// Reference to a CSS custom property, rendered as `var(--name)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CssVar {
    name: String,
}

impl CssVar {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The bare property name, without `--`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declaration key that defines this variable, i.e. `--name`.
    pub fn property(&self) -> String {
        format!("--{}", self.name)
    }
}

impl fmt::Display for CssVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var(--{})", self.name)
    }
}

impl From<CssVar> for crate::StyleValue {
    fn from(var: CssVar) -> Self {
        crate::StyleValue::Str(var.to_string())
    }
}
