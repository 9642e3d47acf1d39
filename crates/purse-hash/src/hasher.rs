use purse_types::ClassName;

/// Multiplicative string hasher producing alphabetic identifiers.
///
/// The fold walks the UTF-16 code units of the input from last to first,
/// computing `h = (h * 33) ^ unit` in wrapping 32-bit signed arithmetic.
/// Working on UTF-16 units keeps identifiers identical to those produced by
/// browser-side tooling for the same input text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentHasher {
    seed: u32,
}

impl ContentHasher {
    /// The hasher used for class names.
    pub const DEFAULT: Self = Self { seed: 5381 };

    /// Create a hasher with a custom seed.
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// The fold seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Fold `text` into an unsigned 32-bit hash.
    pub fn hash_str(&self, text: &str) -> u32 {
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut h = self.seed as i32;
        for &unit in units.iter().rev() {
            h = h.wrapping_mul(33) ^ i32::from(unit);
        }
        h as u32
    }

    /// Hash `text` straight to a class name.
    pub fn identifier(&self, text: &str) -> Result<ClassName, HasherError> {
        let name = to_alphabetic_name(self.hash_str(text));
        ClassName::new(name).map_err(|e| HasherError::InvalidIdentifier(e.to_string()))
    }

    /// Hash a serializable value by its compact JSON encoding.
    ///
    /// Map keys are encoded in the order they were inserted, so two maps with
    /// equal contents but different population order hash differently.
    pub fn hash_json<T: serde::Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<ClassName, HasherError> {
        let text =
            serde_json::to_string(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
        self.identifier(&text)
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Render `code` in base 52, most significant digit first.
///
/// Digits `0..26` map to `a..z` and `26..52` to `A..Z`. The result is never
/// empty.
pub fn to_alphabetic_name(code: u32) -> String {
    fn digit(d: u32) -> char {
        let base = if d > 25 { b'A' - 26 } else { b'a' };
        char::from(base + d as u8)
    }

    let mut digits = Vec::new();
    let mut x = code;
    while x > 52 {
        digits.push(digit(x % 52));
        x /= 52;
    }
    digits.push(digit(x % 52));
    digits.iter().rev().collect()
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("hash produced an invalid identifier: {0}")]
    InvalidIdentifier(String),
}
