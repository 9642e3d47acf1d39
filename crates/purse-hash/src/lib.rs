//! Content hashing for Purse.
//!
//! Turns any serializable value into a short, letters-only identifier that is
//! safe to use as a CSS class token. The value is first encoded as compact
//! JSON (object keys in insertion order), then folded with a multiplicative
//! string hash into 32 bits, then rendered in base 52 over `a-z` `A-Z`.
//!
//! Hashing is deterministic across calls and processes: there is no seed
//! randomization. It is not collision resistant and must not be used for
//! anything security related.

pub mod hasher;

pub use hasher::{ContentHasher, HasherError, to_alphabetic_name};
