//! High-level SDK for Purse.
//!
//! Bundles a [`Compiler`] and a [`StyleRegistry`] behind one handle and
//! expresses every registration as a scope guard: styles are inserted when
//! the guard is created and released when it is dropped.
//!
//! ```rust
//! use purse_sdk::{Purse, StyleObject};
//!
//! let purse = Purse::in_memory();
//! let guard = purse
//!     .use_styles([StyleObject::new().with("color", "red")])
//!     .unwrap();
//! assert_eq!(purse.with_sink(|sink| sink.len()).unwrap(), 1);
//!
//! drop(guard);
//! assert_eq!(purse.with_sink(|sink| sink.len()).unwrap(), 0);
//! ```
//!
//! [`Compiler`]: purse_compiler::Compiler
//! [`StyleRegistry`]: purse_registry::StyleRegistry

pub mod error;
pub mod guard;
pub mod purse;

pub use error::{SdkError, SdkResult};
pub use guard::{GlobalStyleGuard, StyleGuard};
pub use purse::{Purse, PurseBuilder};

// Re-export key types
pub use purse_registry::{InMemorySink, RegistryConfig, SheetSink, StyleSink};
pub use purse_types::{
    ClassName, CssVar, Declarations, StyleElement, StyleInput, StyleObject, StyleRule, StyleValue,
};
