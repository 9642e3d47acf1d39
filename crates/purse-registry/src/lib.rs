//! Reference-counted style registry for Purse.
//!
//! This crate decides *when* compiled rules reach a stylesheet. A
//! [`StyleRegistry`] deduplicates style elements by their content-addressed
//! class name and counts live references, so each distinct rule set is added
//! to its [`StyleSink`] once and retracted when the last reference goes.
//!
//! # Sinks
//!
//! All destinations implement the [`StyleSink`] trait:
//!
//! - [`InMemorySink`] -- ordered rule log for tests and server rendering
//! - [`SheetSink`] -- document-stylesheet model with separate at-rule region
//!
//! # Design Rules
//!
//! 1. One registry per consuming context; it is never shared across threads.
//! 2. Every `insert` is paired with exactly one `release`, enforced by
//!    consuming the [`Registration`].
//! 3. Composed children are processed before their parent in both
//!    directions.
//! 4. Sink failures are fatal in strict mode and logged in relaxed mode.

pub mod config;
pub mod error;
pub mod memory;
pub mod registry;
pub mod sheet;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use config::{InsertionMode, RegistryConfig};
pub use error::{RegistryError, RegistryResult, SinkError, SinkResult};
pub use memory::InMemorySink;
pub use registry::{GlobalRegistration, Registration, RegistryEntry, StyleRegistry};
pub use sheet::SheetSink;
pub use traits::{RuleHandle, StyleSink};
