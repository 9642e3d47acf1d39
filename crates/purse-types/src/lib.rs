//! Foundation types for Purse.
//!
//! This crate provides the data model shared by the compiler, the registry,
//! and the SDK. Every other Purse crate depends on `purse-types`.
//!
//! # Key Types
//!
//! - [`StyleObject`] — raw, insertion-ordered style declarations
//! - [`StyleElement`] — immutable compiled unit, composable into a DAG
//! - [`StyleInput`] — tagged builder argument: element or raw declarations
//! - [`ClassName`] — content-addressed CSS class token
//! - [`StyleRule`] — one complete stylesheet rule
//! - [`CssVar`] — `var(--name)` custom-property reference

pub mod class_list;
pub mod class_name;
pub mod css_var;
pub mod declaration;
pub mod element;
pub mod error;
pub mod rule;

pub use class_list::join_class_names;
pub use class_name::ClassName;
pub use css_var::CssVar;
pub use declaration::{Declarations, StyleEntry, StyleObject, StyleValue};
pub use element::{OwnedFragment, StyleElement, StyleInput};
pub use error::TypeError;
pub use rule::StyleRule;
