//! Style compiler for Purse.
//!
//! Turns nested style objects into content-addressed [`StyleElement`]s:
//!
//! 1. Raw inputs are merged left to right ([`merge_style_objects`]).
//! 2. The merged object is partitioned into groups keyed by `""`, an at-rule,
//!    or a nested selector ([`group_style_object`]).
//! 3. Each group is rendered as `prop:value;` text, with camelCase names
//!    hyphenated and `px` appended to numbers outside the unit-less list.
//! 4. The rendered groups are hashed into a [`ClassName`], and one rule is
//!    emitted per group with `&` replaced by the class selector.
//!
//! ```rust
//! use purse_compiler::Compiler;
//! use purse_types::{Declarations, StyleObject};
//!
//! let mut compiler = Compiler::new();
//! let button = compiler
//!     .build([StyleObject::new()
//!         .with("color", "red")
//!         .nested("&:hover", Declarations::new().with("color", "blue"))])
//!     .unwrap();
//! let rules = &button.owned.as_ref().unwrap().style_rules;
//! assert_eq!(rules.len(), 2);
//! assert!(rules[1].as_str().ends_with(":hover{color:blue;}"));
//! ```
//!
//! [`StyleElement`]: purse_types::StyleElement
//! [`ClassName`]: purse_types::ClassName

pub mod case;
pub mod compiler;
pub mod error;
pub mod group;
pub mod units;

pub use case::{hyphenate_property, PropertyNameCache};
pub use compiler::{flatten_rules, Compiler};
pub use error::{CompileError, CompileResult};
pub use group::{group_style_object, merge_style_objects, GroupKind};
pub use units::{format_number, is_unitless, render_value, UNITLESS_NUMBER_PROPS};
