//! Translation tables for the Rosetta translator.
//!
//! A target is described by static data: one [`TypeRules`] per generic type,
//! one [`RuleSet`] per global namespace, and the library [`Dependencies`]
//! each namespace pulls in. The [`Registry`] bundles them for one target and
//! is never mutated after [`RegistryBuilder::build`].
//!
//! Rules come in four kinds (see [`Rule`]). Simple renames and operators are
//! data; idioms with no 1:1 equivalent are [`Rule::Rewrite`] functions, most
//! of which live in [`rewrites`].
//!
//! # Example
//!
//! ```ignore
//! use rosetta_rules::{rewrites, Registry, RuleSet, TypeRules};
//!
//! let registry = Registry::builder("ruby")
//!     .types(
//!         GenericType::List,
//!         TypeRules::new("Array", RuleSet::new().rename("length", "length")),
//!     )
//!     .build();
//! ```

mod registry;
pub mod rewrites;
mod rule;

pub use registry::{Dependencies, Registry, RegistryBuilder, RuleSet, TypeRules};
pub use rewrites::{Length, Rewrite, RewriteCall, RewriteError, SliceBounds, Slicing};
pub use rule::{Arity, FormatPiece, FormatString, Operator, RewriteFn, Rule};
