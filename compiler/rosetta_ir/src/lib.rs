//! Rosetta IR - Generic Node Model
//!
//! This crate contains the data shared by every translation phase:
//! - [`Node`] / [`NodeKind`]: the tagged tree operations are expressed in
//! - [`SemanticType`] / [`GenericType`]: the type tag carried on every node
//! - [`Namespace`]: global library namespaces (`io`, `http`, ...)
//! - [`TranslateError`]: the error taxonomy of a translation run
//!
//! # Design Philosophy
//!
//! - **Values, not places**: nodes are immutable. Every rewrite builds a new
//!   node, so a half-rewritten tree is never observable.
//! - **Types travel with nodes**: the same operation name resolves differently
//!   depending on the receiver's semantic type, so the tag is never optional.

mod error;
mod namespace;
mod node;
mod semantic_type;
mod stack;

pub use error::{NodePath, PathSegment, TranslateError};
pub use namespace::Namespace;
pub use node::{Node, NodeKind, NodeTag};
pub use semantic_type::{GenericType, SemanticType};
pub use stack::ensure_sufficient_stack;
