//! Bundled target tables.
//!
//! Each constructor builds a fresh [`Target`](crate::Target). Building fails
//! only if a template set defines a node kind twice.

mod go;
mod ruby;

pub use go::go;
pub use ruby::ruby;
