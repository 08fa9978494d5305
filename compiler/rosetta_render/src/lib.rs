//! Template renderer for resolved node trees.
//!
//! Each target supplies a [`TemplateSet`]: one [`Template`] per node kind.
//! A template is text with `%{field}` placeholders bound to the fields of the
//! node being rendered (see the field table in [`fields`]). Children are
//! rendered first and substituted into their parent's placeholders.
//!
//! # Indentation
//!
//! Templates built with [`Template::indented`] are dedented, and the leading
//! indentation of each of their lines (4 spaces per level) is pushed onto the
//! renderer's indent stack while that line's placeholders are expanded. A
//! block body placed on an indented line therefore keeps its nesting however
//! many lines it spans.
//!
//! ```text
//! Template::indented("
//!     func %{name}() {
//!         %{body}
//!     }
//! ")
//! ```

pub mod fields;
mod renderer;
mod template;

pub use renderer::{render, Renderer};
pub use template::{DuplicateTemplate, Piece, Template, TemplateLine, TemplateSet};
