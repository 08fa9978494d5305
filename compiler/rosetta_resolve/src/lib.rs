//! Rule resolution for the Rosetta translator.
//!
//! [`Resolver`] turns a generic tree into a target-shaped one. Children are
//! resolved before their parent, so every rule only ever sees resolved
//! operands. Each `StandardMethodCall` is looked up by its receiver's generic
//! type, each `StandardCall` by its namespace, and the rule found is applied:
//!
//! | Rule | Result |
//! |---|---|
//! | `Rename` | `MethodCall` (or `Call` for namespaces), same arguments |
//! | `Operator` | `BinaryOp` / `UnaryOp` over receiver and arguments |
//! | `Format` | `Raw` text built from the rendered operands |
//! | `Rewrite` | whatever the rewrite function builds |
//!
//! A missing rule is [`TranslateError::UnsupportedOperation`]; calls are never
//! passed through unresolved.
//!
//! [`TranslateError::UnsupportedOperation`]: rosetta_ir::TranslateError::UnsupportedOperation

mod resolver;

pub use resolver::Resolver;
