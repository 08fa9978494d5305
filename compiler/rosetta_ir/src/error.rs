//! Translation error taxonomy.
//!
//! All four errors are terminal for the current run: they describe either a
//! gap in a target's configuration (missing rule, missing template) or a
//! contract violation by the front end. Each one carries the target name and
//! the path of the offending node so the missing mapping can be found without
//! re-running with tracing enabled.

use std::fmt;

use crate::NodeTag;

/// One step from a parent node to a child.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PathSegment {
    /// A single-node field (`receiver`, `left`).
    Field(&'static str),
    /// An element of a list field (`args[1]`).
    Item(&'static str, usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Item(name, index) => write!(f, "{name}[{index}]"),
        }
    }
}

/// Location of a node inside the tree handed to a translation run.
///
/// Displays as `root.code[0].args[1]`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    /// The root of the tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// A path made of the given segments.
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for segment in &self.segments {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

/// Error raised by a translation run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// No rule for a generic type + operation or namespace + operation pair.
    ///
    /// `owner` is the generic type name (`Set`) or the namespace (`io`).
    #[error("[{target}] unsupported operation `{operation}` on `{owner}` at {path}")]
    UnsupportedOperation {
        target: String,
        owner: String,
        operation: String,
        path: NodePath,
    },

    /// A rule was handed an argument shape it does not accept.
    #[error(
        "[{target}] malformed input to `{owner}.{operation}`: argument {position}: {reason} at {path}"
    )]
    MalformedRewriteInput {
        target: String,
        owner: String,
        operation: String,
        position: usize,
        reason: String,
        path: NodePath,
    },

    /// The renderer has no template for a node kind, or the template names a
    /// field the node kind does not have.
    #[error("[{target}] {} at {path}", missing_template_detail(*kind, field.as_deref()))]
    MissingTemplate {
        target: String,
        kind: NodeTag,
        field: Option<String>,
        path: NodePath,
    },

    /// The tree violates the front end's contract (e.g. a node without a
    /// semantic type).
    #[error("[{target}] invalid input tree at {path}: {reason}")]
    InvalidInputTree {
        target: String,
        reason: String,
        path: NodePath,
    },
}

fn missing_template_detail(kind: NodeTag, field: Option<&str>) -> String {
    match field {
        Some(field) => format!("template for `{kind}` uses unknown field `{field}`"),
        None => format!("no template for node kind `{kind}`"),
    }
}

impl TranslateError {
    /// Path of the node the error was raised for.
    pub fn path(&self) -> &NodePath {
        match self {
            Self::UnsupportedOperation { path, .. }
            | Self::MalformedRewriteInput { path, .. }
            | Self::MissingTemplate { path, .. }
            | Self::InvalidInputTree { path, .. } => path,
        }
    }

    /// Name of the target the run was translating to.
    pub fn target(&self) -> &str {
        match self {
            Self::UnsupportedOperation { target, .. }
            | Self::MalformedRewriteInput { target, .. }
            | Self::MissingTemplate { target, .. }
            | Self::InvalidInputTree { target, .. } => target,
        }
    }
}
