//! The universal tree unit.
//!
//! A tree starts out *generic*: operations on built-in types are
//! [`NodeKind::StandardMethodCall`] and global library calls are
//! [`NodeKind::StandardCall`]. Resolution replaces those with *target*
//! shaped nodes ([`NodeKind::MethodCall`], [`NodeKind::Call`],
//! [`NodeKind::BlockCall`], operators, slices, ...). Everything else is shared
//! between the two stages.
//!
//! Nodes are immutable value objects. There is no `&mut` API: rewrites
//! construct new nodes, and [`Node::try_map_children`] rebuilds a node from
//! transformed children.

use crate::{Namespace, PathSegment, SemanticType};

/// A node of the generic or resolved tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Semantic type of the value this node produces.
    pub ty: SemanticType,
}

/// Node variants. See [`NodeTag`] for the field-less discriminant.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    // Literals
    Int(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Nil,
    List(Vec<Node>),
    Set(Vec<Node>),
    Tuple(Vec<Node>),
    /// Entries are [`NodeKind::Pair`] nodes.
    Dictionary(Vec<Node>),
    Pair {
        key: Box<Node>,
        value: Box<Node>,
    },

    // Names
    /// A local identifier.
    Name(String),
    /// A target-level constant or type name (`ARGV`, `Math`).
    Typename(String),
    /// Opaque target text produced by a format-string rule.
    Raw(String),

    // Generic operations
    /// Operation on a built-in type, resolved by the receiver's semantic type.
    StandardMethodCall {
        receiver: Box<Node>,
        operation: String,
        args: Vec<Node>,
    },
    /// Global library call, resolved by namespace.
    StandardCall {
        namespace: Namespace,
        operation: String,
        args: Vec<Node>,
    },

    // Target operations
    MethodCall {
        receiver: Box<Node>,
        name: String,
        args: Vec<Node>,
    },
    Call {
        function: String,
        args: Vec<Node>,
    },
    /// Method call taking a trailing block (`xs.select { |x| ... }`).
    BlockCall {
        receiver: Box<Node>,
        name: String,
        args: Vec<Node>,
        params: Vec<String>,
        block: Vec<Node>,
    },
    /// Compilation or interpolation marker consumed by the renderer.
    Interpolate {
        value: Box<Node>,
    },
    Slice {
        sequence: Box<Node>,
        from: Box<Node>,
        to: Box<Node>,
    },

    // Expressions
    AnonymousFunction {
        params: Vec<String>,
        body: Vec<Node>,
    },
    BinaryOp {
        op: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryOp {
        op: String,
        value: Box<Node>,
    },
    /// Parenthesized subexpression.
    Group {
        value: Box<Node>,
    },
    Index {
        sequence: Box<Node>,
        index: Box<Node>,
    },

    // Statements
    Assignment {
        target: Box<Node>,
        value: Box<Node>,
    },
    Return {
        value: Box<Node>,
    },
    Block(Vec<Node>),
    Function {
        name: String,
        params: Vec<String>,
        body: Vec<Node>,
    },
    Program(Vec<Node>),
}

/// Field-less discriminant of [`NodeKind`].
///
/// Used as the template key by the renderer and in error messages.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeTag {
    Int,
    Float,
    Boolean,
    String,
    Nil,
    List,
    Set,
    Tuple,
    Dictionary,
    Pair,
    Name,
    Typename,
    Raw,
    StandardMethodCall,
    StandardCall,
    MethodCall,
    Call,
    BlockCall,
    Interpolate,
    Slice,
    AnonymousFunction,
    BinaryOp,
    UnaryOp,
    Group,
    Index,
    Assignment,
    Return,
    Block,
    Function,
    Program,
}

impl NodeTag {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Nil => "nil",
            Self::List => "list",
            Self::Set => "set",
            Self::Tuple => "tuple",
            Self::Dictionary => "dictionary",
            Self::Pair => "pair",
            Self::Name => "name",
            Self::Typename => "typename",
            Self::Raw => "raw",
            Self::StandardMethodCall => "standard_method_call",
            Self::StandardCall => "standard_call",
            Self::MethodCall => "method_call",
            Self::Call => "call",
            Self::BlockCall => "block_call",
            Self::Interpolate => "interpolate",
            Self::Slice => "slice",
            Self::AnonymousFunction => "anonymous_function",
            Self::BinaryOp => "binary_op",
            Self::UnaryOp => "unary_op",
            Self::Group => "group",
            Self::Index => "index",
            Self::Assignment => "assignment",
            Self::Return => "return",
            Self::Block => "block",
            Self::Function => "function",
            Self::Program => "program",
        }
    }
}

impl std::fmt::Display for NodeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// Constructors

impl Node {
    pub fn new(kind: NodeKind, ty: SemanticType) -> Self {
        Self { kind, ty }
    }

    pub fn int(value: i64) -> Self {
        Self::new(NodeKind::Int(value), SemanticType::Int)
    }

    pub fn float(value: f64) -> Self {
        Self::new(NodeKind::Float(value), SemanticType::Float)
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(NodeKind::Boolean(value), SemanticType::Boolean)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(NodeKind::String(value.into()), SemanticType::String)
    }

    pub fn nil() -> Self {
        Self::new(NodeKind::Nil, SemanticType::Void)
    }

    pub fn list(elements: Vec<Node>, ty: SemanticType) -> Self {
        Self::new(NodeKind::List(elements), ty)
    }

    pub fn name(name: impl Into<String>, ty: SemanticType) -> Self {
        Self::new(NodeKind::Name(name.into()), ty)
    }

    pub fn typename(name: impl Into<String>, ty: SemanticType) -> Self {
        Self::new(NodeKind::Typename(name.into()), ty)
    }

    pub fn raw(text: impl Into<String>, ty: SemanticType) -> Self {
        Self::new(NodeKind::Raw(text.into()), ty)
    }

    pub fn standard_method_call(
        receiver: Node,
        operation: impl Into<String>,
        args: Vec<Node>,
        ty: SemanticType,
    ) -> Self {
        Self::new(
            NodeKind::StandardMethodCall {
                receiver: Box::new(receiver),
                operation: operation.into(),
                args,
            },
            ty,
        )
    }

    pub fn standard_call(
        namespace: Namespace,
        operation: impl Into<String>,
        args: Vec<Node>,
        ty: SemanticType,
    ) -> Self {
        Self::new(
            NodeKind::StandardCall {
                namespace,
                operation: operation.into(),
                args,
            },
            ty,
        )
    }

    pub fn method_call(
        receiver: Node,
        name: impl Into<String>,
        args: Vec<Node>,
        ty: SemanticType,
    ) -> Self {
        Self::new(
            NodeKind::MethodCall {
                receiver: Box::new(receiver),
                name: name.into(),
                args,
            },
            ty,
        )
    }

    pub fn call(function: impl Into<String>, args: Vec<Node>, ty: SemanticType) -> Self {
        Self::new(
            NodeKind::Call {
                function: function.into(),
                args,
            },
            ty,
        )
    }

    pub fn anonymous_function(params: Vec<String>, body: Vec<Node>, ty: SemanticType) -> Self {
        Self::new(NodeKind::AnonymousFunction { params, body }, ty)
    }

    pub fn binary_op(op: impl Into<String>, left: Node, right: Node, ty: SemanticType) -> Self {
        Self::new(
            NodeKind::BinaryOp {
                op: op.into(),
                left: Box::new(left),
                right: Box::new(right),
            },
            ty,
        )
    }

    pub fn unary_op(op: impl Into<String>, value: Node, ty: SemanticType) -> Self {
        Self::new(
            NodeKind::UnaryOp {
                op: op.into(),
                value: Box::new(value),
            },
            ty,
        )
    }

    /// Parenthesize `value`, keeping its semantic type.
    pub fn group(value: Node) -> Self {
        let ty = value.ty.clone();
        Self::new(
            NodeKind::Group {
                value: Box::new(value),
            },
            ty,
        )
    }

    pub fn index(sequence: Node, index: Node, ty: SemanticType) -> Self {
        Self::new(
            NodeKind::Index {
                sequence: Box::new(sequence),
                index: Box::new(index),
            },
            ty,
        )
    }

    pub fn assignment(target: Node, value: Node) -> Self {
        Self::new(
            NodeKind::Assignment {
                target: Box::new(target),
                value: Box::new(value),
            },
            SemanticType::Void,
        )
    }

    pub fn block(body: Vec<Node>) -> Self {
        Self::new(NodeKind::Block(body), SemanticType::Void)
    }

    pub fn function(name: impl Into<String>, params: Vec<String>, body: Vec<Node>) -> Self {
        Self::new(
            NodeKind::Function {
                name: name.into(),
                params,
                body,
            },
            SemanticType::Void,
        )
    }

    pub fn program(code: Vec<Node>) -> Self {
        Self::new(NodeKind::Program(code), SemanticType::Void)
    }
}

// Queries

impl Node {
    /// The field-less discriminant of this node's kind.
    #[must_use]
    pub fn tag(&self) -> NodeTag {
        match &self.kind {
            NodeKind::Int(_) => NodeTag::Int,
            NodeKind::Float(_) => NodeTag::Float,
            NodeKind::Boolean(_) => NodeTag::Boolean,
            NodeKind::String(_) => NodeTag::String,
            NodeKind::Nil => NodeTag::Nil,
            NodeKind::List(_) => NodeTag::List,
            NodeKind::Set(_) => NodeTag::Set,
            NodeKind::Tuple(_) => NodeTag::Tuple,
            NodeKind::Dictionary(_) => NodeTag::Dictionary,
            NodeKind::Pair { .. } => NodeTag::Pair,
            NodeKind::Name(_) => NodeTag::Name,
            NodeKind::Typename(_) => NodeTag::Typename,
            NodeKind::Raw(_) => NodeTag::Raw,
            NodeKind::StandardMethodCall { .. } => NodeTag::StandardMethodCall,
            NodeKind::StandardCall { .. } => NodeTag::StandardCall,
            NodeKind::MethodCall { .. } => NodeTag::MethodCall,
            NodeKind::Call { .. } => NodeTag::Call,
            NodeKind::BlockCall { .. } => NodeTag::BlockCall,
            NodeKind::Interpolate { .. } => NodeTag::Interpolate,
            NodeKind::Slice { .. } => NodeTag::Slice,
            NodeKind::AnonymousFunction { .. } => NodeTag::AnonymousFunction,
            NodeKind::BinaryOp { .. } => NodeTag::BinaryOp,
            NodeKind::UnaryOp { .. } => NodeTag::UnaryOp,
            NodeKind::Group { .. } => NodeTag::Group,
            NodeKind::Index { .. } => NodeTag::Index,
            NodeKind::Assignment { .. } => NodeTag::Assignment,
            NodeKind::Return { .. } => NodeTag::Return,
            NodeKind::Block(_) => NodeTag::Block,
            NodeKind::Function { .. } => NodeTag::Function,
            NodeKind::Program(_) => NodeTag::Program,
        }
    }

    /// The value of an integer literal.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self.kind {
            NodeKind::Int(value) => Some(value),
            _ => None,
        }
    }

    /// Length known without evaluating anything: element count of a literal
    /// collection, character count of a string literal.
    #[must_use]
    pub fn literal_len(&self) -> Option<usize> {
        match &self.kind {
            NodeKind::List(items) | NodeKind::Set(items) | NodeKind::Tuple(items) => {
                Some(items.len())
            }
            NodeKind::String(value) => Some(value.chars().count()),
            _ => None,
        }
    }
}

// Traversal

fn map_list<E>(
    field: &'static str,
    nodes: &[Node],
    f: &mut impl FnMut(PathSegment, &Node) -> Result<Node, E>,
) -> Result<Vec<Node>, E> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| f(PathSegment::Item(field, i), node))
        .collect()
}

fn map_one<E>(
    field: &'static str,
    node: &Node,
    f: &mut impl FnMut(PathSegment, &Node) -> Result<Node, E>,
) -> Result<Box<Node>, E> {
    f(PathSegment::Field(field), node).map(Box::new)
}

impl Node {
    /// Build a copy of this node whose direct children are replaced by
    /// `f(segment, child)`. Non-node fields and the semantic type are kept.
    ///
    /// Children are visited in source order. The first error stops the walk.
    pub fn try_map_children<E>(
        &self,
        mut f: impl FnMut(PathSegment, &Node) -> Result<Node, E>,
    ) -> Result<Node, E> {
        let f = &mut f;
        let kind = match &self.kind {
            NodeKind::Int(_)
            | NodeKind::Float(_)
            | NodeKind::Boolean(_)
            | NodeKind::String(_)
            | NodeKind::Nil
            | NodeKind::Name(_)
            | NodeKind::Typename(_)
            | NodeKind::Raw(_) => self.kind.clone(),
            NodeKind::List(items) => NodeKind::List(map_list("elements", items, f)?),
            NodeKind::Set(items) => NodeKind::Set(map_list("elements", items, f)?),
            NodeKind::Tuple(items) => NodeKind::Tuple(map_list("elements", items, f)?),
            NodeKind::Dictionary(pairs) => NodeKind::Dictionary(map_list("pairs", pairs, f)?),
            NodeKind::Pair { key, value } => NodeKind::Pair {
                key: map_one("key", key, f)?,
                value: map_one("value", value, f)?,
            },
            NodeKind::StandardMethodCall {
                receiver,
                operation,
                args,
            } => NodeKind::StandardMethodCall {
                receiver: map_one("receiver", receiver, f)?,
                operation: operation.clone(),
                args: map_list("args", args, f)?,
            },
            NodeKind::StandardCall {
                namespace,
                operation,
                args,
            } => NodeKind::StandardCall {
                namespace: *namespace,
                operation: operation.clone(),
                args: map_list("args", args, f)?,
            },
            NodeKind::MethodCall {
                receiver,
                name,
                args,
            } => NodeKind::MethodCall {
                receiver: map_one("receiver", receiver, f)?,
                name: name.clone(),
                args: map_list("args", args, f)?,
            },
            NodeKind::Call { function, args } => NodeKind::Call {
                function: function.clone(),
                args: map_list("args", args, f)?,
            },
            NodeKind::BlockCall {
                receiver,
                name,
                args,
                params,
                block,
            } => NodeKind::BlockCall {
                receiver: map_one("receiver", receiver, f)?,
                name: name.clone(),
                args: map_list("args", args, f)?,
                params: params.clone(),
                block: map_list("block", block, f)?,
            },
            NodeKind::Interpolate { value } => NodeKind::Interpolate {
                value: map_one("value", value, f)?,
            },
            NodeKind::Slice { sequence, from, to } => NodeKind::Slice {
                sequence: map_one("sequence", sequence, f)?,
                from: map_one("from", from, f)?,
                to: map_one("to", to, f)?,
            },
            NodeKind::AnonymousFunction { params, body } => NodeKind::AnonymousFunction {
                params: params.clone(),
                body: map_list("body", body, f)?,
            },
            NodeKind::BinaryOp { op, left, right } => NodeKind::BinaryOp {
                op: op.clone(),
                left: map_one("left", left, f)?,
                right: map_one("right", right, f)?,
            },
            NodeKind::UnaryOp { op, value } => NodeKind::UnaryOp {
                op: op.clone(),
                value: map_one("value", value, f)?,
            },
            NodeKind::Group { value } => NodeKind::Group {
                value: map_one("value", value, f)?,
            },
            NodeKind::Index { sequence, index } => NodeKind::Index {
                sequence: map_one("sequence", sequence, f)?,
                index: map_one("index", index, f)?,
            },
            NodeKind::Assignment { target, value } => NodeKind::Assignment {
                target: map_one("target", target, f)?,
                value: map_one("value", value, f)?,
            },
            NodeKind::Return { value } => NodeKind::Return {
                value: map_one("value", value, f)?,
            },
            NodeKind::Block(body) => NodeKind::Block(map_list("body", body, f)?),
            NodeKind::Function { name, params, body } => NodeKind::Function {
                name: name.clone(),
                params: params.clone(),
                body: map_list("body", body, f)?,
            },
            NodeKind::Program(code) => NodeKind::Program(map_list("code", code, f)?),
        };
        Ok(Node::new(kind, self.ty.clone()))
    }
}
