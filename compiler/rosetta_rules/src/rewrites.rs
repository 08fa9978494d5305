//! Rewrite function library.
//!
//! Escape-hatch implementations for operations that are not a simple rename
//! or operator on the target. Every function here is pure and total over
//! well-formed input: it builds a new node tree from the (already resolved)
//! receiver and arguments and sets the semantic type of the result.
//!
//! Functions that differ between targets only by a name (the target's
//! "select" method, its argument vector constant) are constructors returning
//! the rewrite closure, e.g. [`block_method`] or [`zero_based_index`].
//!
//! An argument shape a rewrite does not recognize is reported as a
//! [`RewriteError`] naming the offending argument position. The resolver
//! attaches target, operation and node path.

use rosetta_ir::{Node, NodeKind, SemanticType};

/// Input to a rewrite function.
#[derive(Copy, Clone, Debug)]
pub struct RewriteCall<'a> {
    /// Generic operation name (`slice_from`, `present?`).
    pub operation: &'a str,
    /// Resolved receiver; `None` for namespace calls.
    pub receiver: Option<&'a Node>,
    /// Resolved arguments, in call order.
    pub args: &'a [Node],
    /// Semantic type of the call being rewritten.
    pub ty: &'a SemanticType,
}

/// A rewrite function was handed an argument it does not accept.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("argument {position}: {reason}")]
pub struct RewriteError {
    pub position: usize,
    pub reason: String,
}

impl RewriteError {
    pub fn new(position: usize, reason: impl Into<String>) -> Self {
        Self {
            position,
            reason: reason.into(),
        }
    }
}

impl<'a> RewriteCall<'a> {
    /// Require exactly `expected` arguments.
    pub fn arity(&self, expected: usize) -> Result<(), RewriteError> {
        match self.args.len() {
            n if n == expected => Ok(()),
            n if n < expected => Err(RewriteError::new(
                n,
                format!("`{}` expects {expected} argument(s), got {n}", self.operation),
            )),
            n => Err(RewriteError::new(
                expected,
                format!("`{}` expects {expected} argument(s), got {n}", self.operation),
            )),
        }
    }

    /// The argument at `position`.
    pub fn arg(&self, position: usize) -> Result<&'a Node, RewriteError> {
        self.args
            .get(position)
            .ok_or_else(|| RewriteError::new(position, "argument is missing"))
    }

    /// The receiver; rewrites of namespace calls have none.
    pub fn receiver(&self) -> Result<&'a Node, RewriteError> {
        self.receiver
            .ok_or_else(|| RewriteError::new(0, format!("`{}` needs a receiver", self.operation)))
    }
}

/// A boxed rewrite closure, as returned by the constructors in this module.
pub type Rewrite = Box<dyn Fn(&RewriteCall<'_>) -> Result<Node, RewriteError> + Send + Sync>;

// Arithmetic helpers

/// `left - right`, folded when both sides are integer literals.
///
/// Operator operands are grouped: templates print operators without
/// precedence, so `j - (i + 1)` must not come out as `j - i + 1`.
fn subtract(left: &Node, right: &Node) -> Node {
    let runtime = || Node::binary_op("-", grouped(left), grouped(right), SemanticType::Int);
    match (left.as_int(), right.as_int()) {
        (Some(l), Some(r)) => l.checked_sub(r).map_or_else(runtime, Node::int),
        (_, Some(0)) => left.clone(),
        _ => runtime(),
    }
}

fn grouped(operand: &Node) -> Node {
    match operand.kind {
        NodeKind::BinaryOp { .. } => Node::group(operand.clone()),
        _ => operand.clone(),
    }
}

// Slicing

/// Which bounds a slicing operation supplies.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SliceBounds {
    /// `slice(from, to)`
    Both,
    /// `slice_from(from)`, end defaults to the length.
    From,
    /// `slice_to(to)`, start defaults to `0`.
    To,
}

/// How a target spells the length of a sequence.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Length {
    /// Zero-argument method: `xs.length()`.
    Method(&'static str),
    /// Function taking the sequence: `len(xs)`.
    Builtin(&'static str),
}

impl Length {
    /// The length of `sequence`, as the target writes it.
    pub fn of(self, sequence: &Node) -> Node {
        match self {
            Self::Method(name) => {
                Node::method_call(sequence.clone(), name, vec![], SemanticType::Int)
            }
            Self::Builtin(name) => Node::call(name, vec![sequence.clone()], SemanticType::Int),
        }
    }
}

/// Target names used by [`expand_slice`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Slicing {
    pub length: Length,
    /// Method taking `(start, count)` used for string receivers. `None` means
    /// strings use the same slice syntax as sequences.
    pub substring_method: Option<&'static str>,
}

/// Canonicalize `slice`, `slice_from` and `slice_to` into one slicing form.
///
/// The missing bound defaults to `0` (start) or the receiver's length (end).
/// The length is folded to a literal when the receiver is a literal, so
/// `slice_from(k)` and `slice(k, n)` agree whenever `n` is the known length.
pub fn expand_slice(bounds: SliceBounds, slicing: Slicing) -> Rewrite {
    Box::new(move |call: &RewriteCall<'_>| {
        let receiver = call.receiver()?;
        let (from, to) = match bounds {
            SliceBounds::Both => {
                call.arity(2)?;
                (call.arg(0)?.clone(), call.arg(1)?.clone())
            }
            SliceBounds::From => {
                call.arity(1)?;
                (call.arg(0)?.clone(), sequence_length(receiver, slicing))
            }
            SliceBounds::To => {
                call.arity(1)?;
                (Node::int(0), call.arg(0)?.clone())
            }
        };

        match (call.ty, slicing.substring_method) {
            (SemanticType::String, Some(method)) => {
                let count = subtract(&to, &from);
                Ok(Node::method_call(
                    receiver.clone(),
                    method,
                    vec![from, count],
                    SemanticType::String,
                ))
            }
            _ => Ok(Node::new(
                NodeKind::Slice {
                    sequence: Box::new(receiver.clone()),
                    from: Box::new(from),
                    to: Box::new(to),
                },
                call.ty.clone(),
            )),
        }
    })
}

fn sequence_length(receiver: &Node, slicing: Slicing) -> Node {
    match receiver.literal_len().and_then(|len| i64::try_from(len).ok()) {
        Some(len) => Node::int(len),
        None => slicing.length.of(receiver),
    }
}

/// Call the target's `name` function with the receiver as its first
/// argument (`xs.length` to `len(xs)`).
pub fn builtin_call(name: &'static str) -> Rewrite {
    Box::new(move |call: &RewriteCall<'_>| {
        let receiver = call.receiver()?;
        let args = std::iter::once(receiver.clone())
            .chain(call.args.iter().cloned())
            .collect();
        Ok(Node::call(name, args, call.ty.clone()))
    })
}

// Higher-order operations

/// Turn `map`/`filter`/`reduce`/`any?`/`all?` with an inline function into
/// the target's block form, renamed to `name`.
///
/// The inline function must be the first argument. Any further arguments
/// (the initial value of `reduce`) are passed to the call.
pub fn block_method(name: &'static str) -> Rewrite {
    Box::new(move |call: &RewriteCall<'_>| {
        let receiver = call.receiver()?;
        let function = call.arg(0)?;
        let NodeKind::AnonymousFunction { params, body } = &function.kind else {
            return Err(RewriteError::new(
                0,
                format!("expected an inline function, found `{}`", function.tag()),
            ));
        };
        Ok(Node::new(
            NodeKind::BlockCall {
                receiver: Box::new(receiver.clone()),
                name: name.to_string(),
                args: call.args[1..].to_vec(),
                params: params.clone(),
                block: body.clone(),
            },
            call.ty.clone(),
        ))
    })
}

// Presence

/// Express a positive predicate (`present?`, `has_match`) as the negation of
/// the target's `primitive` (`empty?`). Always `Boolean`.
pub fn negated_method(primitive: &'static str) -> Rewrite {
    Box::new(move |call: &RewriteCall<'_>| {
        let receiver = call.receiver()?;
        call.arity(0)?;
        Ok(Node::unary_op(
            "!",
            Node::method_call(receiver.clone(), primitive, vec![], SemanticType::Boolean),
            SemanticType::Boolean,
        ))
    })
}

// Index base

/// Rewrite a 1-based argument index into the target's 0-based `sequence`.
///
/// A literal index is folded at resolve time; anything else becomes a
/// runtime subtraction. Both produce the same number.
pub fn zero_based_index(sequence: &'static str) -> Rewrite {
    Box::new(move |call: &RewriteCall<'_>| {
        call.arity(1)?;
        let index = call.arg(0)?;
        if index.ty != SemanticType::Int {
            return Err(RewriteError::new(
                0,
                format!("index must be `Int`, found `{}`", index.ty),
            ));
        }
        Ok(Node::index(
            Node::typename(sequence, SemanticType::list(SemanticType::String)),
            subtract(index, &Node::int(1)),
            call.ty.clone(),
        ))
    })
}

/// A target constant standing in for a zero-argument call (`system.args`).
pub fn typename(name: &'static str) -> Rewrite {
    Box::new(move |call: &RewriteCall<'_>| {
        call.arity(0)?;
        Ok(Node::typename(name, call.ty.clone()))
    })
}

// Wrappers

/// Wrap the single argument in an interpolation/compilation marker.
///
/// The marker carries the call's semantic type, so the rest of the tree
/// sees the same type it would without the wrapper.
pub fn interpolate(call: &RewriteCall<'_>) -> Result<Node, RewriteError> {
    call.arity(1)?;
    Ok(Node::new(
        NodeKind::Interpolate {
            value: Box::new(call.arg(0)?.clone()),
        },
        call.ty.clone(),
    ))
}

/// `match.group(i)` on targets where a match is a list of capture lists.
pub fn regexp_group(call: &RewriteCall<'_>) -> Result<Node, RewriteError> {
    let receiver = call.receiver()?;
    call.arity(1)?;
    Ok(Node::index(
        Node::index(
            receiver.clone(),
            call.arg(0)?.clone(),
            SemanticType::list(SemanticType::String),
        ),
        Node::int(0),
        SemanticType::String,
    ))
}

/// Print values with the target's `function`; several values are joined
/// with a space first.
pub fn display(function: &'static str) -> Rewrite {
    Box::new(move |call: &RewriteCall<'_>| match call.args {
        [] => Err(RewriteError::new(0, "nothing to display")),
        [value] => Ok(Node::call(function, vec![value.clone()], call.ty.clone())),
        values => {
            let joined = Node::method_call(
                Node::list(values.to_vec(), SemanticType::list(SemanticType::String)),
                "join",
                vec![Node::string(" ")],
                SemanticType::String,
            );
            Ok(Node::call(function, vec![joined], call.ty.clone()))
        }
    })
}

/// Replace the call with an empty block.
pub fn empty_block(call: &RewriteCall<'_>) -> Result<Node, RewriteError> {
    call.arity(0)?;
    Ok(Node::block(vec![]))
}
