//! Rule kinds.
//!
//! Resolution is an exhaustive `match` over [`Rule`]; there is no runtime
//! type inspection of rule values.

use std::fmt;

use rosetta_ir::Node;

use crate::rewrites::{RewriteCall, RewriteError};

/// How a generic operation maps onto the target.
#[derive(Debug)]
pub enum Rule {
    /// Fixed target method (on a type) or function (in a namespace) name.
    /// Receiver and arguments pass through unchanged.
    Rename(String),
    /// Target operator; the call becomes an operator expression.
    Operator(Operator),
    /// Textual pattern over the rendered receiver and arguments.
    Format(FormatString),
    /// Arbitrary rewrite producing a new node tree.
    Rewrite(RewriteFn),
}

/// Number of operands an operator takes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    /// Operand count.
    pub const fn operands(self) -> usize {
        match self {
            Self::Unary => 1,
            Self::Binary => 2,
        }
    }
}

/// A target operator token and its arity.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Operator {
    pub token: String,
    pub arity: Arity,
}

/// Signature shared by every rewrite function.
pub type RewriteSignature = dyn Fn(&RewriteCall<'_>) -> Result<Node, RewriteError> + Send + Sync;

/// A boxed rewrite function.
///
/// `Send + Sync` so a registry can be shared by translation runs on
/// different threads.
pub struct RewriteFn(Box<RewriteSignature>);

impl RewriteFn {
    pub fn new(
        f: impl Fn(&RewriteCall<'_>) -> Result<Node, RewriteError> + Send + Sync + 'static,
    ) -> Self {
        Self(Box::new(f))
    }

    /// Apply the rewrite.
    pub fn apply(&self, call: &RewriteCall<'_>) -> Result<Node, RewriteError> {
        (self.0)(call)
    }
}

impl fmt::Debug for RewriteFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RewriteFn(..)")
    }
}

/// One piece of a parsed [`FormatString`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum FormatPiece {
    Literal(String),
    /// `%{self}`
    Receiver,
    /// `%{N}`
    Arg(usize),
}

/// A format-string rule such as `%{0}.scan(%{self})`.
///
/// Placeholders are `%{self}` for the receiver and `%{N}` for the N-th
/// argument. Anything else, including a malformed `%{...}`, is literal text.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FormatString {
    pieces: Vec<FormatPiece>,
}

impl FormatString {
    /// Parse a format string.
    pub fn parse(text: &str) -> Self {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut rest = text;

        while let Some(start) = rest.find("%{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                break;
            };
            let inner = &after[..end];
            let piece = if inner == "self" {
                Some(FormatPiece::Receiver)
            } else {
                inner.parse::<usize>().ok().map(FormatPiece::Arg)
            };

            match piece {
                Some(piece) => {
                    literal.push_str(&rest[..start]);
                    if !literal.is_empty() {
                        pieces.push(FormatPiece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(piece);
                }
                None => literal.push_str(&rest[..start + 3 + end]),
            }
            rest = &after[end + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            pieces.push(FormatPiece::Literal(literal));
        }
        Self { pieces }
    }

    pub fn pieces(&self) -> &[FormatPiece] {
        &self.pieces
    }

    /// Check if the pattern refers to the receiver.
    pub fn uses_receiver(&self) -> bool {
        self.pieces.contains(&FormatPiece::Receiver)
    }

    /// Substitute rendered fragments into the pattern.
    ///
    /// `receiver` is `None` for namespace calls. A placeholder with no
    /// matching fragment is reported against its argument position.
    pub fn expand(&self, receiver: Option<&str>, args: &[String]) -> Result<String, RewriteError> {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                FormatPiece::Literal(text) => out.push_str(text),
                FormatPiece::Receiver => match receiver {
                    Some(text) => out.push_str(text),
                    None => return Err(RewriteError::new(0, "`%{self}` used without a receiver")),
                },
                FormatPiece::Arg(index) => match args.get(*index) {
                    Some(text) => out.push_str(text),
                    None => {
                        return Err(RewriteError::new(
                            *index,
                            format!("missing argument for `%{{{index}}}`"),
                        ))
                    }
                },
            }
        }
        Ok(out)
    }
}
