//! Semantic type tags.
//!
//! Every node carries a [`SemanticType`]. Rule lookup only cares about the
//! outermost constructor, exposed as a [`GenericType`] discriminant, but the
//! full structure is kept so rewrites can compute result types
//! (`List<String>` indexed by `Int` is `String`, and so on).

use std::fmt;

/// Discriminant of a semantic type, used as the registry key.
///
/// Unlike [`SemanticType`] this carries no type arguments: `List<Int>` and
/// `List<String>` both map to [`GenericType::List`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum GenericType {
    // Primitives
    Int,
    Float,
    Boolean,
    String,
    Void,

    // Regular expressions
    Regexp,
    RegexpMatch,

    // Containers
    List,
    Dictionary,
    Set,
    Tuple,
    Array,

    Function,
}

impl GenericType {
    /// Get the display name for this generic type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::String => "String",
            Self::Void => "Void",
            Self::Regexp => "Regexp",
            Self::RegexpMatch => "RegexpMatch",
            Self::List => "List",
            Self::Dictionary => "Dictionary",
            Self::Set => "Set",
            Self::Tuple => "Tuple",
            Self::Array => "Array",
            Self::Function => "Function",
        }
    }

    /// Check if values of this type are indexable sequences.
    #[must_use]
    pub const fn is_sequence(self) -> bool {
        matches!(self, Self::List | Self::Tuple | Self::Array | Self::String)
    }
}

impl fmt::Display for GenericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Full semantic type of a node.
///
/// `Unknown` is what a node looks like when the front end failed to assign a
/// type. It is never produced by this crate and is rejected by the resolver
/// as an invalid input tree.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum SemanticType {
    Int,
    Float,
    Boolean,
    String,
    Void,
    Regexp,
    RegexpMatch,
    List(Box<SemanticType>),
    Dictionary(Box<SemanticType>, Box<SemanticType>),
    Set(Box<SemanticType>),
    Tuple(Vec<SemanticType>),
    Array(Box<SemanticType>, usize),
    Function(Vec<SemanticType>, Box<SemanticType>),
    Unknown,
}

impl SemanticType {
    /// `List<element>`.
    pub fn list(element: SemanticType) -> Self {
        Self::List(Box::new(element))
    }

    /// `Dictionary<key, value>`.
    pub fn dictionary(key: SemanticType, value: SemanticType) -> Self {
        Self::Dictionary(Box::new(key), Box::new(value))
    }

    /// `Set<element>`.
    pub fn set(element: SemanticType) -> Self {
        Self::Set(Box::new(element))
    }

    /// `Function<params..., ret>`.
    pub fn function(params: Vec<SemanticType>, ret: SemanticType) -> Self {
        Self::Function(params, Box::new(ret))
    }

    /// The registry key for this type, or `None` for [`SemanticType::Unknown`].
    #[must_use]
    pub fn generic(&self) -> Option<GenericType> {
        Some(match self {
            Self::Int => GenericType::Int,
            Self::Float => GenericType::Float,
            Self::Boolean => GenericType::Boolean,
            Self::String => GenericType::String,
            Self::Void => GenericType::Void,
            Self::Regexp => GenericType::Regexp,
            Self::RegexpMatch => GenericType::RegexpMatch,
            Self::List(_) => GenericType::List,
            Self::Dictionary(..) => GenericType::Dictionary,
            Self::Set(_) => GenericType::Set,
            Self::Tuple(_) => GenericType::Tuple,
            Self::Array(..) => GenericType::Array,
            Self::Function(..) => GenericType::Function,
            Self::Unknown => return None,
        })
    }

    /// Element type of a homogeneous sequence or set.
    ///
    /// Strings are sequences of strings. Returns `None` for anything else.
    #[must_use]
    pub fn element(&self) -> Option<&SemanticType> {
        match self {
            Self::List(element) | Self::Set(element) | Self::Array(element, _) => Some(element),
            Self::String => Some(&Self::String),
            _ => None,
        }
    }

    /// Check if this type (or any type nested in it) is `Unknown`.
    #[must_use]
    pub fn contains_unknown(&self) -> bool {
        match self {
            Self::Unknown => true,
            Self::List(inner) | Self::Set(inner) | Self::Array(inner, _) => inner.contains_unknown(),
            Self::Dictionary(key, value) => key.contains_unknown() || value.contains_unknown(),
            Self::Tuple(items) => items.iter().any(Self::contains_unknown),
            Self::Function(params, ret) => {
                params.iter().any(Self::contains_unknown) || ret.contains_unknown()
            }
            Self::Int
            | Self::Float
            | Self::Boolean
            | Self::String
            | Self::Void
            | Self::Regexp
            | Self::RegexpMatch => false,
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[SemanticType]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(element) => write!(f, "List<{element}>"),
            Self::Set(element) => write!(f, "Set<{element}>"),
            Self::Dictionary(key, value) => write!(f, "Dictionary<{key}, {value}>"),
            Self::Array(element, len) => write!(f, "Array<{element}, {len}>"),
            Self::Tuple(items) => {
                f.write_str("Tuple<")?;
                write_list(f, items)?;
                f.write_str(">")
            }
            Self::Function(params, ret) => {
                f.write_str("Function<")?;
                write_list(f, params)?;
                if !params.is_empty() {
                    f.write_str(", ")?;
                }
                write!(f, "{ret}>")
            }
            Self::Unknown => f.write_str("?"),
            other => match other.generic() {
                Some(generic) => f.write_str(generic.name()),
                None => f.write_str("?"),
            },
        }
    }
}

#[cfg(test)]
mod tests;
