//! Placeholder bindings for each node kind.
//!
//! | Kind | Fields |
//! |---|---|
//! | literals, `name`, `typename`, `raw` | `value` |
//! | `list`, `set`, `tuple` | `elements` |
//! | `dictionary` / `pair` | `pairs` / `key`, `value` |
//! | `standard_method_call`, `method_call` | `receiver`, `name`, `args` |
//! | `standard_call` | `namespace`, `name`, `args` |
//! | `call` | `name`, `args` |
//! | `block_call` | `receiver`, `name`, `args`, `params`, `block` |
//! | `interpolate` | `value` |
//! | `slice` | `sequence`, `from`, `to` |
//! | `anonymous_function` | `params`, `body` |
//! | `binary_op` | `op`, `left`, `right` |
//! | `unary_op` | `op`, `value` |
//! | `group` | `value` |
//! | `index` | `sequence`, `index` |
//! | `assignment` | `target`, `value` |
//! | `return` | `value` |
//! | `block` | `body` |
//! | `function` | `name`, `params`, `body` |
//! | `program` | `code` |
//!
//! Statement lists (`block`, `body`, `code`) are joined one per line; every
//! other list is joined with `", "`. `params` is plain text.

use std::borrow::Cow;

use rosetta_ir::{Node, NodeKind};

/// How the elements of a list field are joined.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Separator {
    /// `", "`
    Comma,
    /// One element per line, at the current indentation.
    Line,
}

/// The value bound to a placeholder.
#[derive(Clone, Debug)]
pub enum Field<'n> {
    Text(Cow<'n, str>),
    Node(&'static str, &'n Node),
    Nodes(&'static str, &'n [Node], Separator),
}

/// Escape a string literal body for a double-quoted target literal.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

fn text(value: &str) -> Option<Field<'_>> {
    Some(Field::Text(Cow::Borrowed(value)))
}

fn owned<'n>(value: String) -> Option<Field<'n>> {
    Some(Field::Text(Cow::Owned(value)))
}

fn params(names: &[String]) -> Option<Field<'_>> {
    owned(names.join(", "))
}

fn node<'n>(name: &'static str, value: &'n Node) -> Option<Field<'n>> {
    Some(Field::Node(name, value))
}

fn args(nodes: &[Node]) -> Option<Field<'_>> {
    Some(Field::Nodes("args", nodes, Separator::Comma))
}

fn statements<'n>(name: &'static str, nodes: &'n [Node]) -> Option<Field<'n>> {
    Some(Field::Nodes(name, nodes, Separator::Line))
}

/// Look up the field `name` of `this`. `None` if the kind has no such field.
pub fn field<'n>(this: &'n Node, name: &str) -> Option<Field<'n>> {
    match (&this.kind, name) {
        (NodeKind::Int(value), "value") => owned(value.to_string()),
        (NodeKind::Float(value), "value") => owned(format!("{value:?}")),
        (NodeKind::Boolean(value), "value") => text(if *value { "true" } else { "false" }),
        (NodeKind::String(value), "value") => owned(escape_string(value)),
        (NodeKind::Name(value) | NodeKind::Typename(value) | NodeKind::Raw(value), "value") => {
            text(value)
        }

        (NodeKind::List(items) | NodeKind::Set(items) | NodeKind::Tuple(items), "elements") => {
            Some(Field::Nodes("elements", items, Separator::Comma))
        }
        (NodeKind::Dictionary(pairs), "pairs") => {
            Some(Field::Nodes("pairs", pairs, Separator::Comma))
        }
        (NodeKind::Pair { key, .. }, "key") => node("key", key),
        (NodeKind::Pair { value, .. }, "value") => node("value", value),

        (
            NodeKind::StandardMethodCall { receiver, .. }
            | NodeKind::MethodCall { receiver, .. }
            | NodeKind::BlockCall { receiver, .. },
            "receiver",
        ) => node("receiver", receiver),
        (
            NodeKind::StandardMethodCall { operation: name, .. }
            | NodeKind::StandardCall { operation: name, .. }
            | NodeKind::MethodCall { name, .. }
            | NodeKind::Call { function: name, .. }
            | NodeKind::BlockCall { name, .. }
            | NodeKind::Function { name, .. },
            "name",
        ) => text(name),
        (
            NodeKind::StandardMethodCall { args: list, .. }
            | NodeKind::StandardCall { args: list, .. }
            | NodeKind::MethodCall { args: list, .. }
            | NodeKind::Call { args: list, .. }
            | NodeKind::BlockCall { args: list, .. },
            "args",
        ) => args(list),
        (NodeKind::StandardCall { namespace, .. }, "namespace") => text(namespace.name()),
        (
            NodeKind::BlockCall { params: names, .. }
            | NodeKind::AnonymousFunction { params: names, .. }
            | NodeKind::Function { params: names, .. },
            "params",
        ) => params(names),
        (NodeKind::BlockCall { block, .. }, "block") => statements("block", block),

        (NodeKind::Interpolate { value }, "value") => node("value", value),
        (NodeKind::Slice { sequence, .. }, "sequence") => node("sequence", sequence),
        (NodeKind::Slice { from, .. }, "from") => node("from", from),
        (NodeKind::Slice { to, .. }, "to") => node("to", to),

        (
            NodeKind::BinaryOp { op, .. } | NodeKind::UnaryOp { op, .. },
            "op",
        ) => text(op),
        (NodeKind::BinaryOp { left, .. }, "left") => node("left", left),
        (NodeKind::BinaryOp { right, .. }, "right") => node("right", right),
        (
            NodeKind::UnaryOp { value, .. } | NodeKind::Group { value },
            "value",
        ) => node("value", value),
        (NodeKind::Index { sequence, .. }, "sequence") => node("sequence", sequence),
        (NodeKind::Index { index, .. }, "index") => node("index", index),

        (NodeKind::Assignment { target, .. }, "target") => node("target", target),
        (NodeKind::Assignment { value, .. } | NodeKind::Return { value }, "value") => {
            node("value", value)
        }
        (
            NodeKind::AnonymousFunction { body, .. }
            | NodeKind::Function { body, .. }
            | NodeKind::Block(body),
            "body",
        ) => statements("body", body),
        (NodeKind::Program(code), "code") => statements("code", code),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosetta_ir::{Namespace, SemanticType};

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("a\"b\\c\nd"), "a\\\"b\\\\c\\nd");
        assert_eq!(escape_string("it's"), "it's");
    }

    #[test]
    fn test_literal_values() {
        let float = Node::float(1.0);
        let Some(Field::Text(value)) = field(&float, "value") else {
            panic!("float has a value");
        };
        assert_eq!(value, "1.0");

        let boolean = Node::boolean(false);
        let Some(Field::Text(value)) = field(&boolean, "value") else {
            panic!("boolean has a value");
        };
        assert_eq!(value, "false");
    }

    #[test]
    fn test_call_fields() {
        let call = Node::call("File.read", vec![Node::string("a")], SemanticType::String);
        assert!(matches!(field(&call, "name"), Some(Field::Text(name)) if name == "File.read"));
        assert!(matches!(
            field(&call, "args"),
            Some(Field::Nodes("args", [_], Separator::Comma))
        ));
        assert!(field(&call, "receiver").is_none());
    }

    #[test]
    fn test_statement_lists_are_line_separated() {
        let function = Node::function("main", vec![], vec![Node::int(1)]);
        assert!(matches!(
            field(&function, "body"),
            Some(Field::Nodes("body", _, Separator::Line))
        ));
        assert!(matches!(
            field(&Node::program(vec![]), "code"),
            Some(Field::Nodes("code", [], Separator::Line))
        ));
    }

    #[test]
    fn test_standard_call_namespace() {
        let call = Node::standard_call(Namespace::Math, "sin", vec![], SemanticType::Float);
        assert!(matches!(field(&call, "namespace"), Some(Field::Text(ns)) if ns == "math"));
        assert!(matches!(field(&call, "name"), Some(Field::Text(name)) if name == "sin"));
    }

    #[test]
    fn test_params_joined() {
        let f = Node::anonymous_function(
            vec!["a".into(), "b".into()],
            vec![],
            SemanticType::function(vec![], SemanticType::Void),
        );
        assert!(matches!(field(&f, "params"), Some(Field::Text(p)) if p == "a, b"));
    }

    #[test]
    fn test_node_fields_bind_children() {
        let key = Node::string("k");
        let pair = Node::new(
            NodeKind::Pair {
                key: Box::new(key.clone()),
                value: Box::new(Node::int(1)),
            },
            SemanticType::Void,
        );
        assert!(matches!(field(&pair, "key"), Some(Field::Node("key", k)) if *k == key));
        assert!(matches!(field(&pair, "value"), Some(Field::Node("value", v)) if v.as_int() == Some(1)));

        let group = Node::group(Node::name("i", SemanticType::Int));
        assert!(matches!(field(&group, "value"), Some(Field::Node("value", _))));
        assert!(field(&group, "op").is_none());
    }
}
