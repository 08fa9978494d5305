//! End-to-end translation tests for the bundled targets.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use rayon::prelude::*;
use rosetta::{
    targets, translate, Namespace, Node, NodeKind, NodeTag, Resolver, SemanticType, Target,
    TranslateError,
};

fn ruby() -> Target {
    rosetta::init_tracing();
    targets::ruby().expect("ruby templates are distinct")
}

fn go() -> Target {
    targets::go().expect("go templates are distinct")
}

fn code(target: &Target, program: &Node) -> String {
    translate(target, program)
        .unwrap_or_else(|err| panic!("translation failed: {err}"))
        .code
}

fn list_int() -> SemanticType {
    SemanticType::list(SemanticType::Int)
}

fn name(value: &str, ty: SemanticType) -> Node {
    Node::name(value, ty)
}

fn int_name(value: &str) -> Node {
    name(value, SemanticType::Int)
}

fn plus(left: Node, right: Node) -> Node {
    Node::binary_op("+", left, right, SemanticType::Int)
}

fn resolve(target: &Target, node: &Node) -> Node {
    Resolver::new(target.registry(), target.templates())
        .resolve(node)
        .unwrap_or_else(|err| panic!("resolution failed: {err}"))
}

// Ruby

#[test]
fn ruby_length_round_trip() {
    let xs = Node::list(vec![Node::int(1), Node::int(2), Node::int(3)], list_int());
    let program = Node::program(vec![Node::standard_method_call(
        xs,
        "length",
        vec![],
        SemanticType::Int,
    )]);
    assert_eq!(code(&ruby(), &program), "[1, 2, 3].length()");
}

#[test]
fn ruby_filter_becomes_select_block() {
    let x = || name("x", SemanticType::Int);
    let is_even = Node::anonymous_function(
        vec!["x".into()],
        vec![Node::binary_op(
            "==",
            Node::binary_op("%", x(), Node::int(2), SemanticType::Int),
            Node::int(0),
            SemanticType::Boolean,
        )],
        SemanticType::function(vec![SemanticType::Int], SemanticType::Boolean),
    );
    let evens = || name("evens", list_int());
    let program = Node::program(vec![Node::function(
        "main",
        vec![],
        vec![
            Node::assignment(
                evens(),
                Node::standard_method_call(
                    name("xs", list_int()),
                    "filter",
                    vec![is_even],
                    list_int(),
                ),
            ),
            Node::standard_call(
                Namespace::Io,
                "display",
                vec![Node::standard_method_call(evens(), "length", vec![], SemanticType::Int)],
                SemanticType::Void,
            ),
        ],
    )]);

    let expected = "\
def main()
    evens = xs.select() do |x|
        x % 2 == 0
    end
    puts(evens.length())
end";
    assert_eq!(code(&ruby(), &program), expected);
}

#[test]
fn ruby_display_joins_several_values() {
    let program = Node::program(vec![Node::standard_call(
        Namespace::Io,
        "display",
        vec![Node::string("a"), name("b", SemanticType::String)],
        SemanticType::Void,
    )]);
    assert_eq!(code(&ruby(), &program), "puts([\"a\", b].join(\" \"))");
}

#[test]
fn ruby_slices() {
    let s = || name("s", SemanticType::String);
    let xs = || name("xs", list_int());
    let program = Node::program(vec![
        Node::standard_method_call(s(), "substr_from", vec![Node::int(1)], SemanticType::String),
        Node::standard_method_call(s(), "substr_to", vec![Node::int(3)], SemanticType::String),
        Node::standard_method_call(xs(), "slice_to", vec![Node::int(2)], list_int()),
        Node::standard_method_call(xs(), "slice", vec![Node::int(1), Node::int(4)], list_int()),
    ]);
    let expected = "\
s.slice(1, s.length() - 1)
s.slice(0, 3)
xs[0...2]
xs[1...4]";
    assert_eq!(code(&ruby(), &program), expected);
}

#[test]
fn ruby_substring_count_groups_compound_start() {
    let program = Node::program(vec![Node::standard_method_call(
        name("s", SemanticType::String),
        "substr",
        vec![plus(int_name("i"), Node::int(1)), int_name("j")],
        SemanticType::String,
    )]);
    assert_eq!(code(&ruby(), &program), "s.slice(i + 1, j - (i + 1))");
}

#[test]
fn ruby_compound_argument_index_is_grouped() {
    let program = Node::program(vec![Node::standard_call(
        Namespace::System,
        "index",
        vec![Node::binary_op("<<", int_name("a"), int_name("b"), SemanticType::Int)],
        SemanticType::String,
    )]);
    assert_eq!(code(&ruby(), &program), "ARGV[(a << b) - 1]");
}

#[test]
fn ruby_presence_and_match() {
    let pattern = Node::standard_call(
        Namespace::Regexp,
        "compile",
        vec![Node::string("a+")],
        SemanticType::Regexp,
    );
    let matched = Node::standard_method_call(
        pattern,
        "match",
        vec![name("text", SemanticType::String)],
        SemanticType::RegexpMatch,
    );
    let program = Node::program(vec![
        Node::standard_method_call(
            name("text", SemanticType::String),
            "present?",
            vec![],
            SemanticType::Boolean,
        ),
        Node::standard_method_call(matched, "has_match", vec![], SemanticType::Boolean),
    ]);
    let expected = "\
!text.empty?()
!text.scan(/#{\"a+\"}/).empty?()";
    assert_eq!(code(&ruby(), &program), expected);
}

#[test]
fn ruby_argument_index_is_zero_based() {
    let index = |arg: Node| {
        Node::standard_call(Namespace::System, "index", vec![arg], SemanticType::String)
    };
    let program = Node::program(vec![
        index(Node::int(1)),
        index(name("n", SemanticType::Int)),
        Node::standard_call(Namespace::System, "arg_count", vec![], SemanticType::Int),
    ]);
    assert_eq!(code(&ruby(), &program), "ARGV[0]\nARGV[n - 1]\nARGV.length");
}

#[test]
fn ruby_http_requires_library() {
    let program = Node::program(vec![Node::standard_call(
        Namespace::Http,
        "get",
        vec![Node::string("http://example.com")],
        SemanticType::String,
    )]);
    let translation = translate(&ruby(), &program).unwrap();
    assert_eq!(translation.code, "Requests.get(\"http://example.com\")");
    assert_eq!(
        translation.dependencies.into_iter().collect::<Vec<_>>(),
        vec!["Requests".to_string()]
    );
}

#[test]
fn ruby_set_flatten_is_unsupported() {
    let program = Node::program(vec![Node::standard_method_call(
        name("s", SemanticType::set(SemanticType::Int)),
        "flatten",
        vec![],
        SemanticType::set(SemanticType::Int),
    )]);
    let err = translate(&ruby(), &program).unwrap_err();
    assert!(matches!(
        err,
        TranslateError::UnsupportedOperation { ref owner, ref operation, .. }
            if owner == "Set" && operation == "flatten"
    ));
    assert_eq!(
        err.to_string(),
        "[ruby] unsupported operation `flatten` on `Set` at root.code[0]"
    );
}

#[test]
fn ruby_templates_cover_resolved_kinds() {
    let target = ruby();
    assert_eq!(target.name(), "ruby");
    assert_eq!(target.templates().len(), 28);
    assert!(target.templates().get(NodeTag::StandardMethodCall).is_none());
    assert!(target.templates().get(NodeTag::BlockCall).is_some());
}

// Go

#[test]
fn go_function_body_is_indented() {
    let program = Node::program(vec![Node::function(
        "main",
        vec![],
        vec![
            Node::assignment(
                name("n", SemanticType::Int),
                Node::standard_method_call(name("xs", list_int()), "length", vec![], SemanticType::Int),
            ),
            Node::standard_call(
                Namespace::Io,
                "display",
                vec![Node::standard_call(
                    Namespace::Math,
                    "sin",
                    vec![name("x", SemanticType::Float)],
                    SemanticType::Float,
                )],
                SemanticType::Void,
            ),
        ],
    )]);
    let translation = translate(&go(), &program).unwrap();
    assert_eq!(
        translation.code,
        "func main() {\n    n := len(xs)\n    fmt.Println(math.Sin(x))\n}"
    );
    assert_eq!(
        translation.dependencies.into_iter().collect::<Vec<_>>(),
        vec!["fmt".to_string(), "math".to_string()]
    );
}

#[test]
fn go_collection_literals() {
    let literal = || Node::list(vec![Node::int(1), Node::int(2), Node::int(3)], list_int());
    let pair = Node::new(
        NodeKind::Pair {
            key: Box::new(Node::string("a")),
            value: Box::new(Node::int(1)),
        },
        SemanticType::Void,
    );
    let dictionary = Node::new(
        NodeKind::Dictionary(vec![pair]),
        SemanticType::dictionary(SemanticType::String, SemanticType::Int),
    );
    let program = Node::program(vec![
        Node::assignment(name("xs", list_int()), literal()),
        Node::standard_method_call(literal(), "length", vec![], SemanticType::Int),
        Node::standard_method_call(literal(), "slice_from", vec![Node::int(1)], list_int()),
        Node::standard_method_call(dictionary, "length", vec![], SemanticType::Int),
    ]);
    let expected = "\
xs := []interface{}{1, 2, 3}
len([]interface{}{1, 2, 3})
[]interface{}{1, 2, 3}[1:3]
len(map[interface{}]interface{}{\"a\": 1})";
    assert_eq!(code(&go(), &program), expected);
}

#[test]
fn go_set_literal_has_no_template() {
    let set = Node::new(
        NodeKind::Set(vec![Node::int(1)]),
        SemanticType::set(SemanticType::Int),
    );
    let program = Node::program(vec![Node::assignment(
        name("s", SemanticType::set(SemanticType::Int)),
        set,
    )]);
    let err = translate(&go(), &program).unwrap_err();
    assert_eq!(
        err.to_string(),
        "[go] no template for node kind `set` at root.code[0].value"
    );
}

#[test]
fn go_slice_from_matches_slice_to_length() {
    let target = go();
    for (ty, from, both) in [
        (list_int(), "slice_from", "slice"),
        (SemanticType::String, "substr_from", "substr"),
    ] {
        let sequence = || name("xs", ty.clone());
        let length = Node::standard_method_call(sequence(), "length", vec![], SemanticType::Int);
        let short = Node::standard_method_call(sequence(), from, vec![Node::int(1)], ty.clone());
        let long =
            Node::standard_method_call(sequence(), both, vec![Node::int(1), length], ty.clone());

        assert_eq!(resolve(&target, &short), resolve(&target, &long));
        assert_eq!(code(&target, &Node::program(vec![short])), "xs[1:len(xs)]");
    }
}

#[test]
fn go_substring_bounds_render_as_slice() {
    let program = Node::program(vec![Node::standard_method_call(
        name("s", SemanticType::String),
        "substr",
        vec![plus(int_name("i"), Node::int(1)), int_name("j")],
        SemanticType::String,
    )]);
    assert_eq!(code(&go(), &program), "s[i + 1:j]");
}

// Concurrency

#[test]
fn independent_runs_share_targets() {
    let ruby = ruby();
    let go = go();
    let program = |i: i64| {
        Node::program(vec![Node::standard_method_call(
            name("s", SemanticType::String),
            "substr",
            vec![Node::int(i), Node::int(i + 2)],
            SemanticType::String,
        )])
    };

    let results: Vec<(String, String)> = (0..64)
        .into_par_iter()
        .map(|i| (code(&ruby, &program(i)), code(&go, &program(i))))
        .collect();

    for (i, (rb, go)) in (0_i64..).zip(results) {
        assert_eq!(rb, format!("s.slice({i}, 2)"));
        assert_eq!(go, format!("s[{i}:{}]", i + 2));
    }
}
