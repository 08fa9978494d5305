use super::*;
use pretty_assertions::assert_eq;
use rosetta_ir::{NodeTag, SemanticType};

use crate::Template;

fn templates(entries: impl IntoIterator<Item = (NodeTag, Template)>) -> TemplateSet {
    match TemplateSet::from_entries("test", entries) {
        Ok(set) => set,
        Err(err) => panic!("{err}"),
    }
}

fn int_list(values: &[i64]) -> Node {
    Node::list(
        values.iter().copied().map(Node::int).collect(),
        SemanticType::list(SemanticType::Int),
    )
}

fn render_ok(node: &Node, set: &TemplateSet) -> String {
    match render(node, set) {
        Ok(text) => text,
        Err(err) => panic!("{err}"),
    }
}

#[test]
fn test_method_call_round_trip() {
    let set = templates([
        (NodeTag::Int, Template::inline("%{value}")),
        (NodeTag::List, Template::inline("[%{elements}]")),
        (NodeTag::MethodCall, Template::inline("%{receiver}.%{name}()")),
    ]);
    let call = Node::method_call(int_list(&[1, 2, 3]), "length", vec![], SemanticType::Int);
    assert_eq!(render_ok(&call, &set), "[1, 2, 3].length()");
}

fn go_like() -> TemplateSet {
    templates([
        (NodeTag::Program, Template::inline("%{code}")),
        (
            NodeTag::Function,
            Template::indented(
                "
                func %{name}() {
                    %{body}
                }
                ",
            ),
        ),
        (
            NodeTag::Block,
            Template::indented(
                "
                {
                    %{body}
                }
                ",
            ),
        ),
        (NodeTag::Call, Template::inline("%{name}(%{args})")),
        (NodeTag::String, Template::inline("\"%{value}\"")),
        (NodeTag::Int, Template::inline("%{value}")),
    ])
}

#[test]
fn test_indented_body() {
    let program = Node::program(vec![Node::function(
        "main",
        vec![],
        vec![
            Node::call("println", vec![Node::string("hi")], SemanticType::Void),
            Node::call("exit", vec![Node::int(0)], SemanticType::Void),
        ],
    )]);
    assert_eq!(
        render_ok(&program, &go_like()),
        "func main() {\n    println(\"hi\")\n    exit(0)\n}"
    );
}

#[test]
fn test_nested_indentation_is_restored() {
    let program = Node::program(vec![
        Node::function(
            "main",
            vec![],
            vec![
                Node::block(vec![
                    Node::call("a", vec![], SemanticType::Void),
                    Node::block(vec![Node::call("b", vec![], SemanticType::Void)]),
                ]),
                Node::call("c", vec![], SemanticType::Void),
            ],
        ),
        Node::function("other", vec![], vec![Node::call("d", vec![], SemanticType::Void)]),
    ]);

    let expected = "\
func main() {
    {
        a()
        {
            b()
        }
    }
    c()
}
func other() {
    d()
}";
    assert_eq!(render_ok(&program, &go_like()), expected);
}

#[test]
fn test_empty_body_leaves_no_trailing_whitespace() {
    let program = Node::program(vec![Node::function("main", vec![], vec![])]);
    assert_eq!(render_ok(&program, &go_like()), "func main() {\n\n}");
}

#[test]
fn test_missing_template_reports_kind_and_path() {
    let program = Node::program(vec![Node::function(
        "main",
        vec![],
        vec![Node::call("f", vec![Node::boolean(true)], SemanticType::Void)],
    )]);
    let Err(err) = render(&program, &go_like()) else {
        panic!("boolean has no template");
    };
    assert_eq!(
        err,
        TranslateError::MissingTemplate {
            target: "test".to_string(),
            kind: NodeTag::Boolean,
            field: None,
            path: NodePath::from_segments([
                PathSegment::Item("code", 0),
                PathSegment::Item("body", 0),
                PathSegment::Item("args", 0),
            ]),
        }
    );
}

#[test]
fn test_unknown_field_is_missing_template() {
    let set = templates([(NodeTag::Int, Template::inline("%{receiver}"))]);
    let Err(err) = render(&Node::int(1), &set) else {
        panic!("int has no receiver");
    };
    assert!(matches!(
        err,
        TranslateError::MissingTemplate { kind: NodeTag::Int, field: Some(ref f), .. } if f == "receiver"
    ));
}

#[test]
fn test_inline_multiline_template_follows_context() {
    let set = templates([
        (NodeTag::Program, Template::inline("%{code}")),
        (
            NodeTag::Function,
            Template::indented(
                "
                def %{name}
                    %{body}
                end
                ",
            ),
        ),
        (NodeTag::Name, Template::inline("%{value}")),
        (
            NodeTag::BlockCall,
            Template::indented(
                "
                %{receiver}.%{name} do |%{params}|
                    %{block}
                end
                ",
            ),
        ),
    ]);
    let each = Node::new(
        rosetta_ir::NodeKind::BlockCall {
            receiver: Box::new(Node::name("xs", SemanticType::list(SemanticType::Int))),
            name: "each".into(),
            args: vec![],
            params: vec!["x".into()],
            block: vec![Node::name("x", SemanticType::Int)],
        },
        SemanticType::Void,
    );
    let program = Node::program(vec![Node::function("run", vec![], vec![each])]);
    assert_eq!(
        render_ok(&program, &set),
        "def run\n    xs.each do |x|\n        x\n    end\nend"
    );
}

#[test]
fn test_renderer_at_prefixes_error_path() {
    let set = templates([(NodeTag::List, Template::inline("[%{elements}]"))]);
    let base = [PathSegment::Item("code", 2), PathSegment::Field("receiver")];
    let Err(err) = Renderer::at(&set, &base).render(&int_list(&[1])) else {
        panic!("int has no template");
    };
    assert_eq!(err.path().to_string(), "root.code[2].receiver.elements[0]");
}
