//! Go.
//!
//! Go has no methods on built-in containers, so most operations become calls
//! to the `len` builtin, format rules and native slice expressions. Untyped
//! collection literals are `interface{}` slices and maps; Go has no set.

use rosetta_ir::{GenericType, Namespace, NodeTag};
use rosetta_render::{DuplicateTemplate, Template, TemplateSet};
use rosetta_rules::rewrites::{self, Length, SliceBounds, Slicing};
use rosetta_rules::{Dependencies, Registry, RuleSet, TypeRules};

use crate::Target;

const TARGET: &str = "go";

/// Strings and slices share `s[from:to]`.
const SLICING: Slicing = Slicing {
    length: Length::Builtin("len"),
    substring_method: None,
};

/// The Go target.
pub fn go() -> Result<Target, DuplicateTemplate> {
    Ok(Target::new(registry(), templates()?))
}

fn registry() -> Registry {
    Registry::builder(TARGET)
        .types(GenericType::List, TypeRules::new("[]interface{}", list()))
        .types(
            GenericType::Dictionary,
            TypeRules::new(
                "map[interface{}]interface{}",
                RuleSet::new().rewrite("length", rewrites::builtin_call("len")),
            ),
        )
        .types(
            GenericType::String,
            TypeRules::new(
                "string",
                RuleSet::new()
                    .rewrite("length", rewrites::builtin_call("len"))
                    .operator("concat", "+")
                    .rewrite("substr", rewrites::expand_slice(SliceBounds::Both, SLICING))
                    .rewrite("substr_from", rewrites::expand_slice(SliceBounds::From, SLICING))
                    .rewrite("substr_to", rewrites::expand_slice(SliceBounds::To, SLICING)),
            ),
        )
        .namespace(Namespace::Global, RuleSet::new().rename("exit", "os.Exit"))
        .namespace(Namespace::Io, RuleSet::new().rename("display", "fmt.Println"))
        .namespace(
            Namespace::Math,
            RuleSet::new()
                .rename("ln", "math.Log")
                .rename("tan", "math.Tan")
                .rename("sin", "math.Sin")
                .rename("cos", "math.Cos"),
        )
        .dependencies(Namespace::Global, Dependencies::new().function("exit", "os"))
        .dependencies(Namespace::Io, Dependencies::new().all("fmt"))
        .dependencies(Namespace::Math, Dependencies::new().all("math"))
        .build()
}

fn list() -> RuleSet {
    RuleSet::new()
        .rewrite("length", rewrites::builtin_call("len"))
        .format("push", "%{self} = append(%{self}, %{0})")
        .rewrite("slice", rewrites::expand_slice(SliceBounds::Both, SLICING))
        .rewrite("slice_from", rewrites::expand_slice(SliceBounds::From, SLICING))
        .rewrite("slice_to", rewrites::expand_slice(SliceBounds::To, SLICING))
}

fn templates() -> Result<TemplateSet, DuplicateTemplate> {
    TemplateSet::from_entries(
        TARGET,
        [
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
            (NodeTag::Int, Template::inline("%{value}")),
            (NodeTag::Float, Template::inline("%{value}")),
            (NodeTag::Boolean, Template::inline("%{value}")),
            (NodeTag::String, Template::inline("\"%{value}\"")),
            (NodeTag::Nil, Template::inline("nil")),
            (NodeTag::List, Template::inline("[]interface{}{%{elements}}")),
            (NodeTag::Tuple, Template::inline("[]interface{}{%{elements}}")),
            (
                NodeTag::Dictionary,
                Template::inline("map[interface{}]interface{}{%{pairs}}"),
            ),
            (NodeTag::Pair, Template::inline("%{key}: %{value}")),
            (NodeTag::Name, Template::inline("%{value}")),
            (NodeTag::Typename, Template::inline("%{value}")),
            (NodeTag::Raw, Template::inline("%{value}")),
            (NodeTag::Call, Template::inline("%{name}(%{args})")),
            (NodeTag::MethodCall, Template::inline("%{receiver}.%{name}(%{args})")),
            (NodeTag::Slice, Template::inline("%{sequence}[%{from}:%{to}]")),
            (NodeTag::BinaryOp, Template::inline("%{left} %{op} %{right}")),
            (NodeTag::UnaryOp, Template::inline("%{op}%{value}")),
            (NodeTag::Group, Template::inline("(%{value})")),
            (NodeTag::Index, Template::inline("%{sequence}[%{index}]")),
            (NodeTag::Assignment, Template::inline("%{target} := %{value}")),
            (NodeTag::Return, Template::inline("return %{value}")),
        ],
    )
}
