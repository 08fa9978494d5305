//! Ruby.

use rosetta_ir::{GenericType, Namespace, NodeTag};
use rosetta_render::{DuplicateTemplate, Template, TemplateSet};
use rosetta_rules::rewrites::{self, Length, SliceBounds, Slicing};
use rosetta_rules::{Dependencies, Registry, RuleSet, TypeRules};

use crate::Target;

const TARGET: &str = "ruby";

/// Sequences slice with ranges; strings with `slice(start, count)`.
const SLICING: Slicing = Slicing {
    length: Length::Method("length"),
    substring_method: Some("slice"),
};

/// The Ruby target.
pub fn ruby() -> Result<Target, DuplicateTemplate> {
    Ok(Target::new(registry(), templates()?))
}

fn registry() -> Registry {
    Registry::builder(TARGET)
        .types(GenericType::List, TypeRules::new("Array", list()))
        .types(GenericType::Dictionary, TypeRules::new("Hash", dictionary()))
        .types(GenericType::Set, TypeRules::new("Set", set()))
        .types(
            GenericType::Tuple,
            TypeRules::new("Array", RuleSet::new().rename("length", "length")),
        )
        .types(
            GenericType::Array,
            TypeRules::new("Array", RuleSet::new().rename("length", "length")),
        )
        .types(GenericType::String, TypeRules::new("String", string()))
        .types(
            GenericType::Regexp,
            TypeRules::new("Regexp", RuleSet::new().format("match", "%{0}.scan(%{self})")),
        )
        .types(
            GenericType::RegexpMatch,
            TypeRules::new(
                "Array",
                RuleSet::new()
                    .rewrite("group", rewrites::regexp_group)
                    .rewrite("has_match", rewrites::negated_method("empty?")),
            ),
        )
        .namespace(
            Namespace::Global,
            RuleSet::new()
                .rewrite("wat", rewrites::empty_block)
                .rename("exit", "exit"),
        )
        .namespace(
            Namespace::Io,
            RuleSet::new()
                .rewrite("display", rewrites::display("puts"))
                .rename("read", "gets")
                .rename("read_file", "File.read")
                .rename("write_file", "File.write"),
        )
        .namespace(
            Namespace::Http,
            RuleSet::new()
                .rename("get", "Requests.get")
                .rename("post", "Requests.post"),
        )
        .namespace(
            Namespace::Math,
            RuleSet::new()
                .rename("ln", "Math.log")
                .rename("tan", "Math.tan")
                .rename("sin", "Math.sin")
                .rename("cos", "Math.cos"),
        )
        .namespace(
            Namespace::Regexp,
            RuleSet::new()
                .rewrite("compile", rewrites::interpolate)
                .rename("escape", "Regexp.escape"),
        )
        .namespace(
            Namespace::System,
            RuleSet::new()
                .rewrite("args", rewrites::typename("ARGV"))
                .format("arg_count", "ARGV.length")
                // Ruby counts ARGV from 0
                .rewrite("index", rewrites::zero_based_index("ARGV")),
        )
        .dependencies(Namespace::Http, Dependencies::new().all("Requests"))
        .build()
}

fn list() -> RuleSet {
    RuleSet::new()
        .rename("push", "push")
        .rename("pop", "pop")
        .rename("length", "length")
        .rename("insert", "insert")
        .rename("remove_at", "delete_at")
        .rename("remove", "delete")
        .rewrite("slice", rewrites::expand_slice(SliceBounds::Both, SLICING))
        .rewrite("slice_from", rewrites::expand_slice(SliceBounds::From, SLICING))
        .rewrite("slice_to", rewrites::expand_slice(SliceBounds::To, SLICING))
        .rewrite("map", rewrites::block_method("map"))
        .rewrite("filter", rewrites::block_method("select"))
        .rewrite("reduce", rewrites::block_method("reduce"))
        .rewrite("any?", rewrites::block_method("any?"))
        .rewrite("all?", rewrites::block_method("all?"))
}

fn dictionary() -> RuleSet {
    RuleSet::new()
        .rename("length", "length")
        .rename("keys", "keys")
        .rename("values", "values")
        .rename("contains?", "include?")
}

fn set() -> RuleSet {
    RuleSet::new()
        .rename("length", "length")
        .rename("contains?", "include?")
        .operator("union", "|")
        .rename("intersection", "intersection")
}

fn string() -> RuleSet {
    RuleSet::new()
        .rewrite("substr", rewrites::expand_slice(SliceBounds::Both, SLICING))
        .rewrite("substr_from", rewrites::expand_slice(SliceBounds::From, SLICING))
        .rewrite("substr_to", rewrites::expand_slice(SliceBounds::To, SLICING))
        .rename("length", "length")
        .operator("concat", "+")
        .rename("find", "index")
        .rename("find_from", "index")
        .rename("count", "count")
        .rename("partition", "partition")
        .rename("split", "split")
        .rename("trim", "strip")
        .rename("reversed", "reverse")
        .rename("justify", "center")
        .rewrite("present?", rewrites::negated_method("empty?"))
        .rename("empty?", "empty?")
        .rename("to_int", "to_i")
}

fn templates() -> Result<TemplateSet, DuplicateTemplate> {
    TemplateSet::from_entries(
        TARGET,
        [
            (NodeTag::Int, Template::inline("%{value}")),
            (NodeTag::Float, Template::inline("%{value}")),
            (NodeTag::Boolean, Template::inline("%{value}")),
            (NodeTag::String, Template::inline("\"%{value}\"")),
            (NodeTag::Nil, Template::inline("nil")),
            (NodeTag::List, Template::inline("[%{elements}]")),
            (NodeTag::Set, Template::inline("Set.new([%{elements}])")),
            (NodeTag::Tuple, Template::inline("[%{elements}]")),
            (NodeTag::Dictionary, Template::inline("{%{pairs}}")),
            (NodeTag::Pair, Template::inline("%{key} => %{value}")),
            (NodeTag::Name, Template::inline("%{value}")),
            (NodeTag::Typename, Template::inline("%{value}")),
            (NodeTag::Raw, Template::inline("%{value}")),
            (NodeTag::MethodCall, Template::inline("%{receiver}.%{name}(%{args})")),
            (NodeTag::Call, Template::inline("%{name}(%{args})")),
            (
                NodeTag::BlockCall,
                Template::indented(
                    "
                    %{receiver}.%{name}(%{args}) do |%{params}|
                        %{block}
                    end
                    ",
                ),
            ),
            (NodeTag::Interpolate, Template::inline("/#{%{value}}/")),
            (NodeTag::Slice, Template::inline("%{sequence}[%{from}...%{to}]")),
            (
                NodeTag::AnonymousFunction,
                Template::indented(
                    "
                    lambda do |%{params}|
                        %{body}
                    end
                    ",
                ),
            ),
            (NodeTag::BinaryOp, Template::inline("%{left} %{op} %{right}")),
            (NodeTag::UnaryOp, Template::inline("%{op}%{value}")),
            (NodeTag::Group, Template::inline("(%{value})")),
            (NodeTag::Index, Template::inline("%{sequence}[%{index}]")),
            (NodeTag::Assignment, Template::inline("%{target} = %{value}")),
            (NodeTag::Return, Template::inline("return %{value}")),
            (
                NodeTag::Block,
                Template::indented(
                    "
                    begin
                        %{body}
                    end
                    ",
                ),
            ),
            (
                NodeTag::Function,
                Template::indented(
                    "
                    def %{name}(%{params})
                        %{body}
                    end
                    ",
                ),
            ),
            (NodeTag::Program, Template::inline("%{code}")),
        ],
    )
}
