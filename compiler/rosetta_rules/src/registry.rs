//! Per-target translation tables.
//!
//! Lookup is by exact key. There is no inheritance or fallback between
//! generic types: `Tuple` does not borrow rules from `List`, even when both
//! map to the same target type.

use rosetta_ir::{GenericType, Namespace, Node};
use rustc_hash::FxHashMap;

use crate::rewrites::{RewriteCall, RewriteError};
use crate::rule::{Arity, FormatString, Operator, RewriteFn, Rule};

/// Rules keyed by operation name.
///
/// Used directly for namespaces and wrapped by [`TypeRules`] for generic
/// types. Built with chained calls:
///
/// ```ignore
/// RuleSet::new()
///     .rename("length", "length")
///     .operator("union", "|")
///     .rewrite("slice", rewrites::expand_slice(SliceBounds::Both, RUBY_SLICING))
/// ```
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: FxHashMap<String, Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule. A later rule for the same operation replaces the earlier one.
    #[must_use]
    pub fn rule(mut self, operation: impl Into<String>, rule: Rule) -> Self {
        self.rules.insert(operation.into(), rule);
        self
    }

    /// Direct rename rule.
    #[must_use]
    pub fn rename(self, operation: impl Into<String>, target: impl Into<String>) -> Self {
        self.rule(operation, Rule::Rename(target.into()))
    }

    /// Binary operator rule.
    #[must_use]
    pub fn operator(self, operation: impl Into<String>, token: impl Into<String>) -> Self {
        self.rule(
            operation,
            Rule::Operator(Operator {
                token: token.into(),
                arity: Arity::Binary,
            }),
        )
    }

    /// Unary operator rule.
    #[must_use]
    pub fn unary_operator(self, operation: impl Into<String>, token: impl Into<String>) -> Self {
        self.rule(
            operation,
            Rule::Operator(Operator {
                token: token.into(),
                arity: Arity::Unary,
            }),
        )
    }

    /// Format-string rule.
    #[must_use]
    pub fn format(self, operation: impl Into<String>, pattern: &str) -> Self {
        self.rule(operation, Rule::Format(FormatString::parse(pattern)))
    }

    /// Rewrite function rule.
    #[must_use]
    pub fn rewrite(
        self,
        operation: impl Into<String>,
        f: impl Fn(&RewriteCall<'_>) -> Result<Node, RewriteError> + Send + Sync + 'static,
    ) -> Self {
        self.rule(operation, Rule::Rewrite(RewriteFn::new(f)))
    }

    pub fn get(&self, operation: &str) -> Option<&Rule> {
        self.rules.get(operation)
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.rules.contains_key(operation)
    }

    /// Operation names with a rule, in no particular order.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Rules for one generic type, plus its equivalent target type name.
#[derive(Debug)]
pub struct TypeRules {
    equivalent: String,
    operations: RuleSet,
}

impl TypeRules {
    pub fn new(equivalent: impl Into<String>, operations: RuleSet) -> Self {
        Self {
            equivalent: equivalent.into(),
            operations,
        }
    }

    /// Target type standing in for the generic type (`List` -> `Array`).
    pub fn equivalent(&self) -> &str {
        &self.equivalent
    }

    pub fn operations(&self) -> &RuleSet {
        &self.operations
    }

    pub fn get(&self, operation: &str) -> Option<&Rule> {
        self.operations.get(operation)
    }
}

/// Target libraries a namespace needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dependencies {
    /// Required by every function of the namespace.
    all: Vec<String>,
    /// Required only by specific functions.
    functions: FxHashMap<String, Vec<String>>,
}

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `library` whenever any function of the namespace is used.
    #[must_use]
    pub fn all(mut self, library: impl Into<String>) -> Self {
        self.all.push(library.into());
        self
    }

    /// Require `library` when `operation` is used.
    #[must_use]
    pub fn function(mut self, operation: impl Into<String>, library: impl Into<String>) -> Self {
        self.functions
            .entry(operation.into())
            .or_default()
            .push(library.into());
        self
    }

    /// Libraries needed by one use of `operation`.
    pub fn for_operation<'a>(&'a self, operation: &str) -> impl Iterator<Item = &'a str> {
        let specific = self.functions.get(operation).map(Vec::as_slice).unwrap_or_default();
        self.all.iter().chain(specific).map(String::as_str)
    }
}

/// All translation tables of one target.
///
/// Immutable after construction and `Send + Sync`: independent translation
/// runs may share one registry by reference.
#[derive(Debug)]
pub struct Registry {
    target: String,
    types: FxHashMap<GenericType, TypeRules>,
    namespaces: FxHashMap<Namespace, RuleSet>,
    dependencies: FxHashMap<Namespace, Dependencies>,
}

impl Registry {
    /// Start building the registry for `target`.
    pub fn builder(target: impl Into<String>) -> RegistryBuilder {
        RegistryBuilder {
            registry: Registry {
                target: target.into(),
                types: FxHashMap::default(),
                namespaces: FxHashMap::default(),
                dependencies: FxHashMap::default(),
            },
        }
    }

    /// Name of the target these tables translate to.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn type_rules(&self, generic: GenericType) -> Option<&TypeRules> {
        self.types.get(&generic)
    }

    pub fn namespace_rules(&self, namespace: Namespace) -> Option<&RuleSet> {
        self.namespaces.get(&namespace)
    }

    pub fn dependencies(&self, namespace: Namespace) -> Option<&Dependencies> {
        self.dependencies.get(&namespace)
    }

    /// Libraries required by one use of `namespace.operation`.
    pub fn dependencies_for<'a>(
        &'a self,
        namespace: Namespace,
        operation: &'a str,
    ) -> impl Iterator<Item = &'a str> {
        self.dependencies
            .get(&namespace)
            .into_iter()
            .flat_map(move |deps| deps.for_operation(operation))
    }
}

/// Consuming builder for [`Registry`].
#[derive(Debug)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    /// Rules for a generic type.
    #[must_use]
    pub fn types(mut self, generic: GenericType, rules: TypeRules) -> Self {
        self.registry.types.insert(generic, rules);
        self
    }

    /// Function rules for a namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: Namespace, rules: RuleSet) -> Self {
        self.registry.namespaces.insert(namespace, rules);
        self
    }

    /// Library dependencies for a namespace.
    #[must_use]
    pub fn dependencies(mut self, namespace: Namespace, dependencies: Dependencies) -> Self {
        self.registry.dependencies.insert(namespace, dependencies);
        self
    }

    pub fn build(self) -> Registry {
        self.registry
    }
}

#[cfg(test)]
mod tests;
