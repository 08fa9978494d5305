//! The resolver.

use std::collections::BTreeSet;

use rosetta_ir::{
    ensure_sufficient_stack, Namespace, Node, NodeKind, NodePath, PathSegment, SemanticType,
    TranslateError,
};
use rosetta_render::{Renderer, TemplateSet};
use rosetta_rules::{Arity, FormatString, Operator, Registry, RewriteCall, RewriteError, Rule};

/// Resolution state for one translation run.
///
/// Borrows the target's tables; owns the node path used for error context
/// and the library dependencies collected so far.
pub struct Resolver<'a> {
    registry: &'a Registry,
    templates: &'a TemplateSet,
    path: Vec<PathSegment>,
    dependencies: BTreeSet<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a Registry, templates: &'a TemplateSet) -> Self {
        Self {
            registry,
            templates,
            path: Vec::new(),
            dependencies: BTreeSet::new(),
        }
    }

    /// Resolve a generic tree into a target-shaped tree.
    ///
    /// Stops at the first failure.
    #[tracing::instrument(level = "debug", skip_all, fields(target = self.registry.target()))]
    pub fn resolve(&mut self, node: &Node) -> Result<Node, TranslateError> {
        let resolved = self.resolve_node(node)?;
        tracing::debug!(dependencies = self.dependencies.len(), "resolve complete");
        Ok(resolved)
    }

    /// Target type name standing in for `ty`'s generic type.
    ///
    /// Depends only on the registry, so repeated lookups agree.
    pub fn equivalent_type(&self, ty: &SemanticType) -> Result<&'a str, TranslateError> {
        let registry = self.registry;
        let Some(generic) = ty.generic() else {
            return Err(self.invalid(format!("no generic type for `{ty}`")));
        };
        registry
            .type_rules(generic)
            .map(|rules| rules.equivalent())
            .ok_or_else(|| self.unsupported(generic.name(), "equivalent type"))
    }

    /// Libraries required by everything resolved so far.
    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }

    /// End the run, returning the collected dependencies.
    pub fn finish(self) -> BTreeSet<String> {
        self.dependencies
    }

    fn resolve_node(&mut self, node: &Node) -> Result<Node, TranslateError> {
        ensure_sufficient_stack(|| {
            if node.ty.contains_unknown() {
                return Err(self.invalid(format!(
                    "`{}` node has an unknown semantic type `{}`",
                    node.tag(),
                    node.ty
                )));
            }

            let node = node.try_map_children(|segment, child| {
                self.path.push(segment);
                let resolved = self.resolve_node(child);
                self.path.pop();
                resolved
            })?;

            match &node.kind {
                NodeKind::StandardMethodCall {
                    receiver,
                    operation,
                    args,
                } => self.resolve_method(receiver, operation, args, &node.ty),
                NodeKind::StandardCall {
                    namespace,
                    operation,
                    args,
                } => self.resolve_function(*namespace, operation, args, &node.ty),
                _ => Ok(node),
            }
        })
    }

    fn resolve_method(
        &self,
        receiver: &Node,
        operation: &str,
        args: &[Node],
        ty: &SemanticType,
    ) -> Result<Node, TranslateError> {
        let registry = self.registry;
        let Some(generic) = receiver.ty.generic() else {
            return Err(self.invalid(format!(
                "receiver of `{operation}` has no generic type ({})",
                receiver.ty
            )));
        };
        let owner = generic.name();
        let Some(rule) = registry
            .type_rules(generic)
            .and_then(|rules| rules.get(operation))
        else {
            return Err(self.unsupported(owner, operation));
        };

        let call = RewriteCall {
            operation,
            receiver: Some(receiver),
            args,
            ty,
        };
        self.apply(rule, owner, &call)
    }

    fn resolve_function(
        &mut self,
        namespace: Namespace,
        operation: &str,
        args: &[Node],
        ty: &SemanticType,
    ) -> Result<Node, TranslateError> {
        let registry = self.registry;
        let owner = namespace.name();
        let Some(rule) = registry
            .namespace_rules(namespace)
            .and_then(|rules| rules.get(operation))
        else {
            return Err(self.unsupported(owner, operation));
        };

        let call = RewriteCall {
            operation,
            receiver: None,
            args,
            ty,
        };
        let resolved = self.apply(rule, owner, &call)?;
        self.dependencies.extend(
            registry
                .dependencies_for(namespace, operation)
                .map(str::to_string),
        );
        Ok(resolved)
    }

    fn apply(&self, rule: &Rule, owner: &str, call: &RewriteCall<'_>) -> Result<Node, TranslateError> {
        tracing::trace!(owner, operation = call.operation, ?rule, "applying rule");
        match rule {
            Rule::Rename(name) => Ok(match call.receiver {
                Some(receiver) => {
                    Node::method_call(receiver.clone(), name, call.args.to_vec(), call.ty.clone())
                }
                None => Node::call(name, call.args.to_vec(), call.ty.clone()),
            }),
            Rule::Operator(operator) => self.apply_operator(operator, owner, call),
            Rule::Format(format) => self.apply_format(format, owner, call),
            Rule::Rewrite(rewrite) => rewrite
                .apply(call)
                .map_err(|err| self.malformed(owner, call.operation, err)),
        }
    }

    /// Unary rules on a method take the receiver only; binary rules take the
    /// receiver and one argument. Namespace rules take their operands from
    /// the arguments.
    fn apply_operator(
        &self,
        operator: &Operator,
        owner: &str,
        call: &RewriteCall<'_>,
    ) -> Result<Node, TranslateError> {
        let expected = operator.arity.operands() - usize::from(call.receiver.is_some());
        call.arity(expected)
            .map_err(|err| self.malformed(owner, call.operation, err))?;

        let operands: Vec<&Node> = call.receiver.into_iter().chain(call.args).collect();
        match (operator.arity, operands.as_slice()) {
            (Arity::Unary, [value]) => Ok(Node::unary_op(
                &operator.token,
                (*value).clone(),
                call.ty.clone(),
            )),
            (Arity::Binary, [left, right]) => Ok(Node::binary_op(
                &operator.token,
                (*left).clone(),
                (*right).clone(),
                call.ty.clone(),
            )),
            _ => Err(self.malformed(
                owner,
                call.operation,
                RewriteError::new(0, "operand count does not match the operator"),
            )),
        }
    }

    fn apply_format(
        &self,
        format: &FormatString,
        owner: &str,
        call: &RewriteCall<'_>,
    ) -> Result<Node, TranslateError> {
        let receiver = match call.receiver {
            Some(receiver) => Some(self.render_operand(PathSegment::Field("receiver"), receiver)?),
            None => None,
        };
        let args = call
            .args
            .iter()
            .enumerate()
            .map(|(i, arg)| self.render_operand(PathSegment::Item("args", i), arg))
            .collect::<Result<Vec<_>, _>>()?;

        let text = format
            .expand(receiver.as_deref(), &args)
            .map_err(|err| self.malformed(owner, call.operation, err))?;
        Ok(Node::raw(text, call.ty.clone()))
    }

    fn render_operand(&self, segment: PathSegment, operand: &Node) -> Result<String, TranslateError> {
        let mut path = self.path.clone();
        path.push(segment);
        Renderer::at(self.templates, &path).render(operand)
    }

    // Errors

    fn node_path(&self) -> NodePath {
        NodePath::from_segments(self.path.iter().copied())
    }

    fn unsupported(&self, owner: &str, operation: &str) -> TranslateError {
        TranslateError::UnsupportedOperation {
            target: self.registry.target().to_string(),
            owner: owner.to_string(),
            operation: operation.to_string(),
            path: self.node_path(),
        }
    }

    fn malformed(&self, owner: &str, operation: &str, err: RewriteError) -> TranslateError {
        TranslateError::MalformedRewriteInput {
            target: self.registry.target().to_string(),
            owner: owner.to_string(),
            operation: operation.to_string(),
            position: err.position,
            reason: err.reason,
            path: self.node_path(),
        }
    }

    fn invalid(&self, reason: String) -> TranslateError {
        TranslateError::InvalidInputTree {
            target: self.registry.target().to_string(),
            reason,
            path: self.node_path(),
        }
    }
}
