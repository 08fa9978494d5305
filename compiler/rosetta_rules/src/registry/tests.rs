use super::*;
use rosetta_ir::SemanticType;

fn sample() -> Registry {
    Registry::builder("ruby")
        .types(
            GenericType::List,
            TypeRules::new(
                "Array",
                RuleSet::new()
                    .rename("length", "length")
                    .rename("push", "push"),
            ),
        )
        .types(
            GenericType::Set,
            TypeRules::new("Set", RuleSet::new().operator("union", "|")),
        )
        .namespace(
            Namespace::Http,
            RuleSet::new()
                .rename("get", "Requests.get")
                .rename("post", "Requests.post"),
        )
        .dependencies(
            Namespace::Http,
            Dependencies::new().all("Requests").function("post", "json"),
        )
        .build()
}

#[test]
fn test_exact_lookup() {
    let registry = sample();
    assert_eq!(registry.target(), "ruby");

    let Some(list) = registry.type_rules(GenericType::List) else {
        panic!("List rules should be registered");
    };
    assert_eq!(list.equivalent(), "Array");
    assert!(matches!(list.get("length"), Some(Rule::Rename(name)) if name == "length"));
    assert!(list.get("flatten").is_none());
}

#[test]
fn test_no_fallback_between_types() {
    let registry = sample();
    // Tuple is not registered even though List is; no inheritance.
    assert!(registry.type_rules(GenericType::Tuple).is_none());

    let Some(set) = registry.type_rules(GenericType::Set) else {
        panic!("Set rules should be registered");
    };
    assert!(!set.operations().contains("length"));
}

#[test]
fn test_operator_rule() {
    let registry = sample();
    let Some(set) = registry.type_rules(GenericType::Set) else {
        panic!("Set rules should be registered");
    };
    let Some(Rule::Operator(op)) = set.get("union") else {
        panic!("union should be an operator rule");
    };
    assert_eq!(op.token, "|");
    assert_eq!(op.arity, Arity::Binary);
}

#[test]
fn test_later_rule_replaces_earlier() {
    let rules = RuleSet::new()
        .rename("length", "size")
        .rename("length", "length");
    assert_eq!(rules.len(), 1);
    assert!(matches!(rules.get("length"), Some(Rule::Rename(name)) if name == "length"));
}

#[test]
fn test_dependencies_for_operation() {
    let registry = sample();

    let get: Vec<_> = registry.dependencies_for(Namespace::Http, "get").collect();
    assert_eq!(get, vec!["Requests"]);

    let post: Vec<_> = registry.dependencies_for(Namespace::Http, "post").collect();
    assert_eq!(post, vec!["Requests", "json"]);

    assert_eq!(registry.dependencies_for(Namespace::Io, "read").count(), 0);
}

#[test]
fn test_rewrite_rule_is_callable() {
    let rules = RuleSet::new().rewrite("wat", |_call| Ok(Node::block(vec![])));
    let Some(Rule::Rewrite(f)) = rules.get("wat") else {
        panic!("wat should be a rewrite rule");
    };
    let call = RewriteCall {
        operation: "wat",
        receiver: None,
        args: &[],
        ty: &SemanticType::Void,
    };
    assert_eq!(f.apply(&call), Ok(Node::block(vec![])));
}

#[test]
fn test_registry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry>();
}
