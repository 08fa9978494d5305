use super::*;

#[test]
fn test_display_nested() {
    let ty = SemanticType::dictionary(SemanticType::String, SemanticType::list(SemanticType::Int));
    assert_eq!(ty.to_string(), "Dictionary<String, List<Int>>");
}

#[test]
fn test_display_function_and_tuple() {
    let ty = SemanticType::function(vec![SemanticType::Int], SemanticType::Boolean);
    assert_eq!(ty.to_string(), "Function<Int, Boolean>");

    let nullary = SemanticType::function(vec![], SemanticType::Void);
    assert_eq!(nullary.to_string(), "Function<Void>");

    let tuple = SemanticType::Tuple(vec![SemanticType::Int, SemanticType::String]);
    assert_eq!(tuple.to_string(), "Tuple<Int, String>");
}

#[test]
fn test_generic_ignores_arguments() {
    let ints = SemanticType::list(SemanticType::Int);
    let strings = SemanticType::list(SemanticType::String);
    assert_eq!(ints.generic(), Some(GenericType::List));
    assert_eq!(ints.generic(), strings.generic());
}

#[test]
fn test_unknown_has_no_generic() {
    assert_eq!(SemanticType::Unknown.generic(), None);
    assert!(SemanticType::list(SemanticType::Unknown).contains_unknown());
    assert!(!SemanticType::set(SemanticType::Int).contains_unknown());
}

#[test]
fn test_element_type() {
    assert_eq!(
        SemanticType::list(SemanticType::Int).element(),
        Some(&SemanticType::Int)
    );
    assert_eq!(SemanticType::String.element(), Some(&SemanticType::String));
    assert_eq!(SemanticType::Int.element(), None);
}

#[test]
fn test_sequence_types() {
    for generic in [
        GenericType::List,
        GenericType::Tuple,
        GenericType::Array,
        GenericType::String,
    ] {
        assert!(generic.is_sequence(), "{generic} should be a sequence");
    }
    assert!(!GenericType::Set.is_sequence());
    assert!(!GenericType::Dictionary.is_sequence());
}
