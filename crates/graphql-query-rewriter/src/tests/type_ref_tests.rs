use crate::ast;
use crate::TypeRef;

fn named(name: &str) -> ast::Type {
    ast::Type::NamedType(name.to_string())
}

fn non_null(inner: ast::Type) -> ast::Type {
    ast::Type::NonNullType(Box::new(inner))
}

fn list(inner: ast::Type) -> ast::Type {
    ast::Type::ListType(Box::new(inner))
}

#[test]
fn parses_named_types() {
    let type_ref: TypeRef = "String".parse().unwrap();
    assert!(type_ref.matches(&named("String")));
    assert!(!type_ref.matches(&non_null(named("String"))));
}

#[test]
fn parses_non_null_list_types() {
    let type_ref: TypeRef = "[ID!]!".parse().unwrap();
    assert_eq!(type_ref.as_ast(), &non_null(list(non_null(named("ID")))));
    assert_eq!(type_ref.to_string(), "[ID!]!");
}

#[test]
fn parses_nested_lists() {
    let type_ref: TypeRef = "[[Int]]".parse().unwrap();
    assert_eq!(type_ref.as_ast(), &list(list(named("Int"))));
}

#[test]
fn ignores_insignificant_whitespace() {
    let type_ref: TypeRef = " [ Int ] ! ".parse().unwrap();
    assert_eq!(type_ref, "[Int]!".parse::<TypeRef>().unwrap());
    assert_eq!(type_ref.to_string(), "[Int]!");
}

#[test]
fn matches_the_type_of_a_parsed_variable_definition() {
    let doc = ast::parse("query Q($ids: [ID!]) { things(ids: $ids) }").unwrap();
    let ast::Definition::Operation(ast::OperationDefinition::Query(query)) = &doc.definitions[0] else {
        panic!("Expected a query definition");
    };
    let type_ref: TypeRef = "[ID!]".parse().unwrap();
    assert!(type_ref.matches(&query.variable_definitions[0].var_type));
}

#[test]
fn rejects_malformed_type_references() {
    for input in ["", "!", "Int!!", "Int! !", "[Int", "Int]", "[]", "1Int", "In t"] {
        let result = input.parse::<TypeRef>();
        assert!(result.is_err(), "Expected `{input}` to fail to parse");
        assert_eq!(result.unwrap_err().input, input);
    }
}
