use crate::rewriters::FieldArgTypeRewriter;
use crate::tests::utils::gql_fmt;
use crate::tests::utils::parse_int;
use crate::RewriteHandler;
use proptest::prelude::*;
use serde_json::Value;

fn things_handler() -> RewriteHandler {
    RewriteHandler::new(vec![Box::new(
        FieldArgTypeRewriter::new("things", "identifier", "String!", "Int!")
            .unwrap()
            .with_coerce_variable(parse_int),
    )])
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| prop_oneof![
        prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
        prop::collection::btree_map("[a-zA-Z]{1,8}", inner, 0..8)
            .prop_map(|fields| Value::Object(fields.into_iter().collect())),
    ])
}

/// A field name that is never `things`.
fn arb_other_field_name() -> impl Strategy<Value = String> {
    "x[a-zA-Z]{0,8}"
}

proptest! {
    #[test]
    fn documents_without_the_field_are_unchanged(
        outer in arb_other_field_name(),
        inner in arb_other_field_name(),
        value in "[0-9]{1,6}",
    ) {
        let query = format!(
            "query Q($id: String!) {{ {outer}(identifier: $id) {{ {inner}(identifier: $id) {{ cat }} }} }}",
        );
        let vars = crate::tests::utils::variables(serde_json::json!({ "id": value }));

        let rewritten = things_handler().rewrite_request(&query, Some(vars.clone())).unwrap();
        prop_assert_eq!(rewritten.query, gql_fmt(&query));
        prop_assert_eq!(rewritten.variables, Some(vars));
    }

    #[test]
    fn field_arg_type_rewriter_leaves_responses_untouched(response in arb_json()) {
        let mut handler = things_handler();
        handler.rewrite_request(
            "query Q($id: String!) { things(identifier: $id) { cat } }",
            None,
        ).unwrap();
        prop_assert_eq!(handler.rewrite_response(response.clone()).unwrap(), response);
    }

    #[test]
    fn coerced_values_equal_the_coercion_of_their_input(
        id in 0i64..1_000_000,
        other in arb_json(),
    ) {
        let vars = crate::tests::utils::variables(serde_json::json!({
            "id": id.to_string(),
            "other": other.clone(),
        }));
        let rewritten = things_handler().rewrite_request(
            "query Q($id: String!, $other: String) { things(identifier: $id, o: $other) { cat } }",
            Some(vars),
        ).unwrap();

        let expected = crate::tests::utils::variables(serde_json::json!({
            "id": id,
            "other": other,
        }));
        prop_assert_eq!(rewritten.variables, Some(expected));
    }
}
