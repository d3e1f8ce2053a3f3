use crate::ast;
use crate::BoxError;
use crate::Variables;

/// Normalize GraphQL text the same way a rewritten query is printed, so that
/// expected queries can be written with any formatting.
pub(crate) fn gql_fmt(query_src: &str) -> String {
    ast::print(&ast::parse(query_src).unwrap())
}

pub(crate) fn variables(value: serde_json::Value) -> Variables {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("Expected a JSON object for variables, got: {other}"),
    }
}

/// A coercion function in the style of JavaScript's `parseInt` that only
/// accepts strings.
pub(crate) fn parse_int(value: &serde_json::Value) -> Result<serde_json::Value, BoxError> {
    let s = value.as_str().ok_or("expected a string value")?;
    Ok(s.trim().parse::<i64>()?.into())
}
