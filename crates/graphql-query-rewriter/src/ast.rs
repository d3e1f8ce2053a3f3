//! The executable-document AST this crate rewrites, pinned to owned `String`
//! text so a parsed [`Document`] never borrows from the query source.

pub type Definition = graphql_parser::query::Definition<'static, String>;
pub type Document = graphql_parser::query::Document<'static, String>;
pub type Field = graphql_parser::query::Field<'static, String>;
pub type FragmentDefinition = graphql_parser::query::FragmentDefinition<'static, String>;
pub type OperationDefinition = graphql_parser::query::OperationDefinition<'static, String>;
pub type Selection = graphql_parser::query::Selection<'static, String>;
pub type SelectionSet = graphql_parser::query::SelectionSet<'static, String>;
pub type Type = graphql_parser::query::Type<'static, String>;
pub type Value = graphql_parser::query::Value<'static, String>;
pub type VariableDefinition = graphql_parser::query::VariableDefinition<'static, String>;

pub type ParseError = graphql_parser::query::ParseError;

pub fn parse(query_src: &str) -> Result<Document, ParseError> {
    Ok(graphql_parser::query::parse_query::<String>(query_src)?.into_static())
}

/// Print a [`Document`] back to GraphQL text.
///
/// Printing is canonicalizing: insignificant whitespace and commas in the
/// original source are not preserved, so two documents that parse to the same
/// AST always print identically.
pub fn print(document: &Document) -> String {
    document.to_string()
}
