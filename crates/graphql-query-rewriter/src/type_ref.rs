use crate::ast;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A GraphQL type reference such as `String`, `Int!`, or `[ID!]!`, as it
/// would appear in a variable definition.
///
/// Comparison against a variable's declared type is structural, so
/// `"[ Int ]!"` and `"[Int]!"` refer to the same type.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeRef(ast::Type);
impl TypeRef {
    pub fn as_ast(&self) -> &ast::Type {
        &self.0
    }

    /// True if `ast_type` denotes exactly this type (including nullability at
    /// every level of list nesting).
    pub fn matches(&self, ast_type: &ast::Type) -> bool {
        &self.0 == ast_type
    }

    fn parse_impl(src: &str, input: &str) -> Result<ast::Type, TypeRefParseError> {
        let src = src.trim();

        if let Some(inner) = src.strip_suffix('!') {
            let inner = inner.trim_end();
            if inner.ends_with('!') {
                return Err(TypeRefParseError::new(
                    input,
                    "a type may only be marked non-null once",
                ));
            }
            return Ok(ast::Type::NonNullType(Box::new(
                Self::parse_impl(inner, input)?,
            )));
        }

        if let Some(rest) = src.strip_prefix('[') {
            let inner = rest.strip_suffix(']').ok_or_else(|| {
                TypeRefParseError::new(input, "unclosed `[` in list type")
            })?;
            return Ok(ast::Type::ListType(Box::new(
                Self::parse_impl(inner, input)?,
            )));
        }

        if src.is_empty() {
            return Err(TypeRefParseError::new(input, "missing type name"));
        }
        if !is_graphql_name(src) {
            return Err(TypeRefParseError::new(
                input,
                "type names must match /[_A-Za-z][_0-9A-Za-z]*/",
            ));
        }
        Ok(ast::Type::NamedType(src.to_string()))
    }
}
impl FromStr for TypeRef {
    type Err = TypeRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_impl(s, s).map(Self)
    }
}
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_type(ty: &ast::Type, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match ty {
                ast::Type::NamedType(name) => f.write_str(name),
                ast::Type::ListType(inner) => {
                    f.write_str("[")?;
                    write_type(inner, f)?;
                    f.write_str("]")
                },
                ast::Type::NonNullType(inner) => {
                    write_type(inner, f)?;
                    f.write_str("!")
                },
            }
        }
        write_type(&self.0, f)
    }
}
impl From<TypeRef> for ast::Type {
    fn from(value: TypeRef) -> Self {
        value.0
    }
}

fn is_graphql_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => (),
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("Invalid GraphQL type reference `{input}`: {reason}")]
pub struct TypeRefParseError {
    pub input: String,
    pub reason: &'static str,
}
impl TypeRefParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}
