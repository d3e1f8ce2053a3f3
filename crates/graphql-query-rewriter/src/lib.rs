//! Rewrites GraphQL requests written against an older version of a schema so
//! that they can be sent to a server running a newer version of that schema,
//! and rewrites the server's responses back into the shape the client asked
//! for.
//!
//! A [`RewriteHandler`] owns an ordered list of [`Rewriter`]s and is used for
//! exactly one request/response exchange:
//!
//! ```
//! use graphql_query_rewriter::RewriteHandler;
//! use graphql_query_rewriter::rewriters::FieldArgTypeRewriter;
//!
//! let rewriter = FieldArgTypeRewriter::new(
//!     "things",
//!     "identifier",
//!     "String!",
//!     "Int!",
//! ).unwrap();
//! let mut handler = RewriteHandler::new(vec![Box::new(rewriter)]);
//!
//! let rewritten = handler.rewrite_request(
//!     "query doTheThings($arg1: String!) { things(identifier: $arg1) { cat } }",
//!     None,
//! ).unwrap();
//! assert!(rewritten.query.contains("$arg1: Int!"));
//! ```

pub mod ast;
pub mod config;
mod error;
pub mod field_matcher;
mod rewrite_handler;
pub mod rewriters;
mod type_ref;
mod variable_registry;

pub use config::Coercion;
pub use config::CoercionError;
pub use config::RewriterConfig;
pub use error::BoxError;
pub use error::RewriteError;
pub use error::RewriterConfigError;
pub use rewrite_handler::RewriteHandler;
pub use rewrite_handler::RewriteState;
pub use rewrite_handler::RewrittenRequest;
pub use rewriters::Rewriter;
pub use rewriters::Variables;
pub use type_ref::TypeRef;
pub use type_ref::TypeRefParseError;
pub use variable_registry::VariableRegistry;

#[cfg(test)]
mod tests;
