mod field_arg_name_rewriter;
mod field_arg_type_rewriter;
mod field_name_rewriter;

pub use field_arg_name_rewriter::FieldArgNameRewriter;
pub use field_arg_type_rewriter::CoerceVariableFn;
pub use field_arg_type_rewriter::FieldArgTypeRewriter;
pub use field_name_rewriter::FieldNameRewriter;

use crate::ast;
use crate::RewriteError;
use crate::RewriterConfigError;

/// The caller-supplied values of a request's variables, keyed by variable
/// name.
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// A single rule that bridges one difference between the schema a client was
/// written against and the schema the server now serves.
///
/// A [`RewriteHandler`](crate::RewriteHandler) runs each of its rewriters'
/// [`rewrite_request`](Rewriter::rewrite_request) in list order and then, once
/// the server has responded, each of their
/// [`rewrite_response`](Rewriter::rewrite_response) in reverse list order. A
/// rewriter instance is owned by exactly one handler and therefore sees at most
/// one request and one response, which lets it remember what it changed in the
/// request when undoing that change in the response.
pub trait Rewriter: std::fmt::Debug + Send {
    /// Mutate `document` in place and return the (possibly updated)
    /// `variables`.
    fn rewrite_request(
        &mut self,
        document: &mut ast::Document,
        variables: Option<Variables>,
    ) -> Result<Option<Variables>, RewriteError>;

    /// Transform the `data` of a response to the rewritten request back into
    /// the shape of the original request.
    fn rewrite_response(
        &self,
        response: serde_json::Value,
    ) -> Result<serde_json::Value, RewriteError> {
        Ok(response)
    }
}

fn require_name(
    value: String,
    option: &'static str,
    rewriter: &'static str,
) -> Result<String, RewriterConfigError> {
    if value.trim().is_empty() {
        return Err(RewriterConfigError::EmptyName { option, rewriter });
    }
    Ok(value)
}
