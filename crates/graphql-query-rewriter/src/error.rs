use crate::ast;
use crate::RewriteState;
use crate::TypeRefParseError;
use std::sync::Arc;
use thiserror::Error;

/// The error type produced by caller-supplied variable coercion functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error(
        "`{attempted}` is not allowed while the handler is in the `{state:?}` \
        state. A RewriteHandler rewrites exactly one request followed by \
        exactly one response."
    )]
    AlreadyRewritten {
        attempted: &'static str,
        state: RewriteState,
    },

    #[error("{0}")]
    Parse(Arc<ast::ParseError>),

    #[error("Failed to coerce the value of variable `${variable_name}`: {source}")]
    VariableCoercion {
        variable_name: String,
        #[source]
        source: BoxError,
    },
}
impl std::convert::From<ast::ParseError> for RewriteError {
    fn from(value: ast::ParseError) -> Self {
        Self::Parse(Arc::new(value))
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RewriterConfigError {
    #[error("The `{option}` option of a {rewriter} rule must not be empty.")]
    EmptyName {
        option: &'static str,
        rewriter: &'static str,
    },

    #[error(transparent)]
    InvalidTypeReference(#[from] TypeRefParseError),
}
