use crate::ast;
use crate::field_matcher;
use crate::rewriters::require_name;
use crate::BoxError;
use crate::RewriteError;
use crate::Rewriter;
use crate::RewriterConfigError;
use crate::TypeRef;
use crate::VariableRegistry;
use crate::Variables;
use indexmap::IndexSet;
use std::collections::HashSet;
use std::sync::Arc;

/// Maps a variable's old value to the value expected by its new type.
pub type CoerceVariableFn = Arc<
    dyn Fn(&serde_json::Value) -> Result<serde_json::Value, BoxError> + Send + Sync,
>;

/// Changes the declared type of the variable passed to one argument of a
/// field, e.g. when `things(identifier: String!)` became
/// `things(identifier: Int!)` on the server.
///
/// Only arguments whose value is a variable reference are rewritten; literal
/// argument values are left alone. A variable is only re-declared if its
/// current declared type is exactly `old_type`.
///
/// An optional coercion function converts the caller-supplied value of each
/// re-declared variable. Its errors are returned from
/// [`rewrite_request`](Rewriter::rewrite_request) as
/// [`RewriteError::VariableCoercion`].
///
/// Responses are returned unchanged: the type of an argument has no bearing on
/// the shape of the data returned for the field.
#[derive(Clone)]
pub struct FieldArgTypeRewriter {
    arg_name: String,
    coerce_variable: Option<CoerceVariableFn>,
    field_name: String,
    new_type: TypeRef,
    old_type: TypeRef,
}
impl FieldArgTypeRewriter {
    pub fn new(
        field_name: impl Into<String>,
        arg_name: impl Into<String>,
        old_type: &str,
        new_type: &str,
    ) -> Result<Self, RewriterConfigError> {
        const REWRITER: &str = "FieldArgTypeRewriter";
        Ok(Self {
            arg_name: require_name(arg_name.into(), "argName", REWRITER)?,
            coerce_variable: None,
            field_name: require_name(field_name.into(), "fieldName", REWRITER)?,
            new_type: new_type.parse()?,
            old_type: old_type.parse()?,
        })
    }

    pub fn with_coerce_variable(
        mut self,
        coerce_fn: impl Fn(&serde_json::Value) -> Result<serde_json::Value, BoxError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.coerce_variable = Some(Arc::new(coerce_fn));
        self
    }

    pub fn arg_name(&self) -> &str {
        self.arg_name.as_str()
    }

    pub fn field_name(&self) -> &str {
        self.field_name.as_str()
    }

    pub fn new_type(&self) -> &TypeRef {
        &self.new_type
    }

    pub fn old_type(&self) -> &TypeRef {
        &self.old_type
    }

    /// Names of the variables passed as `arg_name` to a matching field
    /// anywhere within `operation`, including within the fragments it spreads.
    fn targeted_variables(
        &self,
        document: &ast::Document,
        operation: &ast::OperationDefinition,
    ) -> IndexSet<String> {
        field_matcher::find_fields(document, operation, &self.field_name)
            .into_iter()
            .filter_map(|field_match| {
                let arg_value = field_match.field.arguments.iter()
                    .find(|(arg_name, _)| *arg_name == self.arg_name)
                    .map(|(_, value)| value);

                match arg_value {
                    Some(ast::Value::Variable(var_name)) => Some(var_name.to_string()),
                    Some(_) => {
                        log::trace!(
                            "Skipping `{}({}: ...)` at `{}`: argument value is a \
                            literal rather than a variable.",
                            self.field_name,
                            self.arg_name,
                            field_match.response_path.join("."),
                        );
                        None
                    },
                    None => None,
                }
            })
            .collect()
    }
}
impl Rewriter for FieldArgTypeRewriter {
    fn rewrite_request(
        &mut self,
        document: &mut ast::Document,
        mut variables: Option<Variables>,
    ) -> Result<Option<Variables>, RewriteError> {
        let targeted_per_operation: Vec<IndexSet<String>> =
            document.definitions.iter()
                .filter_map(|definition| match definition {
                    ast::Definition::Operation(operation) =>
                        Some(self.targeted_variables(document, operation)),
                    ast::Definition::Fragment(_) => None,
                })
                .collect();

        // Several operations in one document share a single variables map, so
        // a value is only ever coerced once.
        let mut coerced = HashSet::new();
        let operations = field_matcher::operations_mut(document).zip(targeted_per_operation);
        for (operation, targeted_vars) in operations {
            let Some(var_defs) = operation.variable_definitions else {
                continue;
            };

            let mut registry = VariableRegistry::new(var_defs, variables.as_mut());
            for var_name in targeted_vars {
                // A variable declared with any other type is either already in
                // its new form or not what this rule describes.
                if !registry.rewrite_type(&var_name, &self.old_type, &self.new_type) {
                    continue;
                }
                log::trace!(
                    "Rewrote declared type of `${var_name}` from `{}` to `{}`.",
                    self.old_type,
                    self.new_type,
                );

                let Some(coerce_fn) = &self.coerce_variable else {
                    continue;
                };
                if coerced.contains(&var_name) {
                    continue;
                }
                let replaced = registry.replace_value(&var_name, |value| coerce_fn(value))
                    .map_err(|source| RewriteError::VariableCoercion {
                        variable_name: var_name.clone(),
                        source,
                    })?;
                if replaced {
                    log::trace!("Coerced the value of `${var_name}`.");
                    coerced.insert(var_name);
                }
            }
        }

        Ok(variables)
    }
}
impl std::fmt::Debug for FieldArgTypeRewriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldArgTypeRewriter")
            .field("field_name", &self.field_name)
            .field("arg_name", &self.arg_name)
            .field("old_type", &self.old_type.to_string())
            .field("new_type", &self.new_type.to_string())
            .field("coerce_variable", &self.coerce_variable.as_ref().map(|_| "Fn(..)"))
            .finish()
    }
}
