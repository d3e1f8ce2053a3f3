use crate::ast;
use crate::field_matcher;
use crate::rewriters::require_name;
use crate::RewriteError;
use crate::Rewriter;
use crate::RewriterConfigError;
use crate::Variables;

/// Renames an argument of a field, e.g. when `things(identifier: ...)` became
/// `things(id: ...)` on the server.
///
/// Both variable and literal argument values are carried over unchanged. A
/// field that already passes an argument named `new_arg_name` is left alone
/// so that no field ever ends up with two arguments of the same name.
#[derive(Clone, Debug)]
pub struct FieldArgNameRewriter {
    field_name: String,
    new_arg_name: String,
    old_arg_name: String,
}
impl FieldArgNameRewriter {
    pub fn new(
        field_name: impl Into<String>,
        old_arg_name: impl Into<String>,
        new_arg_name: impl Into<String>,
    ) -> Result<Self, RewriterConfigError> {
        const REWRITER: &str = "FieldArgNameRewriter";
        Ok(Self {
            field_name: require_name(field_name.into(), "fieldName", REWRITER)?,
            new_arg_name: require_name(new_arg_name.into(), "newArgName", REWRITER)?,
            old_arg_name: require_name(old_arg_name.into(), "oldArgName", REWRITER)?,
        })
    }
}
impl Rewriter for FieldArgNameRewriter {
    fn rewrite_request(
        &mut self,
        document: &mut ast::Document,
        variables: Option<Variables>,
    ) -> Result<Option<Variables>, RewriteError> {
        field_matcher::for_each_field_mut(document, &self.field_name, |field| {
            if field.arguments.iter().any(|(name, _)| *name == self.new_arg_name) {
                log::trace!(
                    "Not renaming `{}({}: ...)`: it already has an argument \
                    named `{}`.",
                    self.field_name,
                    self.old_arg_name,
                    self.new_arg_name,
                );
                return;
            }
            let arg = field.arguments.iter_mut()
                .find(|(name, _)| *name == self.old_arg_name);
            if let Some((name, _)) = arg {
                log::trace!(
                    "Renamed argument `{}({}: ...)` to `{}`.",
                    self.field_name,
                    self.old_arg_name,
                    self.new_arg_name,
                );
                *name = self.new_arg_name.clone();
            }
        });
        Ok(variables)
    }
}
