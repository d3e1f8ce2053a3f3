use crate::ast;
use crate::TypeRef;
use crate::Variables;

/// A view over one operation's variable definitions together with the
/// caller-supplied variable values, keyed by variable name.
///
/// Rewriters go through a [`VariableRegistry`] so that a variable's declared
/// type and its supplied value are always edited together. The registry never
/// adds or removes definitions or values; it only rewrites them in place.
#[derive(Debug)]
pub struct VariableRegistry<'a> {
    definitions: &'a mut [ast::VariableDefinition],
    values: Option<&'a mut Variables>,
}
impl<'a> VariableRegistry<'a> {
    pub fn new(
        definitions: &'a mut [ast::VariableDefinition],
        values: Option<&'a mut Variables>,
    ) -> Self {
        Self {
            definitions,
            values,
        }
    }

    pub fn definition(&self, name: &str) -> Option<&ast::VariableDefinition> {
        self.definitions.iter().find(|var_def| var_def.name == name)
    }

    pub fn declared_type(&self, name: &str) -> Option<&ast::Type> {
        self.definition(name).map(|var_def| &var_def.var_type)
    }

    /// Change the declared type of the variable named `name` to `new_type`,
    /// but only if it is currently declared as `old_type`.
    ///
    /// Returns `true` if the definition was rewritten.
    pub fn rewrite_type(
        &mut self,
        name: &str,
        old_type: &TypeRef,
        new_type: &TypeRef,
    ) -> bool {
        let var_def = self.definitions.iter_mut().find(|var_def| var_def.name == name);
        match var_def {
            Some(var_def) if old_type.matches(&var_def.var_type) => {
                var_def.var_type = new_type.as_ast().clone();
                true
            },
            _ => false,
        }
    }

    pub fn value(&self, name: &str) -> Option<&serde_json::Value> {
        self.values.as_deref().and_then(|values| values.get(name))
    }

    /// Replace the supplied value of the variable named `name` with
    /// `replace_fn(current_value)`.
    ///
    /// `replace_fn` is only invoked when a value for `name` was supplied. Any
    /// error it returns is passed through untouched and the existing value is
    /// left in place. Returns `Ok(true)` if the value was replaced.
    pub fn replace_value<E>(
        &mut self,
        name: &str,
        replace_fn: impl FnOnce(&serde_json::Value) -> Result<serde_json::Value, E>,
    ) -> Result<bool, E> {
        let Some(value) = self.values.as_deref_mut().and_then(|values| values.get_mut(name)) else {
            return Ok(false);
        };
        *value = replace_fn(value)?;
        Ok(true)
    }
}
