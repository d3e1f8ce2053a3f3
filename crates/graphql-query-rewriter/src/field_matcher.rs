//! Locates field selections by name anywhere within an executable document.
//!
//! Matching is by field *name* only. Aliases, parent types, and the position
//! of a field within its selection set are ignored, so a field named `things`
//! is matched at the root of an operation just the same as when it's nested
//! several levels deep or requested as `alias: things`.

use crate::ast;
use indexmap::IndexMap;

/// One occurrence of a matched field within an operation.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldMatch<'doc> {
    pub field: &'doc ast::Field,

    /// The keys under which this field's data appears in the response,
    /// starting at the operation root and ending with this field's own
    /// response key (its alias if it has one, otherwise its name).
    pub response_path: Vec<String>,
}

/// Returns the key under which `field`'s value appears in a response.
pub fn response_key(field: &ast::Field) -> &str {
    field.alias.as_deref().unwrap_or(field.name.as_str())
}

pub fn selection_set(operation: &ast::OperationDefinition) -> &ast::SelectionSet {
    match operation {
        ast::OperationDefinition::SelectionSet(selection_set) => selection_set,
        ast::OperationDefinition::Query(query) => &query.selection_set,
        ast::OperationDefinition::Mutation(mutation) => &mutation.selection_set,
        ast::OperationDefinition::Subscription(subscription) => &subscription.selection_set,
    }
}

/// Mutable views of the parts of an operation that rewriters edit, uniform
/// across the shorthand, query, mutation and subscription forms.
#[derive(Debug)]
pub struct OperationMut<'doc> {
    /// `None` for shorthand (`{ ... }`) operations, which cannot declare
    /// variables.
    pub variable_definitions: Option<&'doc mut Vec<ast::VariableDefinition>>,
    pub selection_set: &'doc mut ast::SelectionSet,
}

pub fn operation_mut(operation: &mut ast::OperationDefinition) -> OperationMut<'_> {
    match operation {
        ast::OperationDefinition::SelectionSet(selection_set) => OperationMut {
            variable_definitions: None,
            selection_set,
        },
        ast::OperationDefinition::Query(query) => OperationMut {
            variable_definitions: Some(&mut query.variable_definitions),
            selection_set: &mut query.selection_set,
        },
        ast::OperationDefinition::Mutation(mutation) => OperationMut {
            variable_definitions: Some(&mut mutation.variable_definitions),
            selection_set: &mut mutation.selection_set,
        },
        ast::OperationDefinition::Subscription(subscription) => OperationMut {
            variable_definitions: Some(&mut subscription.variable_definitions),
            selection_set: &mut subscription.selection_set,
        },
    }
}

/// Every operation in `document`, in document order. Fragment definitions
/// are skipped.
pub fn operations_mut(
    document: &mut ast::Document,
) -> impl Iterator<Item = OperationMut<'_>> {
    document.definitions.iter_mut()
        .filter_map(|definition| match definition {
            ast::Definition::Operation(operation) => Some(operation_mut(operation)),
            ast::Definition::Fragment(_) => None,
        })
}

/// Mutable access to an operation's variable definitions.
///
/// Returns `None` for shorthand (`{ ... }`) operations, which cannot declare
/// variables.
pub fn variable_definitions_mut(
    operation: &mut ast::OperationDefinition,
) -> Option<&mut Vec<ast::VariableDefinition>> {
    operation_mut(operation).variable_definitions
}

/// Find every field named `field_name` that would be selected when executing
/// `operation`.
///
/// Fields are yielded in document order. Inline fragments are descended into
/// without contributing a response path segment, and named fragment spreads
/// are resolved against `document`'s fragment definitions and matched as if
/// the fragment's selections were written at the spread site. A fragment that
/// (directly or transitively) spreads itself is only expanded once per chain.
pub fn find_fields<'doc>(
    document: &'doc ast::Document,
    operation: &'doc ast::OperationDefinition,
    field_name: &str,
) -> Vec<FieldMatch<'doc>> {
    let mut matcher = FieldMatcher {
        active_spreads: vec![],
        field_name,
        fragments: fragment_definitions(document),
        matches: vec![],
    };
    matcher.visit_selection_set(selection_set(operation), &mut vec![]);
    matcher.matches
}

/// Call `visit_fn` on every field named `field_name` in `document`, including
/// fields within fragment definitions.
///
/// Unlike [`find_fields`], fragment spreads are not followed: each fragment
/// definition is visited exactly once, directly. The fields nested beneath a
/// matched field are visited after `visit_fn` returns, so `visit_fn` renaming
/// a field does not stop the traversal.
pub fn for_each_field_mut(
    document: &mut ast::Document,
    field_name: &str,
    mut visit_fn: impl FnMut(&mut ast::Field),
) {
    for operation in operations_mut(document) {
        visit_selection_set_mut(operation.selection_set, field_name, &mut visit_fn);
    }
    for definition in &mut document.definitions {
        if let ast::Definition::Fragment(fragment) = definition {
            visit_selection_set_mut(&mut fragment.selection_set, field_name, &mut visit_fn);
        }
    }
}

fn visit_selection_set_mut(
    selection_set: &mut ast::SelectionSet,
    field_name: &str,
    visit_fn: &mut impl FnMut(&mut ast::Field),
) {
    for selection in &mut selection_set.items {
        match selection {
            ast::Selection::Field(field) => {
                if field.name == field_name {
                    visit_fn(field);
                }
                visit_selection_set_mut(&mut field.selection_set, field_name, visit_fn);
            },
            ast::Selection::InlineFragment(inline_fragment) =>
                visit_selection_set_mut(&mut inline_fragment.selection_set, field_name, visit_fn),
            ast::Selection::FragmentSpread(_) => (),
        }
    }
}

fn fragment_definitions(
    document: &ast::Document,
) -> IndexMap<&str, &ast::FragmentDefinition> {
    document.definitions.iter()
        .filter_map(|definition| match definition {
            ast::Definition::Fragment(fragment) => Some((fragment.name.as_str(), fragment)),
            ast::Definition::Operation(_) => None,
        })
        .collect()
}

struct FieldMatcher<'doc, 'name> {
    active_spreads: Vec<&'doc str>,
    field_name: &'name str,
    fragments: IndexMap<&'doc str, &'doc ast::FragmentDefinition>,
    matches: Vec<FieldMatch<'doc>>,
}
impl<'doc> FieldMatcher<'doc, '_> {
    fn visit_selection_set(
        &mut self,
        selection_set: &'doc ast::SelectionSet,
        path: &mut Vec<String>,
    ) {
        for selection in &selection_set.items {
            match selection {
                ast::Selection::Field(field) => {
                    path.push(response_key(field).to_string());
                    if field.name == self.field_name {
                        self.matches.push(FieldMatch {
                            field,
                            response_path: path.clone(),
                        });
                    }
                    self.visit_selection_set(&field.selection_set, path);
                    path.pop();
                },

                ast::Selection::InlineFragment(inline_fragment) =>
                    self.visit_selection_set(&inline_fragment.selection_set, path),

                ast::Selection::FragmentSpread(spread) => {
                    let fragment_name = spread.fragment_name.as_str();
                    if self.active_spreads.contains(&fragment_name) {
                        log::trace!(
                            "Not re-expanding cyclic spread of fragment `{fragment_name}`.",
                        );
                        continue;
                    }
                    let Some(fragment) = self.fragments.get(fragment_name).copied() else {
                        log::trace!(
                            "Skipping spread of undefined fragment `{fragment_name}`.",
                        );
                        continue;
                    };
                    self.active_spreads.push(fragment_name);
                    self.visit_selection_set(&fragment.selection_set, path);
                    self.active_spreads.pop();
                },
            }
        }
    }
}
