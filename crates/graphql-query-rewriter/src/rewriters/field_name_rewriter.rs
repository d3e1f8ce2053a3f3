use crate::ast;
use crate::field_matcher;
use crate::rewriters::require_name;
use crate::RewriteError;
use crate::Rewriter;
use crate::RewriterConfigError;
use crate::Variables;
use std::collections::HashSet;

/// Renames a field, e.g. when `things` became `items` on the server.
///
/// Every field named `old_field_name` in the request is renamed to
/// `new_field_name`. Aliased fields keep their alias as their response key, so
/// their data needs no change in the response. For each un-aliased renamed
/// field, the response's `new_field_name` key is renamed back to
/// `old_field_name` (within every element when the parent is a list).
#[derive(Clone, Debug)]
pub struct FieldNameRewriter {
    new_field_name: String,
    old_field_name: String,

    /// Response paths (in terms of the rewritten request) of every un-aliased
    /// field this rewriter renamed.
    renamed_paths: Vec<Vec<String>>,
}
impl FieldNameRewriter {
    pub fn new(
        old_field_name: impl Into<String>,
        new_field_name: impl Into<String>,
    ) -> Result<Self, RewriterConfigError> {
        const REWRITER: &str = "FieldNameRewriter";
        Ok(Self {
            new_field_name: require_name(new_field_name.into(), "newFieldName", REWRITER)?,
            old_field_name: require_name(old_field_name.into(), "oldFieldName", REWRITER)?,
            renamed_paths: vec![],
        })
    }

    /// Collect the response paths of un-aliased fields named
    /// `old_field_name`, translated into the keys they'll have once renamed.
    fn collect_renamed_paths(&self, document: &ast::Document) -> Vec<Vec<String>> {
        let mut original_paths = vec![];
        for definition in &document.definitions {
            let ast::Definition::Operation(operation) = definition else {
                continue;
            };
            let matches =
                field_matcher::find_fields(document, operation, &self.old_field_name);
            for field_match in matches {
                if field_match.field.alias.is_none()
                    && !original_paths.contains(&field_match.response_path) {
                    original_paths.push(field_match.response_path);
                }
            }
        }

        // An ancestor segment needs translating too when the ancestor is
        // itself an un-aliased match (e.g. `things { things }`).
        let renamed_prefixes: HashSet<&[String]> =
            original_paths.iter().map(|path| path.as_slice()).collect();
        original_paths.iter()
            .map(|path| {
                (1..=path.len())
                    .map(|len| {
                        if renamed_prefixes.contains(&path[..len]) {
                            self.new_field_name.clone()
                        } else {
                            path[len - 1].clone()
                        }
                    })
                    .collect::<Vec<String>>()
            })
            .collect()
    }
}
impl Rewriter for FieldNameRewriter {
    fn rewrite_request(
        &mut self,
        document: &mut ast::Document,
        variables: Option<Variables>,
    ) -> Result<Option<Variables>, RewriteError> {
        self.renamed_paths = self.collect_renamed_paths(document);

        let mut num_renamed = 0;
        field_matcher::for_each_field_mut(document, &self.old_field_name, |field| {
            field.name = self.new_field_name.clone();
            num_renamed += 1;
        });
        log::trace!(
            "Renamed {num_renamed} selection(s) of field `{}` to `{}`.",
            self.old_field_name,
            self.new_field_name,
        );

        Ok(variables)
    }

    fn rewrite_response(
        &self,
        mut response: serde_json::Value,
    ) -> Result<serde_json::Value, RewriteError> {
        // Deepest first, so that the keys of renamed ancestors are still in
        // their rewritten form while descending to a renamed descendant.
        let mut paths: Vec<&[String]> =
            self.renamed_paths.iter().map(|path| path.as_slice()).collect();
        paths.sort_by_key(|path| std::cmp::Reverse(path.len()));

        for path in paths {
            if let Some((_, parent_path)) = path.split_last() {
                rename_key_at(
                    &mut response,
                    parent_path,
                    &self.new_field_name,
                    &self.old_field_name,
                );
            }
        }
        Ok(response)
    }
}

fn rename_key_at(
    value: &mut serde_json::Value,
    parent_path: &[String],
    from_key: &str,
    to_key: &str,
) {
    match value {
        serde_json::Value::Array(items) => {
            for item in items {
                rename_key_at(item, parent_path, from_key, to_key);
            }
        },

        serde_json::Value::Object(map) => match parent_path.split_first() {
            Some((key, rest)) => {
                if let Some(child) = map.get_mut(key) {
                    rename_key_at(child, rest, from_key, to_key);
                }
            },
            None => {
                if let Some(renamed_value) = map.remove(from_key) {
                    map.insert(to_key.to_string(), renamed_value);
                }
            },
        },

        _ => (),
    }
}
