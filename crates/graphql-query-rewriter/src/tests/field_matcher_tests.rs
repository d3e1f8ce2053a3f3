use crate::ast;
use crate::field_matcher;

fn operation(doc: &ast::Document, idx: usize) -> &ast::OperationDefinition {
    match &doc.definitions[idx] {
        ast::Definition::Operation(operation) => operation,
        ast::Definition::Fragment(fragment) =>
            panic!("Expected an operation, found fragment `{}`", fragment.name),
    }
}

fn matched_paths(query_src: &str, field_name: &str) -> Vec<String> {
    let doc = ast::parse(query_src).unwrap();
    field_matcher::find_fields(&doc, operation(&doc, 0), field_name)
        .into_iter()
        .map(|field_match| field_match.response_path.join("."))
        .collect()
}

#[test]
fn finds_fields_at_any_depth() {
    let paths = matched_paths(
        "{ things { cat } stuff { more { things { dog } } } }",
        "things",
    );
    assert_eq!(paths, vec!["things", "stuff.more.things"]);
}

#[test]
fn matches_by_name_and_paths_by_alias() {
    let paths = matched_paths(
        "{ a: things { cat } things: otherThing { dog } }",
        "things",
    );
    assert_eq!(paths, vec!["a"]);
}

#[test]
fn finds_fields_nested_within_matched_fields() {
    let paths = matched_paths("{ things { things { cat } } }", "things");
    assert_eq!(paths, vec!["things", "things.things"]);
}

#[test]
fn descends_into_inline_fragments_without_a_path_segment() {
    let paths = matched_paths(
        "{ stuff { ... on Stuff { things { cat } } } }",
        "things",
    );
    assert_eq!(paths, vec!["stuff.things"]);
}

#[test]
fn expands_fragment_spreads_at_each_spread_site() {
    let paths = matched_paths(
        r#"
        query Q {
            first { ...ThingsFragment }
            second { ...ThingsFragment }
        }
        fragment ThingsFragment on Stuff { things { cat } }
        "#,
        "things",
    );
    assert_eq!(paths, vec!["first.things", "second.things"]);
}

#[test]
fn expands_cyclic_fragment_spreads_once() {
    let paths = matched_paths(
        r#"
        query Q { stuff { ...A } }
        fragment A on Stuff { things { cat } ...B }
        fragment B on Stuff { ...A }
        "#,
        "things",
    );
    assert_eq!(paths, vec!["stuff.things"]);
}

#[test]
fn skips_spreads_of_undefined_fragments() {
    let paths = matched_paths("query Q { stuff { ...Missing things } }", "things");
    assert_eq!(paths, vec!["stuff.things"]);
}

#[test]
fn finds_nothing_when_no_field_matches() {
    let paths = matched_paths("query Q { stuff { cat } }", "things");
    assert!(paths.is_empty());
}

#[test]
fn only_searches_the_given_operation() {
    let doc = ast::parse(r#"
        query A { things { cat } }
        query B { stuff { dog } }
    "#).unwrap();
    assert_eq!(field_matcher::find_fields(&doc, operation(&doc, 0), "things").len(), 1);
    assert!(field_matcher::find_fields(&doc, operation(&doc, 1), "things").is_empty());
}

#[test]
fn for_each_field_mut_visits_operations_and_fragment_definitions_once() {
    let mut doc = ast::parse(r#"
        query A { things { cat } ...F ...F }
        mutation B { stuff { ... on Stuff { things { dog } } } }
        fragment F on Query { things { catdog } }
    "#).unwrap();

    let mut visited = vec![];
    field_matcher::for_each_field_mut(&mut doc, "things", |field| {
        visited.push(field.selection_set.items.len());
        field.alias = Some("renamed".to_string());
    });
    assert_eq!(visited.len(), 3);

    let printed = ast::print(&doc);
    assert_eq!(printed.matches("renamed: things").count(), 3);
}

#[test]
fn shorthand_operations_have_no_variable_definitions() {
    let mut doc = ast::parse("{ things }").unwrap();
    let ast::Definition::Operation(operation) = &mut doc.definitions[0] else {
        panic!("Expected an operation definition");
    };
    assert!(field_matcher::variable_definitions_mut(operation).is_none());
}

#[test]
fn operations_mut_yields_each_operation_in_document_order() {
    let mut doc = ast::parse(r#"
        { things }
        fragment F on Query { stuff }
        query A($a: Int) { things }
        mutation B($b: Int, $c: Int) { stuff }
        subscription C { things }
    "#).unwrap();

    let shapes = field_matcher::operations_mut(&mut doc)
        .map(|operation| (
            operation.variable_definitions.map(|var_defs| var_defs.len()),
            operation.selection_set.items.len(),
        ))
        .collect::<Vec<_>>();
    assert_eq!(shapes, vec![(None, 1), (Some(1), 1), (Some(2), 1), (Some(0), 1)]);

    for operation in field_matcher::operations_mut(&mut doc) {
        operation.selection_set.items.clear();
    }
    let printed = ast::print(&doc);
    assert!(!printed.contains("things"));
    assert!(printed.contains("fragment F on Query"));
}
