use super::{Project, TextEdit};
use crate::test_support::{node_at, offset_of, project_with, type_text};
use jsinfer_common::TextSpan;
use jsinfer_scanner::SyntaxKind;

fn replace(project: &mut Project, file_name: &str, needle: &str, occurrence: usize, text: &str) {
    let source = project.file(file_name).expect("file").text().to_string();
    let start = offset_of(&source, needle, occurrence);
    let edit = TextEdit::new(TextSpan::new(start, needle.len() as u32), text);
    assert!(project.update_file(file_name, &edit).unwrap());
}

#[test]
fn incremental_edit_changes_dependent_types() {
    let mut project = project_with(&[("test.js", "var a = 1; var b = a;")]);
    assert_eq!(type_text(&mut project, "test.js", "b", 0), "number");

    replace(&mut project, "test.js", "1", 0, "'s'");
    assert_eq!(project.file("test.js").unwrap().text(), "var a = 's'; var b = a;");
    assert_eq!(type_text(&mut project, "test.js", "b", 0), "string");
}

#[test]
fn edits_inside_a_function_keep_unrelated_symbols() {
    let text = "var x = 1; function f(p) { var y = p; return y; }";
    let mut project = project_with(&[("test.js", text)]);
    assert_eq!(type_text(&mut project, "test.js", "x", 0), "number");
    assert_eq!(type_text(&mut project, "test.js", "f", 0), "undefined");

    let file = project.file("test.js").unwrap().clone();
    let x_decl = file.arena().id(node_at(&file, "x", 0, SyntaxKind::VariableDeclaration));
    let old_f = file.arena().id(node_at(&file, "f", 0, SyntaxKind::FunctionDeclaration));
    let f_symbol = project.engine().cached_symbol(old_f).unwrap();

    replace(&mut project, "test.js", "return", 0, "return 1 +");

    let file = project.file("test.js").unwrap().clone();
    let new_f = file.arena().id(node_at(&file, "f", 0, SyntaxKind::FunctionDeclaration));
    assert_eq!(project.engine().cached_symbol(new_f), Some(f_symbol));
    assert!(project.engine().has_cached_type(x_decl));
    assert_eq!(type_text(&mut project, "test.js", "x", 0), "number");
}

#[test]
fn renamed_declarations_lose_their_symbol() {
    let mut project = project_with(&[("test.js", "var a = 1; var b = a;")]);
    assert_eq!(type_text(&mut project, "test.js", "b", 0), "number");

    // Renaming the declaration leaves `b` reading an unresolved `a`.
    replace(&mut project, "test.js", "a", 0, "c");
    assert_eq!(type_text(&mut project, "test.js", "b", 0), "undefined");
    assert_eq!(type_text(&mut project, "test.js", "c", 0), "number");
}

#[test]
fn cross_file_references_follow_edits_and_removal() {
    let mut project = project_with(&[("a.js", "var g = 1;"), ("b.js", "var h = g;")]);
    assert_eq!(type_text(&mut project, "b.js", "h", 0), "number");

    replace(&mut project, "a.js", "1", 0, "true");
    assert_eq!(type_text(&mut project, "b.js", "h", 0), "boolean");

    assert!(project.remove_file("a.js").unwrap());
    assert_eq!(project.file_count(), 1);
    assert_eq!(type_text(&mut project, "b.js", "h", 0), "undefined");
}

#[test]
fn assignments_in_other_files_flow_back() {
    let mut project = project_with(&[("a.js", "var g = 1;")]);
    assert_eq!(type_text(&mut project, "a.js", "g", 0), "number");

    project
        .set_file("b.js".to_string(), "g = 's';".to_string())
        .unwrap();
    assert_eq!(type_text(&mut project, "a.js", "g", 0), "(number | string)");

    project
        .set_file("b.js".to_string(), "g = 2;".to_string())
        .unwrap();
    assert_eq!(type_text(&mut project, "a.js", "g", 0), "number");
}

#[test]
fn removing_an_assigning_file_retracts_its_contribution() {
    let mut project = project_with(&[("a.js", "var g = 1;"), ("b.js", "g = 's';")]);
    assert_eq!(type_text(&mut project, "a.js", "g", 0), "(number | string)");

    assert!(project.remove_file("b.js").unwrap());
    assert_eq!(type_text(&mut project, "a.js", "g", 0), "number");
}

#[test]
fn set_file_replaces_the_whole_text() {
    let mut project = project_with(&[("test.js", "var a = 1;")]);
    assert_eq!(type_text(&mut project, "test.js", "a", 0), "number");
    project
        .set_file("test.js".to_string(), "var a = 'one';".to_string())
        .unwrap();
    assert_eq!(project.file_count(), 1);
    assert_eq!(type_text(&mut project, "test.js", "a", 0), "string");
}

#[test]
fn unknown_files_are_reported_not_errors() {
    let mut project = Project::new();
    let edit = TextEdit::new(TextSpan::new(0, 0), "x");
    assert!(!project.update_file("missing.js", &edit).unwrap());
    assert!(!project.remove_file("missing.js").unwrap());
    assert_eq!(project.type_at("missing.js", 0), None);
}

#[test]
fn non_script_files_are_not_indexed() {
    let mut project = project_with(&[("notes.txt", "var q = 1; q;")]);
    assert_eq!(project.program().len(), 1);
    assert!(!project.file("notes.txt").unwrap().is_bound());
    assert_eq!(type_text(&mut project, "notes.txt", "q", 1), "undefined");
}

#[test]
fn program_keeps_insertion_order() {
    let mut project = project_with(&[("b.js", ""), ("a.js", ""), ("c.js", "")]);
    project.set_file("a.js".to_string(), "var a;".to_string()).unwrap();
    let names: Vec<&str> = project
        .program()
        .source_files()
        .iter()
        .map(|file| file.file_name())
        .collect();
    assert_eq!(names, ["b.js", "a.js", "c.js"]);
    assert!(project.program().contains("a.js"));
}

#[test]
fn text_edits_deserialize_from_camel_case() {
    let edit: TextEdit =
        serde_json::from_str(r#"{ "span": { "start": 8, "length": 1 }, "newText": "2" }"#).unwrap();
    assert_eq!(edit, TextEdit::new(TextSpan::new(8, 1), "2"));
}
