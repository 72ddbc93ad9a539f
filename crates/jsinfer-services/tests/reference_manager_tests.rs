use super::ReferenceManager;
use crate::program::Program;
use crate::references::ReferenceTracker;
use crate::test_support::{init_tracing, node_at, offset_of};
use jsinfer_binder::{SourceFile, bind_source_file};
use jsinfer_common::{DeclarationRef, NodeId};
use jsinfer_scanner::SyntaxKind;
use std::sync::Arc;

fn bound(name: &str, text: &str) -> Arc<SourceFile> {
    init_tracing();
    let file = Arc::new(SourceFile::parse(name, text));
    bind_source_file(&file).expect("bind");
    file
}

/// The identifier at the `occurrence`-th whole-word `name`.
fn identifier(file: &SourceFile, name: &str, occurrence: usize) -> NodeId {
    let offset = offset_of(file.text(), name, occurrence);
    file.arena().id(file.tree().node_at_offset(offset))
}

fn declaration(file: &SourceFile, name: &str, kind: SyntaxKind) -> DeclarationRef {
    let node = node_at(file, name, 0, kind);
    DeclarationRef::new(file.file_name_arc(), file.arena().id(node))
}

#[test]
fn declaration_names_resolve_to_their_declaration() {
    let file = bound("a.js", "var a = 1; var b = a;");
    let program = Program::new([Arc::clone(&file)]);
    let mut manager = ReferenceManager::new();
    manager.update_references(&program);

    let a = declaration(&file, "a", SyntaxKind::VariableDeclaration);
    assert_eq!(manager.declaration_of("a.js", identifier(&file, "a", 0)), Some(&a));
    assert_eq!(manager.declaration_of("a.js", identifier(&file, "a", 1)), Some(&a));

    let references = manager.references_to_declaration(&a).expect("references");
    let in_file: Vec<NodeId> = references["a.js"].iter().copied().collect();
    assert_eq!(
        in_file,
        [identifier(&file, "a", 0), identifier(&file, "a", 1)]
    );
}

#[test]
fn property_names_are_not_references() {
    let file = bound("a.js", "var p = 1; var o = { p: p };");
    let program = Program::new([Arc::clone(&file)]);
    let mut manager = ReferenceManager::new();
    manager.update_references(&program);

    let p = declaration(&file, "p", SyntaxKind::VariableDeclaration);
    assert_eq!(manager.declaration_of("a.js", identifier(&file, "p", 1)), None);
    assert_eq!(manager.declaration_of("a.js", identifier(&file, "p", 2)), Some(&p));
}

#[test]
fn locals_shadow_globals_of_other_files() {
    let a = bound("a.js", "var g = 1;");
    let b = bound("b.js", "function f(g) { return g; }");
    let program = Program::new([Arc::clone(&a), Arc::clone(&b)]);
    let mut manager = ReferenceManager::new();
    manager.update_references(&program);

    let parameter = declaration(&b, "g", SyntaxKind::Parameter);
    assert_eq!(manager.declaration_of("b.js", identifier(&b, "g", 1)), Some(&parameter));
    // Only a.js itself refers to its `g`.
    assert_eq!(manager.dependents_of("a.js"), [Arc::<str>::from("a.js")]);
}

#[test]
fn globals_resolve_across_files() {
    let a = bound("a.js", "var g = 1;");
    let b = bound("b.js", "g = 's'; var h = g;");
    let program = Program::new([Arc::clone(&a), Arc::clone(&b)]);
    let mut manager = ReferenceManager::new();
    manager.update_references(&program);

    let g = declaration(&a, "g", SyntaxKind::VariableDeclaration);
    assert_eq!(manager.declaration_of("b.js", identifier(&b, "g", 0)), Some(&g));
    assert_eq!(manager.dependents_of("a.js"), [Arc::<str>::from("a.js"), Arc::from("b.js")]);

    let references = manager.references_to_declaration(&g).expect("references");
    let files: Vec<&str> = references.keys().map(|name| &**name).collect();
    assert_eq!(files, ["a.js", "b.js"]);
    assert_eq!(references["b.js"].len(), 2);
}

#[test]
fn unchanged_program_reports_nothing() {
    let file = bound("a.js", "var a = 1; a = 2;");
    let program = Program::new([Arc::clone(&file)]);
    let mut manager = ReferenceManager::new();

    let first = manager.update_references(&program);
    assert_eq!(first["a.js"].len(), 2);
    assert!(manager.update_references(&program).is_empty());
    assert_eq!(manager.tracked_file_count(), 1);
}

#[test]
fn new_declarations_resolve_earlier_references() {
    let b = bound("b.js", "var h = g;");
    let mut manager = ReferenceManager::new();
    manager.update_references(&Program::new([Arc::clone(&b)]));
    let g_reference = identifier(&b, "g", 0);
    assert_eq!(manager.declaration_of("b.js", g_reference), None);

    let a = bound("a.js", "var g = 1;");
    let program = Program::new([Arc::clone(&b), Arc::clone(&a)]);
    let affected = manager.update_references(&program);
    assert!(affected["b.js"].contains(&g_reference));
    assert!(manager.declaration_of("b.js", g_reference).is_some());
}

#[test]
fn removed_declarations_report_lost_references() {
    let a = bound("a.js", "var g = 1;");
    let b = bound("b.js", "var h = g;");
    let mut manager = ReferenceManager::new();
    manager.update_references(&Program::new([Arc::clone(&a), Arc::clone(&b)]));
    let g_reference = identifier(&b, "g", 0);

    let affected = manager.update_references(&Program::new([Arc::clone(&b)]));
    assert!(affected["b.js"].contains(&g_reference));
    assert_eq!(manager.declaration_of("b.js", g_reference), None);
    assert!(manager.bidirectional_references("a.js").is_none());
    assert_eq!(manager.tracked_file_count(), 1);
}

#[test]
fn files_without_identifiers_have_no_references() {
    let file = bound("a.js", "1 + 2;");
    let mut manager = ReferenceManager::new();
    manager.update_references(&Program::new([Arc::clone(&file)]));
    assert!(manager.bidirectional_references("a.js").is_none());
}

#[test]
fn reverse_index_follows_program_order() {
    let a = bound("a.js", "var g = 1;");
    let c = bound("c.js", "g = 3;");
    let b = bound("b.js", "g = 2;");
    let mut manager = ReferenceManager::new();
    manager.update_references(&Program::new([Arc::clone(&a), Arc::clone(&c)]));
    manager.update_references(&Program::new([
        Arc::clone(&a),
        Arc::clone(&b),
        Arc::clone(&c),
    ]));

    let g = declaration(&a, "g", SyntaxKind::VariableDeclaration);
    let references = manager.references_to_declaration(&g).expect("references");
    let files: Vec<&str> = references.keys().map(|name| &**name).collect();
    assert_eq!(files, ["a.js", "b.js", "c.js"]);
}

#[test]
fn program_change_schedules_rescans() {
    let a = bound("a.js", "var g = 1;");
    let program = Program::new([Arc::clone(&a)]);
    let mut manager = ReferenceManager::new();
    manager.update_references(&program);
    assert!(manager.update_references(&program).is_empty());

    let change = crate::references::ProgramChange {
        added_symbols: a.value_symbols().expect("symbols"),
        ..Default::default()
    };
    manager.on_after_program_created(&program, &change);
    // Same resolutions after the rescan: nothing is reported as changed.
    assert!(manager.update_references(&program).is_empty());
}

#[test]
fn vanished_references_report_their_declaration_by_name() {
    let a = bound("a.js", "var g = 1;");
    let b = bound("b.js", "g = 's';");
    let mut manager = ReferenceManager::new();
    manager.update_references(&Program::new([Arc::clone(&a), Arc::clone(&b)]));

    let affected = manager.update_references(&Program::new([Arc::clone(&a)]));
    assert_eq!(affected.len(), 1);
    assert!(affected["a.js"].contains(&identifier(&a, "g", 0)));
    let g = declaration(&a, "g", SyntaxKind::VariableDeclaration);
    assert_eq!(manager.references_to_declaration(&g).map(|by_file| by_file.len()), Some(1));
}
