use crate::inference::InferenceEngine;
use crate::program::Program;
use crate::test_support::{init_tracing, node_at};
use jsinfer_binder::SourceFile;
use jsinfer_parser::NodeIndex;
use jsinfer_scanner::SyntaxKind;
use jsinfer_solver::TypeInfoId;
use std::sync::Arc;

struct Fixture {
    engine: InferenceEngine,
    files: Vec<Arc<SourceFile>>,
    program: Program,
}

impl Fixture {
    fn new(files: &[(&str, &str)]) -> Fixture {
        init_tracing();
        let mut fixture = Fixture {
            engine: InferenceEngine::new(),
            files: Vec::new(),
            program: Program::default(),
        };
        for &(name, text) in files {
            fixture.add(name, text);
        }
        fixture
    }

    fn add(&mut self, name: &str, text: &str) -> Arc<SourceFile> {
        let file = Arc::new(SourceFile::parse(name, text));
        self.files.push(Arc::clone(&file));
        self.program = Program::new(self.files.iter().cloned());
        let mut updater = self.engine.updater();
        updater.on_source_file_added(&file).unwrap();
        updater.finish_update(&self.program).unwrap();
        file
    }

    fn file(&self, name: &str) -> Arc<SourceFile> {
        self.program.get_source_file(name).cloned().expect("file")
    }

    fn declaration(&self, file_name: &str, name: &str) -> NodeIndex {
        node_at(&self.file(file_name), name, 0, SyntaxKind::VariableDeclaration)
    }

    fn type_of(&mut self, file_name: &str, name: &str) -> String {
        let file = self.file(file_name);
        let node = self.declaration(file_name, name);
        let ty = self.engine.get_type_information(&self.program, &file, node);
        self.engine.format_type(ty)
    }

    fn memo(&self, file_name: &str, name: &str) -> Option<Option<TypeInfoId>> {
        let file = self.file(file_name);
        let id = file.arena().id(self.declaration(file_name, name));
        let symbol = self.engine.cached_symbol(id)?;
        self.engine.types().symbol_memo(symbol)
    }
}

#[test]
fn new_assignment_recomputes_the_declaration_eagerly() {
    let mut fixture = Fixture::new(&[("a.js", "var a = 1; var b = a;")]);
    assert_eq!(fixture.type_of("a.js", "b"), "number");

    fixture.add("c.js", "b = 's';");

    // The cascade already folded the new assignment into b's memo.
    let memo = fixture.memo("a.js", "b").flatten().expect("b was recomputed");
    assert!(fixture.engine.types().members(memo).contains(&TypeInfoId::STRING));
    assert_eq!(fixture.type_of("a.js", "b"), "(number | string)");
}

#[test]
fn changes_propagate_along_references() {
    let mut fixture = Fixture::new(&[("a.js", "var a; var b = a; var c = b;")]);
    assert_eq!(fixture.type_of("a.js", "c"), "undefined");

    fixture.add("d.js", "a = true;");
    assert_eq!(fixture.memo("a.js", "a"), Some(Some(TypeInfoId::BOOLEAN)));
    assert_eq!(fixture.type_of("a.js", "c"), "boolean");
}

#[test]
fn cycles_terminate() {
    let mut fixture = Fixture::new(&[("a.js", "var a = b; var b = a;")]);
    assert_eq!(fixture.type_of("a.js", "a"), "undefined");
    assert_eq!(fixture.type_of("a.js", "b"), "undefined");

    fixture.add("c.js", "a = 1;");
    assert_eq!(fixture.type_of("a.js", "a"), "number");
    assert_eq!(fixture.type_of("a.js", "b"), "number");
}

#[test]
fn uncomputed_declarations_stay_lazy() {
    let mut fixture = Fixture::new(&[("a.js", "var a = 1; var b = a;")]);
    fixture.add("c.js", "b = 's';");
    assert_eq!(fixture.engine.cached_symbol_count(), 0);
    assert_eq!(fixture.type_of("a.js", "b"), "(number | string)");
}

#[test]
fn nothing_pending_recomputes_nothing() {
    let mut fixture = Fixture::new(&[("a.js", "var a = 1; var b = a;")]);
    assert_eq!(fixture.type_of("a.js", "b"), "number");
    let program = fixture.program.clone();
    assert_eq!(fixture.engine.process_pending_updates(&program), 0);
}

#[test]
fn unchanged_types_stop_the_cascade() {
    let mut fixture = Fixture::new(&[("a.js", "var a = 1; var b = a;")]);
    assert_eq!(fixture.type_of("a.js", "b"), "number");
    let before = fixture.memo("a.js", "b");

    // `a` gains a number it already had; `b` keeps its memo.
    fixture.add("c.js", "a = 2;");
    assert_eq!(fixture.memo("a.js", "a"), Some(Some(TypeInfoId::NUMBER)));
    assert_eq!(fixture.memo("a.js", "b"), before);
}
