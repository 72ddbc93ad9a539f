//! Program: an immutable, ordered snapshot of the current source files.

use jsinfer_binder::SourceFile;
use rustc_hash::FxHashMap;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct Program {
    files: Vec<Arc<SourceFile>>,
    by_name: FxHashMap<Arc<str>, usize>,
}

impl Program {
    /// Build a program from `files`. A later file replaces an earlier one with
    /// the same name.
    pub fn new(files: impl IntoIterator<Item = Arc<SourceFile>>) -> Program {
        let mut program = Program::default();
        for file in files {
            let name = file.file_name_arc();
            match program.by_name.get(&name) {
                Some(&index) => program.files[index] = file,
                None => {
                    program.by_name.insert(name, program.files.len());
                    program.files.push(file);
                }
            }
        }
        program
    }

    pub fn source_files(&self) -> &[Arc<SourceFile>] {
        &self.files
    }

    pub fn get_source_file(&self, file_name: &str) -> Option<&Arc<SourceFile>> {
        self.by_name
            .get(file_name)
            .and_then(|&index| self.files.get(index))
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.by_name.contains_key(file_name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
