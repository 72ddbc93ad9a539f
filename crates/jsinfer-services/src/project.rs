//! Project host: owns an engine and the current set of files.
//!
//! Every mutation runs as one updater transaction and rebuilds the program,
//! so queries always see a consistent snapshot.

use crate::config::EngineConfig;
use crate::inference::InferenceEngine;
use crate::program::Program;
use jsinfer_binder::SourceFile;
use jsinfer_common::{ContractViolation, TextChangeRange, TextSpan};
use jsinfer_parser::NodeIndex;
use jsinfer_solver::TypeInfoId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Replace the text covered by `span` with `new_text`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub span: TextSpan,
    pub new_text: String,
}

impl TextEdit {
    pub fn new(span: TextSpan, new_text: impl Into<String>) -> Self {
        TextEdit {
            span,
            new_text: new_text.into(),
        }
    }
}

/// Multi-file container driving an inference engine.
pub struct Project {
    engine: InferenceEngine,
    files: FxHashMap<String, Arc<SourceFile>>,
    /// File names in the order they were first added.
    order: Vec<String>,
    program: Program,
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl Project {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Project {
            engine: InferenceEngine::with_config(config),
            files: FxHashMap::default(),
            order: Vec::new(),
            program: Program::default(),
        }
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn file(&self, file_name: &str) -> Option<&Arc<SourceFile>> {
        self.files.get(file_name)
    }

    /// Add a file, or replace the whole text of an existing one.
    pub fn set_file(
        &mut self,
        file_name: String,
        source_text: String,
    ) -> Result<(), ContractViolation> {
        if let Some(old) = self.files.get(&file_name).cloned() {
            let (new, change) = old.replace_text(&source_text);
            return self.replace_file(old, new, change);
        }

        let file = Arc::new(SourceFile::parse(file_name.as_str(), source_text));
        let mut updater = self.engine.updater();
        updater.on_source_file_added(&file)?;
        self.order.push(file_name.clone());
        self.files.insert(file_name, file);
        self.program = build_program(&self.order, &self.files);
        updater.finish_update(&self.program)
    }

    /// Apply one edit to an existing file. Returns `Ok(false)` when the file
    /// is not part of the project.
    pub fn update_file(
        &mut self,
        file_name: &str,
        edit: &TextEdit,
    ) -> Result<bool, ContractViolation> {
        let Some(old) = self.files.get(file_name).cloned() else {
            return Ok(false);
        };
        let (new, change) = old.update(edit.span, &edit.new_text);
        self.replace_file(old, new, change)?;
        Ok(true)
    }

    /// Remove a file. Returns `Ok(false)` when the file is not part of the
    /// project.
    pub fn remove_file(&mut self, file_name: &str) -> Result<bool, ContractViolation> {
        let Some(file) = self.files.remove(file_name) else {
            return Ok(false);
        };
        self.order.retain(|name| name != file_name);
        self.program = build_program(&self.order, &self.files);

        let mut updater = self.engine.updater();
        updater.on_source_file_removed(&file)?;
        updater.finish_update(&self.program)?;
        Ok(true)
    }

    /// Evaluated type of the deepest node at `offset` in `file_name`.
    pub fn type_at(&mut self, file_name: &str, offset: u32) -> Option<TypeInfoId> {
        let file = Arc::clone(self.files.get(file_name)?);
        let node = file.tree().node_at_offset(offset);
        self.type_of_node(&file, node)
    }

    /// `type_at`, rendered for display.
    pub fn type_text_at(&mut self, file_name: &str, offset: u32) -> Option<String> {
        let ty = self.type_at(file_name, offset)?;
        Some(self.engine.format_type(Some(ty)))
    }

    pub fn type_of_node(&mut self, file: &SourceFile, node: NodeIndex) -> Option<TypeInfoId> {
        self.engine.get_type_information(&self.program, file, node)
    }

    fn replace_file(
        &mut self,
        old: Arc<SourceFile>,
        new: SourceFile,
        change: TextChangeRange,
    ) -> Result<(), ContractViolation> {
        let new = Arc::new(new);
        let mut updater = self.engine.updater();
        updater.on_before_source_file_updated(&old, change)?;
        updater.on_after_source_file_updated(&new, change)?;
        self.files.insert(new.file_name().to_string(), new);
        self.program = build_program(&self.order, &self.files);
        updater.finish_update(&self.program)
    }
}

fn build_program(order: &[String], files: &FxHashMap<String, Arc<SourceFile>>) -> Program {
    Program::new(order.iter().filter_map(|name| files.get(name).cloned()))
}

#[cfg(test)]
#[path = "../tests/project_tests.rs"]
mod project_tests;
