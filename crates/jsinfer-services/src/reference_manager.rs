//! Default reference tracker.
//!
//! Identifiers resolve through the scopes of their own file first, then to
//! the file-level declarations of the other program files in program order.
//! A declaration's own name is a reference to that declaration; object
//! literal property names are not references.
//!
//! Files are rescanned lazily by `update_references`:
//! - files that are new, or whose `SourceFile` object changed
//! - files holding references into a file that changed or went away
//! - files mentioning a name whose global or added/removed declaration
//!   changed
//!
//! The reverse direction (declaration → references) is rebuilt after every
//! rescan, together with a file-level dependents graph used to find the
//! files holding references into a changed file.
//!
//! A reference that disappears (its file was removed, or its node did not
//! survive a reparse) can no longer be reported itself. The declaration it
//! resolved to is reported through that declaration's own name instead, so
//! whatever the reference contributed gets recomputed away.

use crate::program::Program;
use crate::references::{
    BidirectionalReferences, FileReferences, FxIndexSet, ProgramChange, ReferenceTracker,
};
use jsinfer_binder::{BinderState, FxIndexMap, SourceFile, SymbolId};
use jsinfer_common::{DeclarationRef, NodeId};
use jsinfer_parser::NodeIndex;
use jsinfer_scanner::SyntaxKind;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug)]
struct FileIndex {
    /// The file object this index was built from.
    source: Arc<SourceFile>,
    references: BidirectionalReferences,
    /// Text of every identifier in the file, resolved or not.
    mentioned_names: FxHashSet<Arc<str>>,
}

#[derive(Debug, Default)]
pub struct ReferenceManager {
    files: FxIndexMap<Arc<str>, FileIndex>,
    /// File → files holding references into it.
    dependents: FxHashMap<Arc<str>, FxHashSet<Arc<str>>>,
    pending_files: FxIndexSet<Arc<str>>,
    pending_names: FxHashSet<Arc<str>>,
}

impl ReferenceManager {
    pub fn new() -> ReferenceManager {
        ReferenceManager::default()
    }

    pub fn tracked_file_count(&self) -> usize {
        self.files.len()
    }

    /// Files holding at least one reference into `file_name`.
    pub fn dependents_of(&self, file_name: &str) -> Vec<Arc<str>> {
        let mut dependents: Vec<_> = self
            .dependents
            .get(file_name)
            .map(|files| files.iter().cloned().collect())
            .unwrap_or_default();
        dependents.sort();
        dependents
    }

    fn scan_file(
        &self,
        file: &SourceFile,
        program: &Program,
    ) -> (FxIndexMap<NodeId, DeclarationRef>, FxHashSet<Arc<str>>) {
        let mut bindings = FxIndexMap::default();
        let mut mentioned_names = FxHashSet::default();
        let Some(binder) = file.binder() else {
            return (bindings, mentioned_names);
        };
        let arena = file.arena();

        let mut stack = vec![file.root()];
        while let Some(node) = stack.pop() {
            if arena.kind(node) == Some(SyntaxKind::Identifier)
                && let Some(name) = arena.identifier_text(node)
                && !name.is_empty()
                && !arena.is_property_name(node)
            {
                mentioned_names.insert(Arc::from(name));
                if let Some(declaration) = resolve_identifier(file, binder, node, name, program) {
                    bindings.insert(arena.id(node), declaration);
                }
            }
            let children = arena.children(node);
            stack.extend(children.into_iter().rev());
        }
        (bindings, mentioned_names)
    }

    /// Drop the indices of files no longer in `program` and return the files
    /// that must be rescanned, in program order, plus whether anything was
    /// dropped. Declarations that lost references through a dropped file are
    /// added to `orphaned`.
    fn files_to_rescan(
        &mut self,
        program: &Program,
        orphaned: &mut Vec<DeclarationRef>,
    ) -> (Vec<Arc<SourceFile>>, bool) {
        let mut rescan = std::mem::take(&mut self.pending_files);
        let mut names = std::mem::take(&mut self.pending_names);
        let mut changed: FxHashSet<Arc<str>> = FxHashSet::default();

        let removed: Vec<Arc<str>> = self
            .files
            .keys()
            .filter(|name| !program.contains(name))
            .cloned()
            .collect();
        let dropped = !removed.is_empty();
        for name in removed {
            if let Some(index) = self.files.shift_remove(&name) {
                names.extend(global_names(&index.source));
                orphaned.extend(
                    index
                        .references
                        .reference_to_declaration
                        .into_values()
                        .filter(|declaration| declaration.file_name != name),
                );
            }
            debug!(file = %name, "dropped references of removed file");
            changed.insert(name);
        }

        for file in program.source_files() {
            let name = file.file_name_arc();
            match self.files.get(&name) {
                Some(index) if Arc::ptr_eq(&index.source, file) => {}
                Some(index) => {
                    let old_globals = global_names(&index.source);
                    let new_globals = global_names(file);
                    names.extend(old_globals.symmetric_difference(&new_globals).cloned());
                    changed.insert(Arc::clone(&name));
                    rescan.insert(name);
                }
                None => {
                    names.extend(global_names(file));
                    rescan.insert(name);
                }
            }
        }

        for name in &changed {
            if let Some(dependents) = self.dependents.get(name) {
                rescan.extend(dependents.iter().cloned());
            }
        }
        if !names.is_empty() {
            for (file_name, index) in &self.files {
                if !index.mentioned_names.is_disjoint(&names) {
                    rescan.insert(Arc::clone(file_name));
                }
            }
        }

        let files = program
            .source_files()
            .iter()
            .filter(|file| rescan.contains(file.file_name()))
            .cloned()
            .collect();
        (files, dropped)
    }

    fn rebuild_reverse_index(&mut self, program: &Program) {
        // Keep the index in program order so reverse lists are deterministic.
        let mut ordered = FxIndexMap::default();
        for file in program.source_files() {
            if let Some((name, index)) = self.files.shift_remove_entry(file.file_name()) {
                ordered.insert(name, index);
            }
        }
        self.files = ordered;

        let mut edges = Vec::new();
        for (file_name, index) in &mut self.files {
            index.references.declaration_to_references.clear();
            for (&reference, declaration) in &index.references.reference_to_declaration {
                edges.push((declaration.clone(), Arc::clone(file_name), reference));
            }
        }

        self.dependents.clear();
        for (declaration, file_name, reference) in edges {
            let Some(target) = self.files.get_mut(&declaration.file_name) else {
                continue;
            };
            target
                .references
                .declaration_to_references
                .entry(declaration.node)
                .or_default()
                .entry(Arc::clone(&file_name))
                .or_default()
                .insert(reference);
            self.dependents
                .entry(Arc::clone(&declaration.file_name))
                .or_default()
                .insert(file_name);
        }
    }
}

impl ReferenceTracker for ReferenceManager {
    fn update_references(&mut self, program: &Program) -> FileReferences {
        let mut orphaned = Vec::new();
        let (rescan, dropped) = self.files_to_rescan(program, &mut orphaned);
        let mut affected = FileReferences::default();
        if rescan.is_empty() && !dropped {
            return affected;
        }

        for file in &rescan {
            let file_name = file.file_name_arc();
            let (bindings, mentioned_names) = self.scan_file(file, program);

            let mut changed = FxIndexSet::default();
            let old = self.files.get(&file_name);
            for (&reference, declaration) in &bindings {
                let previous = old
                    .and_then(|index| index.references.reference_to_declaration.get(&reference));
                if previous != Some(declaration) {
                    changed.insert(reference);
                }
            }
            // References that lost their resolution, or vanished entirely.
            if let Some(old) = old {
                for (&reference, declaration) in &old.references.reference_to_declaration {
                    if bindings.contains_key(&reference) {
                        continue;
                    }
                    if file.node_by_id(reference).is_some() {
                        changed.insert(reference);
                    } else {
                        orphaned.push(declaration.clone());
                    }
                }
            }

            trace!(
                file = %file_name,
                references = bindings.len(),
                changed = changed.len(),
                "rescanned references"
            );
            if !changed.is_empty() {
                affected.insert(Arc::clone(&file_name), changed);
            }
            self.files.insert(
                file_name,
                FileIndex {
                    source: Arc::clone(file),
                    references: BidirectionalReferences {
                        reference_to_declaration: bindings,
                        declaration_to_references: FxIndexMap::default(),
                    },
                    mentioned_names,
                },
            );
        }

        self.rebuild_reverse_index(program);
        for declaration in &orphaned {
            if let Some(name) = declaration_name_id(program, declaration) {
                affected
                    .entry(Arc::clone(&declaration.file_name))
                    .or_default()
                    .insert(name);
            }
        }
        debug!(
            rescanned = rescan.len(),
            orphaned = orphaned.len(),
            affected_files = affected.len(),
            "updated references"
        );
        affected
    }

    fn bidirectional_references(&self, file_name: &str) -> Option<&BidirectionalReferences> {
        let references = &self.files.get(file_name)?.references;
        (!references.reference_to_declaration.is_empty()
            || !references.declaration_to_references.is_empty())
        .then_some(references)
    }

    fn on_after_program_created(&mut self, _program: &Program, change: &ProgramChange) {
        for file in &change.added_files {
            self.pending_files.insert(file.file_name_arc());
        }
        for (_, new_file) in &change.updated_files {
            self.pending_files.insert(new_file.file_name_arc());
        }
        for symbol in change.removed_symbols.iter().chain(&change.added_symbols) {
            self.pending_names.insert(Arc::clone(&symbol.name));
        }
        trace!(
            pending_files = self.pending_files.len(),
            pending_names = self.pending_names.len(),
            "recorded program change"
        );
    }
}

fn resolve_identifier(
    file: &SourceFile,
    binder: &BinderState,
    node: NodeIndex,
    name: &str,
    program: &Program,
) -> Option<DeclarationRef> {
    let arena = file.arena();
    if arena.is_declaration_name(node) {
        let symbol = binder.symbol_of_declaration(arena.id(arena.parent(node)))?;
        return value_declaration(binder, symbol);
    }
    if let Some(symbol) = binder.resolve_name(arena, node, name) {
        return value_declaration(binder, symbol);
    }
    program
        .source_files()
        .iter()
        .filter(|other| other.file_name() != file.file_name())
        .find_map(|other| {
            let other_binder = other.binder()?;
            let &symbol = other_binder.file_locals().locals.get(name)?;
            value_declaration(other_binder, symbol)
        })
}

fn value_declaration(binder: &BinderState, symbol: SymbolId) -> Option<DeclarationRef> {
    let symbol = binder.symbols.get(symbol)?;
    symbol
        .value_declaration_id
        .is_some()
        .then(|| DeclarationRef::new(Arc::from(binder.file_name()), symbol.value_declaration_id))
}

/// The name identifier of a declaration still in `program`.
fn declaration_name_id(program: &Program, declaration: &DeclarationRef) -> Option<NodeId> {
    let file = program.get_source_file(&declaration.file_name)?;
    let arena = file.arena();
    let name = arena.declaration_name(file.node_by_id(declaration.node)?);
    (arena.kind(name) == Some(SyntaxKind::Identifier)).then(|| arena.id(name))
}

fn global_names(file: &SourceFile) -> FxHashSet<Arc<str>> {
    file.binder()
        .map(|binder| {
            binder
                .file_locals()
                .locals
                .keys()
                .map(|name| Arc::from(name.as_str()))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../tests/reference_manager_tests.rs"]
mod reference_manager_tests;
