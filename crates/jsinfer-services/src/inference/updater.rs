//! Edit transactions.
//!
//! Between two `finish_update` calls each file takes part in exactly one
//! operation: it is added, removed, or updated through a before/after pair
//! with nothing else touching it in between. Breaking that contract is a
//! `ContractViolation`.
//!
//! An update diffs the value symbols of the old and new file. Declarations
//! that only exist on one side are paired up by structural matching; a pair
//! is the same logical declaration and keeps its cached Symbol (repointed at
//! the new node), everything else is a true removal or addition.

use super::InferenceEngine;
use super::matching::declarations_match;
use crate::program::Program;
use crate::references::{ProgramChange, ReferenceTracker};
use jsinfer_binder::{FxIndexMap, SourceFile, ValueSymbol, bind_source_file};
use jsinfer_common::{ContractViolation, NodeId, TextChangeRange};
use jsinfer_parser::{NodeIndex, is_expression_kind};
use jsinfer_scanner::SyntaxKind;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Everything one transaction has recorded so far.
#[derive(Debug, Default)]
pub struct UpdateTransaction {
    pub added_files: Vec<Arc<SourceFile>>,
    pub removed_files: Vec<Arc<SourceFile>>,
    /// `(old, new)` versions of updated files.
    pub updated_files: Vec<(Arc<SourceFile>, Arc<SourceFile>)>,
    pub added_symbols: Vec<ValueSymbol>,
    pub removed_symbols: Vec<ValueSymbol>,
    /// `(old, new)` declarations matched across an update.
    pub updated_symbols: Vec<(ValueSymbol, ValueSymbol)>,
    /// Old file of a before-update still waiting for its after-update.
    pending_update: Option<Arc<SourceFile>>,
}

impl UpdateTransaction {
    fn assert_only_operation(&self, file: &Arc<SourceFile>) -> Result<(), ContractViolation> {
        let file_name = || file.file_name().to_string();
        if self.added_files.iter().any(|f| Arc::ptr_eq(f, file)) {
            return Err(ContractViolation::FileAlreadyAdded {
                file_name: file_name(),
            });
        }
        if self.removed_files.iter().any(|f| Arc::ptr_eq(f, file)) {
            return Err(ContractViolation::FileAlreadyRemoved {
                file_name: file_name(),
            });
        }
        if self
            .updated_files
            .iter()
            .any(|(old, new)| Arc::ptr_eq(old, file) || Arc::ptr_eq(new, file))
        {
            return Err(ContractViolation::FileAlreadyUpdated {
                file_name: file_name(),
            });
        }
        Ok(())
    }
}

/// One open edit transaction against an engine. Dropping the updater
/// without calling `finish_update` discards what it recorded.
pub struct EngineUpdater<'e, R: ReferenceTracker> {
    engine: &'e mut InferenceEngine<R>,
    transaction: UpdateTransaction,
}

impl<'e, R: ReferenceTracker> EngineUpdater<'e, R> {
    pub(super) fn new(engine: &'e mut InferenceEngine<R>) -> Self {
        EngineUpdater {
            engine,
            transaction: UpdateTransaction::default(),
        }
    }

    pub fn transaction(&self) -> &UpdateTransaction {
        &self.transaction
    }

    pub fn engine(&self) -> &InferenceEngine<R> {
        self.engine
    }

    fn is_tracked(&self, file: &SourceFile) -> bool {
        self.engine.config.is_script_file(file.file_name())
    }

    pub fn on_source_file_added(
        &mut self,
        file: &Arc<SourceFile>,
    ) -> Result<(), ContractViolation> {
        if !self.is_tracked(file) {
            return Ok(());
        }
        self.transaction.assert_only_operation(file)?;
        if !file.is_bound() {
            bind_source_file(file)?;
        }
        let symbols = file.value_symbols()?;
        debug!(file = %file.file_name(), symbols = symbols.len(), "source file added");
        self.transaction.added_files.push(Arc::clone(file));
        self.transaction.added_symbols.extend(symbols);
        Ok(())
    }

    pub fn on_source_file_removed(
        &mut self,
        file: &Arc<SourceFile>,
    ) -> Result<(), ContractViolation> {
        if !self.is_tracked(file) {
            return Ok(());
        }
        self.transaction.assert_only_operation(file)?;
        let symbols = file.value_symbols()?;
        debug!(file = %file.file_name(), symbols = symbols.len(), "source file removed");
        self.transaction.removed_files.push(Arc::clone(file));
        self.transaction.removed_symbols.extend(symbols);
        Ok(())
    }

    /// Called with the file as it was before the edit described by `change`.
    /// Clears the cached types of every declaration referenced from the
    /// region around the edit.
    pub fn on_before_source_file_updated(
        &mut self,
        old_file: &Arc<SourceFile>,
        change: TextChangeRange,
    ) -> Result<(), ContractViolation> {
        if !self.is_tracked(old_file) {
            return Ok(());
        }
        if let Some(pending) = &self.transaction.pending_update {
            return Err(ContractViolation::OutstandingUpdate {
                pending: pending.file_name().to_string(),
                file_name: old_file.file_name().to_string(),
            });
        }
        self.transaction.pending_update = Some(Arc::clone(old_file));

        let root = invalidation_root(old_file, change);
        let cleared = self.clear_referenced_declarations(old_file, root);
        trace!(file = %old_file.file_name(), ?root, cleared, "cleared types around edit");
        Ok(())
    }

    /// Called with the reparsed file after `on_before_source_file_updated`.
    pub fn on_after_source_file_updated(
        &mut self,
        new_file: &Arc<SourceFile>,
        change: TextChangeRange,
    ) -> Result<(), ContractViolation> {
        if !self.is_tracked(new_file) {
            return Ok(());
        }
        let old_file = self.transaction.pending_update.take().ok_or_else(|| {
            ContractViolation::MissingBeforeUpdate {
                file_name: new_file.file_name().to_string(),
            }
        })?;
        if old_file.file_name() != new_file.file_name() {
            return Err(ContractViolation::UpdatedFileNameMismatch {
                expected: old_file.file_name().to_string(),
                actual: new_file.file_name().to_string(),
            });
        }
        self.transaction.assert_only_operation(&old_file)?;
        self.transaction.assert_only_operation(new_file)?;

        if Arc::ptr_eq(&old_file, new_file) {
            return Ok(());
        }

        // The old file must still carry its node → symbol map.
        let old_symbols = old_file.value_symbols()?;
        bind_source_file(new_file)?;
        let new_symbols = new_file.value_symbols()?;

        let (removed, added, updated) =
            diff_value_symbols(&old_file, old_symbols, new_file, new_symbols);
        debug!(
            file = %new_file.file_name(),
            ?change,
            removed = removed.len(),
            added = added.len(),
            updated = updated.len(),
            "source file updated"
        );

        self.transaction
            .updated_files
            .push((old_file, Arc::clone(new_file)));
        self.transaction.removed_symbols.extend(removed);
        self.transaction.added_symbols.extend(added);
        self.transaction.updated_symbols.extend(updated);
        Ok(())
    }

    /// Close the transaction: drop the Symbols of removed declarations, move
    /// the Symbols of updated ones to their new nodes, tell the reference
    /// tracker what changed, then bring references and the cascade up to
    /// date with `program`.
    pub fn finish_update(self, program: &Program) -> Result<(), ContractViolation> {
        let EngineUpdater {
            engine,
            transaction,
        } = self;
        if let Some(pending) = &transaction.pending_update {
            return Err(ContractViolation::UpdateNotFinished {
                file_name: pending.file_name().to_string(),
            });
        }

        for symbol in &transaction.removed_symbols {
            if let Some(ty) = engine.declaration_types.remove(&symbol.node()) {
                engine.types.clear_symbol_type(ty);
                trace!(
                    declaration = %symbol.declaration,
                    ?ty,
                    "deleted symbol of removed declaration"
                );
            }
        }
        for (old, new) in &transaction.updated_symbols {
            if let Some(ty) = engine.declaration_types.remove(&old.node()) {
                engine
                    .types
                    .set_symbol_declaration(ty, new.declaration.clone());
                engine.types.clear_symbol_type(ty);
                engine.declaration_types.insert(new.node(), ty);
                trace!(from = %old.declaration, to = %new.declaration, ?ty, "relocated symbol");
            }
        }

        let UpdateTransaction {
            added_files,
            removed_files,
            updated_files,
            added_symbols,
            removed_symbols,
            ..
        } = transaction;
        let change = ProgramChange {
            removed_files,
            added_files,
            updated_files,
            removed_symbols,
            added_symbols,
        };
        engine.references.on_after_program_created(program, &change);
        let recomputed = engine.process_pending_updates(program);
        debug!(
            added_files = change.added_files.len(),
            removed_files = change.removed_files.len(),
            updated_files = change.updated_files.len(),
            recomputed,
            "finished update"
        );
        Ok(())
    }

    /// Clear the memoized type of every declaration an identifier under
    /// `root` refers to.
    fn clear_referenced_declarations(&mut self, file: &SourceFile, root: NodeIndex) -> usize {
        let engine = &mut *self.engine;
        let Some(references) = engine.references.bidirectional_references(file.file_name()) else {
            return 0;
        };
        let arena = file.arena();
        let mut cleared = 0;
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if arena.kind(node) == Some(SyntaxKind::Identifier)
                && let Some(declaration) = references.reference_to_declaration.get(&arena.id(node))
                && let Some(&symbol) = engine.declaration_types.get(&declaration.node)
            {
                engine.types.clear_symbol_type(symbol);
                cleared += 1;
            }
            stack.extend(arena.children(node));
        }
        cleared
    }
}

/// The node whose identifiers may feed declarations affected by an edit: the
/// smallest node covering the edited range, widened through enclosing
/// expressions. The whole file when the edit is not inside any statement.
fn invalidation_root(file: &SourceFile, change: TextChangeRange) -> NodeIndex {
    let arena = file.arena();
    let tree = file.tree();
    let container = tree.covering_node(change.span.start, change.span.end());

    let mut current = arena.parent(container);
    while let Some(kind) = arena.kind(current)
        && is_expression_kind(kind)
    {
        current = arena.parent(current);
    }
    if current.is_none() {
        file.root()
    } else {
        current
    }
}

type SymbolsByKind = FxIndexMap<SyntaxKind, Vec<Option<ValueSymbol>>>;

/// Split the symbols of an updated file into removals, additions and matched
/// `(old, new)` updates. Symbols whose declaration node survived the reparse
/// are unchanged and appear nowhere.
fn diff_value_symbols(
    old_file: &SourceFile,
    old_symbols: Vec<ValueSymbol>,
    new_file: &SourceFile,
    new_symbols: Vec<ValueSymbol>,
) -> (Vec<ValueSymbol>, Vec<ValueSymbol>, Vec<(ValueSymbol, ValueSymbol)>) {
    let old_nodes: FxHashSet<NodeId> = old_symbols.iter().map(ValueSymbol::node).collect();
    let new_nodes: FxHashSet<NodeId> = new_symbols.iter().map(ValueSymbol::node).collect();

    let mut removed_by_kind = SymbolsByKind::default();
    for symbol in old_symbols {
        if !new_nodes.contains(&symbol.node()) {
            removed_by_kind
                .entry(symbol.kind)
                .or_default()
                .push(Some(symbol));
        }
    }
    let mut added_by_kind = SymbolsByKind::default();
    for symbol in new_symbols {
        if !old_nodes.contains(&symbol.node()) {
            added_by_kind.entry(symbol.kind).or_default().push(Some(symbol));
        }
    }

    let mut updated = Vec::new();
    for (kind, removed) in &mut removed_by_kind {
        let Some(added) = added_by_kind.get_mut(kind) else {
            continue;
        };
        for removed_slot in removed.iter_mut() {
            let Some(old) = removed_slot.as_ref() else {
                continue;
            };
            let matched = added.iter_mut().find(|slot| {
                slot.as_ref().is_some_and(|new| {
                    declarations_match(old_file, old.node(), new_file, new.node())
                })
            });
            if let Some(added_slot) = matched
                && let (Some(old), Some(new)) = (removed_slot.take(), added_slot.take())
            {
                updated.push((old, new));
            }
        }
    }

    let unmatched = |by_kind: SymbolsByKind| -> Vec<ValueSymbol> {
        by_kind.into_values().flatten().flatten().collect()
    };
    (unmatched(removed_by_kind), unmatched(added_by_kind), updated)
}

#[cfg(test)]
#[path = "../../tests/updater_tests.rs"]
mod updater_tests;
