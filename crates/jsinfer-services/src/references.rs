//! Reference tracking contract.
//!
//! A reference is an identifier node, a declaration is a `DeclarationRef`.
//! The tracker maps each reference to the declaration it resolves to and
//! each declaration back to its references, grouped by the file they occur
//! in. The inference engine only consumes this contract; `ReferenceManager`
//! is the default implementation.

use crate::program::Program;
use indexmap::IndexSet;
use jsinfer_binder::{FxIndexMap, SourceFile, ValueSymbol};
use jsinfer_common::{DeclarationRef, NodeId};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;

pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Referencing identifiers grouped by the file they occur in.
pub type FileReferences = FxIndexMap<Arc<str>, FxIndexSet<NodeId>>;

/// Both directions of the reference relation for one file.
#[derive(Clone, Debug, Default)]
pub struct BidirectionalReferences {
    /// Identifier in this file → the declaration it resolves to.
    pub reference_to_declaration: FxIndexMap<NodeId, DeclarationRef>,
    /// Declaration in this file → every identifier referring to it.
    pub declaration_to_references: FxIndexMap<NodeId, FileReferences>,
}

/// What one updater transaction changed.
#[derive(Clone, Debug, Default)]
pub struct ProgramChange {
    pub removed_files: Vec<Arc<SourceFile>>,
    pub added_files: Vec<Arc<SourceFile>>,
    /// `(old, new)` versions of updated files.
    pub updated_files: Vec<(Arc<SourceFile>, Arc<SourceFile>)>,
    pub removed_symbols: Vec<ValueSymbol>,
    pub added_symbols: Vec<ValueSymbol>,
}

impl ProgramChange {
    pub fn is_empty(&self) -> bool {
        self.removed_files.is_empty()
            && self.added_files.is_empty()
            && self.updated_files.is_empty()
            && self.removed_symbols.is_empty()
            && self.added_symbols.is_empty()
    }
}

pub trait ReferenceTracker {
    /// Refresh bindings against `program`, returning per file the references
    /// whose resolution may have changed since the last refresh.
    fn update_references(&mut self, program: &Program) -> FileReferences;

    /// The tracked references of `file_name`, or `None` if the file has none.
    fn bidirectional_references(&self, file_name: &str) -> Option<&BidirectionalReferences>;

    /// One-shot notification at the end of an updater transaction.
    fn on_after_program_created(&mut self, program: &Program, change: &ProgramChange);

    fn references_to_declaration(&self, declaration: &DeclarationRef) -> Option<&FileReferences> {
        self.bidirectional_references(&declaration.file_name)?
            .declaration_to_references
            .get(&declaration.node)
    }

    fn declaration_of(&self, file_name: &str, reference: NodeId) -> Option<&DeclarationRef> {
        self.bidirectional_references(file_name)?
            .reference_to_declaration
            .get(&reference)
    }
}
