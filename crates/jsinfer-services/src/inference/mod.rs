//! The inference engine.
//!
//! Owns the type arena and the declaration → Symbol cache. A query refreshes
//! the reference tracker, cascades recomputation through declarations whose
//! inputs changed, then infers and evaluates the requested node. Edits reach
//! the engine through an `EngineUpdater` transaction.

mod cascade;
mod declarations;
mod expressions;
mod matching;
mod updater;

pub use matching::{declarations_match, nodes_match};
pub use updater::{EngineUpdater, UpdateTransaction};

use crate::config::EngineConfig;
use crate::program::Program;
use crate::reference_manager::ReferenceManager;
use crate::references::ReferenceTracker;
use jsinfer_binder::SourceFile;
use jsinfer_common::{DeclarationRef, NodeId};
use jsinfer_parser::NodeIndex;
use jsinfer_solver::{Evaluator, RecursionGuard, SymbolTypeResolver, TypeArena, TypeInfoId};
use rustc_hash::FxHashMap;
use tracing::debug;

pub struct InferenceEngine<R: ReferenceTracker = ReferenceManager> {
    config: EngineConfig,
    types: TypeArena,
    /// Declaration node → the Symbol type of that declaration.
    declaration_types: FxHashMap<NodeId, TypeInfoId>,
    references: R,
}

impl InferenceEngine<ReferenceManager> {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_reference_tracker(config, ReferenceManager::new())
    }
}

impl Default for InferenceEngine<ReferenceManager> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ReferenceTracker> InferenceEngine<R> {
    pub fn with_reference_tracker(config: EngineConfig, references: R) -> Self {
        InferenceEngine {
            config,
            types: TypeArena::new(),
            declaration_types: FxHashMap::default(),
            references,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start an edit transaction.
    pub fn updater(&mut self) -> EngineUpdater<'_, R> {
        EngineUpdater::new(self)
    }

    /// The evaluated type of `node` in `file`, or `None` when nothing is
    /// known about it.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %file.file_name(), ?node))]
    pub fn get_type_information(
        &mut self,
        program: &Program,
        file: &SourceFile,
        node: NodeIndex,
    ) -> Option<TypeInfoId> {
        let budget = self.config.evaluation_budget;
        let affected = self.references.update_references(program);
        let mut context = self.context(program);
        context.process_updates(&affected);

        let ty = context.type_of_node(file, node);
        let evaluated = Evaluator::with_budget(&mut context, budget).evaluate(ty);
        debug!(?ty, ?evaluated, "type information");
        evaluated
    }

    /// Refresh the reference tracker and run the cascade without querying.
    /// Returns the number of declarations recomputed.
    pub fn process_pending_updates(&mut self, program: &Program) -> usize {
        let affected = self.references.update_references(program);
        if affected.is_empty() {
            return 0;
        }
        self.context(program).process_updates(&affected)
    }

    pub fn types(&self) -> &TypeArena {
        &self.types
    }

    pub fn format_type(&self, ty: Option<TypeInfoId>) -> String {
        self.types.format_type(ty)
    }

    pub fn reference_tracker(&self) -> &R {
        &self.references
    }

    /// Number of declarations with a cached Symbol.
    pub fn cached_symbol_count(&self) -> usize {
        self.declaration_types.len()
    }

    pub fn cached_symbol(&self, declaration: NodeId) -> Option<TypeInfoId> {
        self.declaration_types.get(&declaration).copied()
    }

    /// Whether the Symbol cached for `declaration` has a memoized type.
    pub fn has_cached_type(&self, declaration: NodeId) -> bool {
        self.cached_symbol(declaration)
            .is_some_and(|symbol| self.types.has_type(symbol))
    }

    pub fn symbol_declaration(&self, symbol: TypeInfoId) -> Option<&DeclarationRef> {
        self.types.symbol_declaration(symbol)
    }

    fn context<'a>(&'a mut self, program: &'a Program) -> InferenceContext<'a, R> {
        InferenceContext {
            types: &mut self.types,
            declaration_types: &mut self.declaration_types,
            references: &self.references,
            program,
            resolution_guard: RecursionGuard::new(),
        }
    }
}

/// Engine state borrowed for one query or cascade.
pub(crate) struct InferenceContext<'a, R> {
    types: &'a mut TypeArena,
    declaration_types: &'a mut FxHashMap<NodeId, TypeInfoId>,
    references: &'a R,
    program: &'a Program,
    resolution_guard: RecursionGuard<TypeInfoId>,
}

impl<R: ReferenceTracker> SymbolTypeResolver for InferenceContext<'_, R> {
    fn types(&self) -> &TypeArena {
        &*self.types
    }

    fn types_mut(&mut self) -> &mut TypeArena {
        &mut *self.types
    }

    fn resolution_guard(&mut self) -> &mut RecursionGuard<TypeInfoId> {
        &mut self.resolution_guard
    }

    fn compute_symbol_type(
        &mut self,
        symbol: TypeInfoId,
        declaration: &DeclarationRef,
    ) -> Option<TypeInfoId> {
        self.compute_declaration_type(symbol, declaration)
    }
}

#[cfg(test)]
#[path = "../../tests/inference_tests.rs"]
mod inference_tests;

#[cfg(test)]
#[path = "../../tests/cascade_tests.rs"]
mod cascade_tests;
