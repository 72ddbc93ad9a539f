//! Cascade of recomputation through the reference graph.
//!
//! Starting from the references whose resolution changed, every declaration
//! they flow into is recomputed; when its type differs from the memoized
//! one, the references to that declaration are processed next. Each
//! declaration is processed at most once per cascade, so reference cycles
//! converge.

use super::InferenceContext;
use super::declarations::declaration_ref_for;
use crate::references::{FileReferences, ReferenceTracker};
use jsinfer_binder::SourceFile;
use jsinfer_common::{DeclarationRef, NodeId};
use jsinfer_parser::is_variable_like_kind;
use jsinfer_scanner::{SyntaxKind, token_is_assignment_operator};
use jsinfer_solver::resolve_symbol_type;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::collections::VecDeque;
use tracing::{debug, trace};

impl<'a, R: ReferenceTracker> InferenceContext<'a, R> {
    /// Returns the number of declarations whose type was recomputed.
    pub(crate) fn process_updates(&mut self, affected: &FileReferences) -> usize {
        let references = self.references;
        let program = self.program;
        let mut processed: FxHashSet<DeclarationRef> = FxHashSet::default();
        let mut recomputed = 0;
        let mut queue: VecDeque<&FileReferences> = VecDeque::from([affected]);

        while let Some(batch) = queue.pop_front() {
            for (file_name, nodes) in batch {
                let Some(file) = program.get_source_file(file_name) else {
                    continue;
                };
                if references.bidirectional_references(file_name).is_none() {
                    continue;
                }
                for &reference in nodes {
                    for declaration in self.affected_declarations(file, reference, &processed) {
                        if !processed.insert(declaration.clone()) {
                            continue;
                        }
                        let Some(changed) = self.recompute_declaration(&declaration) else {
                            continue;
                        };
                        recomputed += 1;
                        if changed
                            && let Some(next) = references.references_to_declaration(&declaration)
                        {
                            queue.push_back(next);
                        }
                    }
                }
            }
        }

        if recomputed > 0 {
            debug!(processed = processed.len(), recomputed, "cascade finished");
        }
        recomputed
    }

    /// Declarations a reference flows into: the declaration it names, the
    /// targets of enclosing assignments and the enclosing variable-like
    /// declarations.
    fn affected_declarations(
        &self,
        file: &SourceFile,
        reference: NodeId,
        processed: &FxHashSet<DeclarationRef>,
    ) -> SmallVec<[DeclarationRef; 2]> {
        let mut affected = SmallVec::new();
        let Some(node) = file.node_by_id(reference) else {
            return affected;
        };
        let arena = file.arena();

        if arena.is_declaration_name(node)
            && let Some(declaration) = self.references.declaration_of(file.file_name(), reference)
            && !processed.contains(declaration)
        {
            affected.push(declaration.clone());
        }

        let mut current = arena.parent(node);
        while current.is_some() {
            let declaration = match (arena.get_binary(current), arena.kind(current)) {
                (Some(binary), _)
                    if token_is_assignment_operator(binary.operator)
                        && arena.kind(binary.left) == Some(SyntaxKind::Identifier) =>
                {
                    self.references
                        .declaration_of(file.file_name(), arena.id(binary.left))
                        .cloned()
                }
                (_, Some(kind)) if is_variable_like_kind(kind) => {
                    declaration_ref_for(file, current)
                }
                _ => None,
            };
            if let Some(declaration) = declaration
                && !processed.contains(&declaration)
                && !affected.contains(&declaration)
            {
                affected.push(declaration);
            }
            current = arena.parent(current);
        }
        affected
    }

    /// Clear and recompute a declaration with a memoized type. Returns
    /// `None` when there was nothing to recompute, otherwise whether the
    /// type changed.
    fn recompute_declaration(&mut self, declaration: &DeclarationRef) -> Option<bool> {
        let &symbol = self.declaration_types.get(&declaration.node)?;
        if !self.types.has_type(symbol) {
            return None;
        }
        let old = self.types.symbol_memo(symbol).flatten();
        self.types.clear_symbol_type(symbol);
        let new = resolve_symbol_type(self, symbol);

        let changed = old != new;
        if changed {
            debug!(%declaration, ?old, ?new, "declaration type changed");
        } else {
            trace!(%declaration, ?new, "declaration type unchanged");
        }
        Some(changed)
    }
}
