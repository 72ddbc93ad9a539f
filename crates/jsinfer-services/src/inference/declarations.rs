//! Declaration types: the initializer plus everything flowing back from
//! references to the declaration.

use super::InferenceContext;
use crate::references::ReferenceTracker;
use jsinfer_binder::SourceFile;
use jsinfer_common::DeclarationRef;
use jsinfer_parser::{NodeIndex, is_declaration_kind, is_expression_kind};
use jsinfer_scanner::SyntaxKind;
use jsinfer_solver::TypeInfoId;
use tracing::trace;

impl<'a, R: ReferenceTracker> InferenceContext<'a, R> {
    /// Unevaluated type of the node a query asks about. Expressions are
    /// inferred, declarations yield their symbol, anything else yields no
    /// information.
    pub(crate) fn type_of_node(
        &mut self,
        file: &SourceFile,
        node: NodeIndex,
    ) -> Option<TypeInfoId> {
        let kind = file.arena().kind(node)?;
        if is_expression_kind(kind) {
            return self.infer_expression(file, node, None);
        }
        if is_declaration_kind(kind) {
            let declaration = declaration_ref_for(file, node)?;
            return Some(self.symbol_for_declaration(declaration));
        }
        None
    }

    /// Compute the type of `symbol`'s declaration. A symbol that is no longer
    /// cached for its declaration, or whose node left the program, has no
    /// information.
    pub(crate) fn compute_declaration_type(
        &mut self,
        symbol: TypeInfoId,
        declaration: &DeclarationRef,
    ) -> Option<TypeInfoId> {
        if self.declaration_types.get(&declaration.node) != Some(&symbol) {
            trace!(%declaration, ?symbol, "declaration is no longer cached");
            return None;
        }
        let program = self.program;
        let file = program.get_source_file(&declaration.file_name)?;
        let node = file.node_by_id(declaration.node)?;

        let mut ty = self.initial_declaration_type(file, node);

        let references = self.references;
        if let Some(by_file) = references.references_to_declaration(declaration) {
            for (file_name, nodes) in by_file {
                let Some(reference_file) = program.get_source_file(file_name) else {
                    continue;
                };
                for &reference in nodes {
                    let Some(reference_node) = reference_file.node_by_id(reference) else {
                        continue;
                    };
                    let flowed = self.infer_reference(reference_file, reference_node);
                    ty = self.types.union(ty, flowed);
                }
            }
        }
        ty
    }

    fn initial_declaration_type(
        &mut self,
        file: &SourceFile,
        node: NodeIndex,
    ) -> Option<TypeInfoId> {
        let arena = file.arena();
        match arena.kind(node)? {
            SyntaxKind::VariableDeclaration
            | SyntaxKind::BindingElement
            | SyntaxKind::Parameter
            | SyntaxKind::PropertyAssignment => {
                let initializer = arena.initializer(node);
                self.infer_expression(file, initializer, None)
            }
            // Functions only receive what flows back from assignments.
            SyntaxKind::FunctionDeclaration => None,
            kind => panic!("no declaration type rule for {kind:?}"),
        }
    }

    /// What a reference contributes to its declaration: the whole assignment
    /// when it is the target of one.
    fn infer_reference(&mut self, file: &SourceFile, node: NodeIndex) -> Option<TypeInfoId> {
        let arena = file.arena();
        let outer = arena.skip_outer_parentheses(node);
        let assignment = arena.assignment_target_of(outer)?;
        self.infer_expression(file, assignment, None)
    }
}

/// The value declaration of the symbol declared by `node`. Declarations
/// merged into an earlier one share its entry.
pub(crate) fn declaration_ref_for(file: &SourceFile, node: NodeIndex) -> Option<DeclarationRef> {
    let binder = file.binder()?;
    let symbol = binder.symbol_of_declaration(file.arena().id(node))?;
    let value_declaration = binder.symbols.get(symbol)?.value_declaration_id;
    value_declaration
        .is_some()
        .then(|| DeclarationRef::new(file.file_name_arc(), value_declaration))
}
