use super::*;
use crate::recursion::RecursionResult;
use jsinfer_common::NodeId;
use std::sync::Arc;

/// Each mock declaration resolves the symbols it lists (eagerly) and unions
/// the results with its own initializer type.
struct Mock {
    types: TypeArena,
    guard: RecursionGuard<TypeInfoId>,
    symbols: Vec<TypeInfoId>,
    initializers: Vec<Option<TypeInfoId>>,
    reads: Vec<Vec<usize>>,
    computations: usize,
}

impl Mock {
    fn new() -> Mock {
        Mock {
            types: TypeArena::new(),
            guard: RecursionGuard::new(),
            symbols: Vec::new(),
            initializers: Vec::new(),
            reads: Vec::new(),
            computations: 0,
        }
    }

    fn declare(&mut self, initializer: Option<TypeInfoId>, reads: Vec<usize>) -> TypeInfoId {
        let node = NodeId(self.symbols.len() as u32 + 1);
        let symbol = self
            .types
            .create_symbol(DeclarationRef::new(Arc::from("mock.js"), node));
        self.symbols.push(symbol);
        self.initializers.push(initializer);
        self.reads.push(reads);
        symbol
    }
}

impl SymbolTypeResolver for Mock {
    fn types(&self) -> &TypeArena {
        &self.types
    }

    fn types_mut(&mut self) -> &mut TypeArena {
        &mut self.types
    }

    fn resolution_guard(&mut self) -> &mut RecursionGuard<TypeInfoId> {
        &mut self.guard
    }

    fn compute_symbol_type(
        &mut self,
        _symbol: TypeInfoId,
        declaration: &DeclarationRef,
    ) -> Option<TypeInfoId> {
        self.computations += 1;
        let index = declaration.node.0 as usize - 1;
        let mut ty = self.initializers[index];
        for read in self.reads[index].clone() {
            let symbol = self.symbols[read];
            let read_type = resolve_symbol_type(self, symbol);
            ty = self.types.union(ty, read_type);
        }
        ty
    }
}

#[test]
fn test_resolution_is_memoized() {
    let mut mock = Mock::new();
    let x = mock.declare(Some(TypeInfoId::NUMBER), vec![]);
    assert_eq!(resolve_symbol_type(&mut mock, x), Some(TypeInfoId::NUMBER));
    assert_eq!(resolve_symbol_type(&mut mock, x), Some(TypeInfoId::NUMBER));
    assert_eq!(mock.computations, 1);
    assert!(mock.types.has_type(x));
}

#[test]
fn test_no_information_is_memoized_too() {
    let mut mock = Mock::new();
    let x = mock.declare(None, vec![]);
    assert_eq!(resolve_symbol_type(&mut mock, x), None);
    assert_eq!(resolve_symbol_type(&mut mock, x), None);
    assert_eq!(mock.computations, 1);
    assert!(mock.types.has_type(x));
}

#[test]
fn test_clear_forces_recomputation() {
    let mut mock = Mock::new();
    let x = mock.declare(Some(TypeInfoId::NUMBER), vec![]);
    resolve_symbol_type(&mut mock, x);
    mock.initializers[0] = Some(TypeInfoId::STRING);
    mock.types.clear_symbol_type(x);
    assert_eq!(resolve_symbol_type(&mut mock, x), Some(TypeInfoId::STRING));
    assert_eq!(mock.computations, 2);
}

#[test]
fn test_self_reference_yields_no_information() {
    let mut mock = Mock::new();
    let x = mock.declare(None, vec![0]);
    assert_eq!(resolve_symbol_type(&mut mock, x), None);
    // Nothing is left in progress.
    assert_eq!(mock.guard.enter(x), RecursionResult::Entered);
    mock.guard.leave(x);
}

#[test]
fn test_mutual_reference_terminates() {
    let mut mock = Mock::new();
    let a = mock.declare(Some(TypeInfoId::NUMBER), vec![1]);
    let _b = mock.declare(Some(TypeInfoId::STRING), vec![0]);
    // `b` sees `a` as in progress, so only its own initializer survives.
    assert_eq!(
        resolve_symbol_type(&mut mock, a),
        Some(TypeInfoId::STRING_OR_NUMBER)
    );
    assert_eq!(mock.types.symbol_memo(mock.symbols[1]), Some(Some(TypeInfoId::STRING)));
}

#[test]
fn test_exhausted_budget_yields_no_information() {
    let mut mock = Mock::new();
    mock.guard = RecursionGuard::with_budget(2);
    let a = mock.declare(Some(TypeInfoId::NUMBER), vec![1]);
    mock.declare(Some(TypeInfoId::NUMBER), vec![2]);
    mock.declare(Some(TypeInfoId::STRING), vec![]);
    // The third link is cut off and stays unresolved.
    assert_eq!(resolve_symbol_type(&mut mock, a), Some(TypeInfoId::NUMBER));
    assert_eq!(mock.types.symbol_memo(mock.symbols[2]), None);
}

#[test]
fn test_non_symbol_resolves_to_nothing() {
    let mut mock = Mock::new();
    assert_eq!(resolve_symbol_type(&mut mock, TypeInfoId::NUMBER), None);
    assert_eq!(mock.computations, 0);
}
