use super::*;
use crate::intern::TypeArena;
use jsinfer_common::{DeclarationRef, NodeId};
use std::sync::Arc;

/// Mock declarations whose computed type is given up front (and may itself
/// contain symbols, deferred for the evaluator).
struct Mock {
    types: TypeArena,
    guard: RecursionGuard<TypeInfoId>,
    computed: Vec<Option<TypeInfoId>>,
}

impl Mock {
    fn new() -> Mock {
        Mock {
            types: TypeArena::new(),
            guard: RecursionGuard::new(),
            computed: Vec::new(),
        }
    }

    fn declare(&mut self) -> TypeInfoId {
        self.computed.push(None);
        let node = NodeId(self.computed.len() as u32);
        self.types
            .create_symbol(DeclarationRef::new(Arc::from("mock.js"), node))
    }

    fn define(&mut self, symbol: TypeInfoId, ty: Option<TypeInfoId>) {
        let node = self.types.symbol_declaration(symbol).map(|d| d.node).expect("symbol");
        self.computed[node.0 as usize - 1] = ty;
    }

    fn evaluate(&mut self, ty: Option<TypeInfoId>) -> Option<TypeInfoId> {
        evaluate_type(self, ty)
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
        declaration: &jsinfer_common::DeclarationRef,
    ) -> Option<TypeInfoId> {
        self.computed[declaration.node.0 as usize - 1]
    }
}

#[test]
fn test_absent_and_primitive() {
    let mut mock = Mock::new();
    assert_eq!(mock.evaluate(None), None);
    assert_eq!(mock.evaluate(Some(TypeInfoId::BOOLEAN)), Some(TypeInfoId::BOOLEAN));
}

#[test]
fn test_unchanged_union_keeps_identity() {
    let mut mock = Mock::new();
    let union = mock.types.union(Some(TypeInfoId::BOOLEAN), Some(TypeInfoId::STRING));
    let before = mock.types.len();
    assert_eq!(mock.evaluate(union), union);
    assert_eq!(mock.types.len(), before);
}

#[test]
fn test_union_rebuilt_from_evaluated_constituents() {
    let mut mock = Mock::new();
    let x = mock.declare();
    mock.define(x, Some(TypeInfoId::NUMBER));
    let union = mock.types.union(Some(x), Some(TypeInfoId::STRING));
    assert_eq!(mock.evaluate(union), Some(TypeInfoId::STRING_OR_NUMBER));
}

#[test]
fn test_union_constituent_evaluating_to_union_is_flattened() {
    let mut mock = Mock::new();
    let x = mock.declare();
    let boolean_or_number = mock.types.union(Some(TypeInfoId::BOOLEAN), Some(TypeInfoId::NUMBER));
    mock.define(x, boolean_or_number);
    let union = mock.types.union(Some(x), Some(TypeInfoId::STRING));

    let result = mock.evaluate(union).expect("union");
    assert_eq!(
        mock.types.members(result),
        &[TypeInfoId::BOOLEAN, TypeInfoId::NUMBER, TypeInfoId::STRING]
    );
}

#[test]
fn test_union_constituent_without_information_is_dropped() {
    let mut mock = Mock::new();
    let x = mock.declare();
    let union = mock.types.union(Some(x), Some(TypeInfoId::STRING));
    assert_eq!(mock.evaluate(union), Some(TypeInfoId::STRING));
}

#[test]
fn test_additive_rules() {
    let mut mock = Mock::new();
    let x = mock.declare();
    let y = mock.declare();
    let unknown = mock.declare();
    mock.define(x, Some(TypeInfoId::NUMBER));
    mock.define(y, Some(TypeInfoId::NUMBER));

    let numbers = mock.types.plus(Some(x), Some(y));
    assert_eq!(mock.evaluate(numbers), Some(TypeInfoId::NUMBER));

    let with_string = mock.types.plus(Some(x), Some(TypeInfoId::STRING));
    assert_eq!(mock.evaluate(with_string), Some(TypeInfoId::STRING));

    let booleans = mock.types.plus(Some(TypeInfoId::BOOLEAN), Some(TypeInfoId::BOOLEAN));
    assert_eq!(mock.evaluate(booleans), Some(TypeInfoId::STRING));

    let partly_unknown = mock.types.plus(Some(x), Some(unknown));
    assert_eq!(mock.evaluate(partly_unknown), Some(TypeInfoId::STRING_OR_NUMBER));
}

#[test]
fn test_symbol_chain() {
    let mut mock = Mock::new();
    let a = mock.declare();
    let b = mock.declare();
    mock.define(a, Some(b));
    mock.define(b, Some(TypeInfoId::STRING));
    assert_eq!(mock.evaluate(Some(a)), Some(TypeInfoId::STRING));
}

#[test]
fn test_self_referential_symbol_yields_no_information() {
    let mut mock = Mock::new();
    let x = mock.declare();
    mock.define(x, Some(x));
    assert_eq!(mock.evaluate(Some(x)), None);
}

#[test]
fn test_mutually_referential_symbols_terminate() {
    let mut mock = Mock::new();
    let a = mock.declare();
    let b = mock.declare();
    let b_or_number = mock.types.union(Some(b), Some(TypeInfoId::NUMBER));
    mock.define(a, b_or_number);
    mock.define(b, Some(a));
    assert_eq!(mock.evaluate(Some(a)), Some(TypeInfoId::NUMBER));
    assert_eq!(mock.evaluate(Some(b)), Some(TypeInfoId::NUMBER));
}

#[test]
fn test_cut_symbols_are_not_remembered() {
    let mut mock = Mock::new();
    let a = mock.declare();
    let b = mock.declare();
    let b_or_number = mock.types.union(Some(b), Some(TypeInfoId::NUMBER));
    mock.define(a, b_or_number);
    mock.define(b, Some(a));

    // While `a` was in progress `b` saw nothing; asked directly it sees `a`.
    let mut evaluator = Evaluator::new(&mut mock);
    assert_eq!(evaluator.evaluate(Some(a)), Some(TypeInfoId::NUMBER));
    assert_eq!(evaluator.evaluate(Some(b)), Some(TypeInfoId::NUMBER));
}

#[test]
fn test_long_chain_evaluates_to_its_root() {
    let mut mock = Mock::new();
    let mut previous = Some(TypeInfoId::NUMBER);
    for _ in 0..10_000 {
        let symbol = mock.declare();
        mock.define(symbol, previous);
        previous = Some(symbol);
    }
    assert_eq!(mock.evaluate(previous), Some(TypeInfoId::NUMBER));
}

#[test]
fn test_shared_subgraphs_are_evaluated_once() {
    let mut mock = Mock::new();
    let (mut a, mut b) = (Some(TypeInfoId::NUMBER), Some(TypeInfoId::NUMBER));
    for _ in 0..40 {
        let next_a = mock.declare();
        let next_b = mock.declare();
        let either = mock.types.union(a, b);
        mock.define(next_a, either);
        mock.define(next_b, either);
        (a, b) = (Some(next_a), Some(next_b));
    }
    // Declared last, so it sorts after the diamond and is evaluated after it.
    let last = mock.declare();
    mock.define(last, Some(TypeInfoId::STRING));
    let top = mock.types.union(a, Some(last));

    // 81 symbols; walking every path would spend the budget before `last`.
    let result = Evaluator::with_budget(&mut mock, 200).evaluate(top);
    assert_eq!(result, Some(TypeInfoId::STRING_OR_NUMBER));
}

#[test]
fn test_budget_cuts_evaluation() {
    let mut mock = Mock::new();
    let a = mock.declare();
    let b = mock.declare();
    mock.define(a, Some(b));
    mock.define(b, Some(TypeInfoId::NUMBER));

    assert_eq!(Evaluator::with_budget(&mut mock, 1).evaluate(Some(a)), None);
    let result = Evaluator::with_budget(&mut mock, 2).evaluate(Some(a));
    assert_eq!(result, Some(TypeInfoId::NUMBER));
}
