//! Lazy, memoized, cycle-guarded symbol type resolution.

use crate::intern::TypeArena;
use crate::recursion::{RecursionGuard, RecursionResult};
use crate::types::TypeInfoId;
use jsinfer_common::DeclarationRef;
use tracing::{debug, trace};

/// Host side of symbol resolution: owns the arena, the in-progress set and
/// the rule that computes a declaration's type.
pub trait SymbolTypeResolver {
    fn types(&self) -> &TypeArena;

    fn types_mut(&mut self) -> &mut TypeArena;

    /// Symbols whose type is being computed right now.
    fn resolution_guard(&mut self) -> &mut RecursionGuard<TypeInfoId>;

    /// Compute the (possibly still deferred) type of `symbol`'s declaration.
    fn compute_symbol_type(
        &mut self,
        symbol: TypeInfoId,
        declaration: &DeclarationRef,
    ) -> Option<TypeInfoId>;
}

/// The type of a symbol: the memoized result if there is one, otherwise a
/// fresh computation that is memoized on the way out.
///
/// A symbol whose computation is already in progress yields no information
/// and memoizes nothing, which breaks self- and mutual recursion.
pub fn resolve_symbol_type<R>(resolver: &mut R, symbol: TypeInfoId) -> Option<TypeInfoId>
where
    R: SymbolTypeResolver + ?Sized,
{
    if let Some(memo) = resolver.types().symbol_memo(symbol) {
        return memo;
    }
    let declaration = resolver.types().symbol_declaration(symbol)?.clone();

    match resolver.resolution_guard().enter(symbol) {
        RecursionResult::Entered => {
            let ty = resolver.compute_symbol_type(symbol, &declaration);
            resolver.resolution_guard().leave(symbol);
            resolver.types_mut().set_symbol_memo(symbol, ty);
            trace!(?symbol, %declaration, ?ty, "computed symbol type");
            ty
        }
        RecursionResult::Cycle => {
            trace!(?symbol, %declaration, "symbol type is already being computed");
            None
        }
        denied => {
            debug!(?symbol, %declaration, ?denied, "symbol resolution budget exhausted");
            None
        }
    }
}

#[cfg(test)]
#[path = "../tests/symbol_tests.rs"]
mod symbol_tests;
