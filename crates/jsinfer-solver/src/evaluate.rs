//! Evaluation of deferred type information into concrete results.
//!
//! Unions evaluate constituent-wise and are rebuilt only when something
//! changed. Additive types resolve to `number`, `string` or, when operands
//! remain unknown, `(number | string)`. Symbols evaluate their lazily
//! computed type; a symbol already on the evaluation stack yields no
//! information.
//!
//! Evaluation runs on an explicit frame stack, so reference chains of any
//! length stay off the native stack. A symbol whose evaluation never hit a
//! cycle is remembered for the rest of the evaluation, which keeps shared
//! subgraphs from being walked once per path.

use crate::recursion::{RecursionGuard, RecursionResult};
use crate::symbol::{SymbolTypeResolver, resolve_symbol_type};
use crate::types::{TypeData, TypeInfoId, TypeList};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// A compound type (or symbol) waiting for the result of one of its parts.
enum Frame {
    Union {
        union: TypeInfoId,
        members: TypeList,
        next: usize,
        /// Constituents collected so far, once some member changed.
        rebuilt: Option<TypeList>,
    },
    Additive {
        members: TypeList,
        next: usize,
        all_numbers: bool,
    },
    Symbol {
        symbol: TypeInfoId,
        cuts_at_entry: u64,
    },
}

enum Step {
    Start(Option<TypeInfoId>),
    Finish(Option<TypeInfoId>),
}

pub struct Evaluator<'a, R: SymbolTypeResolver + ?Sized> {
    resolver: &'a mut R,
    symbol_stack: RecursionGuard<TypeInfoId>,
    /// Symbols evaluated without a cycle or budget cut below them.
    finished: FxHashMap<TypeInfoId, Option<TypeInfoId>>,
    /// Number of cycle or budget cuts so far.
    cuts: u64,
}

impl<'a, R: SymbolTypeResolver + ?Sized> Evaluator<'a, R> {
    pub fn new(resolver: &'a mut R) -> Self {
        Self::with_guard(resolver, RecursionGuard::new())
    }

    /// An evaluator that gives up on symbols after `budget` symbol entries.
    pub fn with_budget(resolver: &'a mut R, budget: u32) -> Self {
        Self::with_guard(resolver, RecursionGuard::with_budget(budget))
    }

    fn with_guard(resolver: &'a mut R, symbol_stack: RecursionGuard<TypeInfoId>) -> Self {
        Evaluator {
            resolver,
            symbol_stack,
            finished: FxHashMap::default(),
            cuts: 0,
        }
    }

    pub fn evaluate(&mut self, ty: Option<TypeInfoId>) -> Option<TypeInfoId> {
        let mut frames = Vec::new();
        let mut step = Step::Start(ty);
        loop {
            step = match step {
                Step::Start(ty) => self.start(ty, &mut frames),
                Step::Finish(result) => match frames.pop() {
                    Some(frame) => self.resume(frame, result, &mut frames),
                    None => return result,
                },
            };
        }
    }

    fn start(&mut self, ty: Option<TypeInfoId>, frames: &mut Vec<Frame>) -> Step {
        let Some(ty) = ty else {
            return Step::Finish(None);
        };
        let Some(data) = self.resolver.types().get(ty) else {
            return Step::Finish(None);
        };
        match data {
            TypeData::Primitive(_) => Step::Finish(Some(ty)),
            TypeData::Union(members) => {
                let members = members.clone();
                let Some(&first) = members.first() else {
                    return Step::Finish(Some(ty));
                };
                frames.push(Frame::Union {
                    union: ty,
                    members,
                    next: 0,
                    rebuilt: None,
                });
                Step::Start(Some(first))
            }
            TypeData::Additive(members) => {
                let members = members.clone();
                let Some(&first) = members.first() else {
                    return Step::Finish(Some(TypeInfoId::STRING_OR_NUMBER));
                };
                frames.push(Frame::Additive {
                    members,
                    next: 0,
                    all_numbers: true,
                });
                Step::Start(Some(first))
            }
            TypeData::Symbol(_) => self.start_symbol(ty, frames),
        }
    }

    fn start_symbol(&mut self, symbol: TypeInfoId, frames: &mut Vec<Frame>) -> Step {
        if let Some(&result) = self.finished.get(&symbol) {
            return Step::Finish(result);
        }
        match self.symbol_stack.enter(symbol) {
            RecursionResult::Entered => {
                frames.push(Frame::Symbol {
                    symbol,
                    cuts_at_entry: self.cuts,
                });
                Step::Start(resolve_symbol_type(self.resolver, symbol))
            }
            RecursionResult::Cycle => {
                self.cuts += 1;
                trace!(?symbol, "symbol is already on the evaluation stack");
                Step::Finish(None)
            }
            RecursionResult::BudgetExhausted => {
                self.cuts += 1;
                debug!(?symbol, "evaluation budget exhausted");
                Step::Finish(None)
            }
        }
    }

    /// Feed `result` (the value of the frame's current part) back into `frame`.
    fn resume(
        &mut self,
        frame: Frame,
        result: Option<TypeInfoId>,
        frames: &mut Vec<Frame>,
    ) -> Step {
        match frame {
            Frame::Union {
                union,
                members,
                mut next,
                mut rebuilt,
            } => {
                if rebuilt.is_none() && result != Some(members[next]) {
                    rebuilt = Some(members[..next].iter().copied().collect());
                }
                if let Some(list) = rebuilt.as_mut() {
                    self.resolver.types().decompose_union_into(result, list);
                }
                next += 1;
                match members.get(next).copied() {
                    Some(member) => {
                        frames.push(Frame::Union {
                            union,
                            members,
                            next,
                            rebuilt,
                        });
                        Step::Start(Some(member))
                    }
                    // Nothing changed: keep the original instance.
                    None => Step::Finish(match rebuilt {
                        None => Some(union),
                        Some(list) => self.resolver.types_mut().union_from_types(list),
                    }),
                }
            }
            Frame::Additive {
                members,
                mut next,
                mut all_numbers,
            } => {
                match result {
                    Some(TypeInfoId::NUMBER) => {}
                    // Only a string survives `+` with an operand of any other type.
                    Some(_) => return Step::Finish(Some(TypeInfoId::STRING)),
                    None => all_numbers = false,
                }
                next += 1;
                match members.get(next).copied() {
                    Some(member) => {
                        frames.push(Frame::Additive {
                            members,
                            next,
                            all_numbers,
                        });
                        Step::Start(Some(member))
                    }
                    None if all_numbers => Step::Finish(Some(TypeInfoId::NUMBER)),
                    None => Step::Finish(Some(TypeInfoId::STRING_OR_NUMBER)),
                }
            }
            Frame::Symbol {
                symbol,
                cuts_at_entry,
            } => {
                self.symbol_stack.leave(symbol);
                // A cut below this symbol depends on what was on the stack.
                if self.cuts == cuts_at_entry {
                    self.finished.insert(symbol, result);
                }
                Step::Finish(result)
            }
        }
    }
}

/// Evaluate `ty` with a fresh evaluation stack.
pub fn evaluate_type<R>(resolver: &mut R, ty: Option<TypeInfoId>) -> Option<TypeInfoId>
where
    R: SymbolTypeResolver + ?Sized,
{
    Evaluator::new(resolver).evaluate(ty)
}

#[cfg(test)]
#[path = "../tests/evaluate_tests.rs"]
mod evaluate_tests;
