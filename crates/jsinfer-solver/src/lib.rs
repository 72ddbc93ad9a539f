//! Type algebra and evaluation for the jsinfer inference engine.
//!
//! - **Types**: `TypeInfoId` handles into a per-engine `TypeArena`. Primitives
//!   are singletons, unions and additive types are hash-consed, symbol types
//!   are identity values carrying a memoized result.
//! - **Lazy resolution**: `resolve_symbol_type` computes a symbol's type at
//!   most once per invalidation and cuts reentrant computation short.
//! - **Evaluation**: `Evaluator` resolves additive and symbol parts into
//!   concrete results, cycle-safe through its own symbol stack.

mod evaluate;
mod format;
mod intern;
pub mod recursion;
mod symbol;
pub mod types;

pub use evaluate::{Evaluator, evaluate_type};
pub use format::TypeDisplay;
pub use intern::TypeArena;
pub use recursion::{RecursionGuard, RecursionResult};
pub use symbol::{SymbolTypeResolver, resolve_symbol_type};
pub use types::{PrimitiveType, SymbolType, TypeData, TypeInfoId, TypeInfoKind, TypeList};
