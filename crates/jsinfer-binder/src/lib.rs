//! Binder for the jsinfer inference engine.
//!
//! - `SourceFile` - a parsed file plus its one-shot binder slot
//! - `BinderState` - scopes, value symbols and the declaration node → symbol map
//! - `ValueSymbol` - the view of a declared value the incremental updater diffs

pub mod symbols;
pub use symbols::{Symbol, SymbolArena, SymbolId, ValueSymbol, symbol_flags};

mod scopes;
pub use scopes::{Scope, ScopeId, ScopeKind};

mod state;
pub use state::{BinderState, FxIndexMap};

mod source_file;
pub use source_file::{SourceFile, bind_source_file};
