//! Lexical scopes.

use crate::symbols::SymbolId;
use jsinfer_parser::NodeIndex;
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const FILE: ScopeId = ScopeId(0);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    SourceFile,
    /// Parameters, `var`s and everything declared directly in the body.
    Function,
    /// `let`, `const` and function declarations of a nested block.
    Block,
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub container: NodeIndex,
    pub locals: FxHashMap<String, SymbolId>,
}

impl Scope {
    pub(crate) fn new(kind: ScopeKind, parent: Option<ScopeId>, container: NodeIndex) -> Scope {
        Scope {
            kind,
            parent,
            container,
            locals: FxHashMap::default(),
        }
    }

    /// Function and file scopes receive `var` declarations.
    #[inline]
    pub fn is_function_scope(&self) -> bool {
        matches!(self.kind, ScopeKind::SourceFile | ScopeKind::Function)
    }
}
