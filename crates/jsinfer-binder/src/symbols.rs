//! Symbols and the arena that owns them.

use jsinfer_common::{DeclarationRef, NodeId};
use jsinfer_parser::NodeIndex;
use jsinfer_scanner::SyntaxKind;
use std::sync::Arc;

pub mod symbol_flags {
    pub const NONE: u32 = 0;
    pub const FUNCTION_SCOPED_VARIABLE: u32 = 1 << 0;
    pub const BLOCK_SCOPED_VARIABLE: u32 = 1 << 1;
    pub const PARAMETER: u32 = 1 << 2;
    pub const PROPERTY: u32 = 1 << 3;
    pub const FUNCTION: u32 = 1 << 4;

    pub const VARIABLE: u32 = FUNCTION_SCOPED_VARIABLE | BLOCK_SCOPED_VARIABLE;
    pub const VALUE: u32 = VARIABLE | PARAMETER | PROPERTY | FUNCTION;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

#[derive(Clone, Debug)]
pub struct Symbol {
    pub flags: u32,
    pub escaped_name: String,
    /// Every declaration merged into this symbol, in source order.
    pub declarations: Vec<NodeIndex>,
    /// The first declaration.
    pub value_declaration: NodeIndex,
    pub value_declaration_id: NodeId,
}

impl Symbol {
    #[inline]
    pub fn has_flags(&self, flags: u32) -> bool {
        self.flags & flags != 0
    }
}

#[derive(Clone, Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> SymbolArena {
        SymbolArena::default()
    }

    pub fn alloc(&mut self, flags: u32, name: String) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            flags,
            escaped_name: name,
            declarations: Vec::new(),
            value_declaration: NodeIndex::NONE,
            value_declaration_id: NodeId::NONE,
        });
        id
    }

    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| (SymbolId(i as u32), symbol))
    }
}

/// A declared value as seen across files: its name, where its value
/// declaration lives and that declaration's syntax kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValueSymbol {
    pub name: Arc<str>,
    pub declaration: DeclarationRef,
    pub kind: SyntaxKind,
}

impl ValueSymbol {
    #[inline]
    pub fn file_name(&self) -> &str {
        &self.declaration.file_name
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.declaration.node
    }
}
