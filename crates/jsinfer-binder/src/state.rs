//! Binder state: walks a syntax tree once, creating scopes and value symbols.

use crate::scopes::{Scope, ScopeId, ScopeKind};
use crate::symbols::{SymbolArena, SymbolId, ValueSymbol, symbol_flags};
use indexmap::IndexMap;
use jsinfer_common::{DeclarationRef, NodeId};
use jsinfer_parser::{NodeArena, NodeData, NodeIndex, SyntaxTree};
use jsinfer_scanner::SyntaxKind;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::sync::Arc;
use tracing::trace;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// How a binding name being declared is scoped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BindingContext {
    Var,
    Block,
    Parameter,
}

#[derive(Debug)]
pub struct BinderState {
    file_name: Arc<str>,
    pub symbols: SymbolArena,
    scopes: Vec<Scope>,
    /// Scope introduced by a container node.
    node_scope_ids: FxHashMap<NodeIndex, ScopeId>,
    /// Declaration node id → symbol, in binding order.
    node_symbols: FxIndexMap<NodeId, SymbolId>,
    current_scope: ScopeId,
    binding_context: BindingContext,
}

impl BinderState {
    /// Bind every declaration of `tree`.
    pub fn bind(tree: &SyntaxTree) -> BinderState {
        let root = tree.root();
        let mut binder = BinderState {
            file_name: tree.file_name_arc(),
            symbols: SymbolArena::new(),
            scopes: vec![Scope::new(ScopeKind::SourceFile, None, root)],
            node_scope_ids: FxHashMap::default(),
            node_symbols: FxIndexMap::default(),
            current_scope: ScopeId::FILE,
            binding_context: BindingContext::Var,
        };
        binder.node_scope_ids.insert(root, ScopeId::FILE);

        let arena = tree.arena();
        for child in arena.children(root) {
            binder.bind_node(arena, child);
        }

        trace!(
            file = %binder.file_name,
            symbols = binder.symbols.len(),
            scopes = binder.scopes.len(),
            "bound source file"
        );
        binder
    }

    fn bind_node(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(node) = arena.get(idx) else {
            return;
        };
        match (&node.data, node.kind) {
            (NodeData::Function(function), _) => {
                self.declare_name(arena, function.name, idx, symbol_flags::FUNCTION);

                let scope = self.push_scope(ScopeKind::Function, idx);
                let saved_context = self.binding_context;
                self.binding_context = BindingContext::Parameter;
                for &parameter in &function.parameters {
                    self.bind_node(arena, parameter);
                }
                self.binding_context = saved_context;

                // The body block shares the function scope.
                if function.body.is_some() {
                    self.node_scope_ids.insert(function.body, scope);
                    self.bind_children(arena, function.body);
                }
                self.pop_scope();
            }
            (NodeData::VariableDeclarationList(list), _) => {
                let saved_context = self.binding_context;
                self.binding_context = if list.keyword == SyntaxKind::VarKeyword {
                    BindingContext::Var
                } else {
                    BindingContext::Block
                };
                for &declaration in &list.declarations {
                    self.bind_node(arena, declaration);
                }
                self.binding_context = saved_context;
            }
            (NodeData::VariableDeclaration(declaration), kind) => {
                let flags = if kind == SyntaxKind::Parameter {
                    symbol_flags::PARAMETER
                } else {
                    self.variable_flags()
                };
                self.bind_binding_name(arena, declaration.name, idx, flags);
                self.bind_node(arena, declaration.initializer);
            }
            (NodeData::BindingElement(element), _) => {
                self.bind_node(arena, element.property_name);
                let flags = self.variable_flags();
                self.bind_binding_name(arena, element.name, idx, flags);
                self.bind_node(arena, element.initializer);
            }
            (NodeData::PropertyAssignment(property), _) => {
                // Members, not scope locals.
                if let Some(name) = arena.text_of(property.name)
                    && !name.is_empty()
                {
                    let symbol = self.symbols.alloc(symbol_flags::PROPERTY, name.to_string());
                    self.add_declaration(symbol, arena, idx);
                }
                self.bind_node(arena, property.name);
                self.bind_node(arena, property.initializer);
            }
            (NodeData::Block(_), _) => {
                self.push_scope(ScopeKind::Block, idx);
                self.bind_children(arena, idx);
                self.pop_scope();
            }
            _ => self.bind_children(arena, idx),
        }
    }

    fn bind_children(&mut self, arena: &NodeArena, idx: NodeIndex) {
        for child in arena.children(idx) {
            self.bind_node(arena, child);
        }
    }

    fn variable_flags(&self) -> u32 {
        match self.binding_context {
            BindingContext::Var => symbol_flags::FUNCTION_SCOPED_VARIABLE,
            BindingContext::Block => symbol_flags::BLOCK_SCOPED_VARIABLE,
            BindingContext::Parameter => symbol_flags::PARAMETER,
        }
    }

    /// Declare `declaration` when its name is an identifier; descend into
    /// binding patterns otherwise.
    fn bind_binding_name(
        &mut self,
        arena: &NodeArena,
        name: NodeIndex,
        declaration: NodeIndex,
        flags: u32,
    ) {
        match arena.kind(name) {
            Some(SyntaxKind::Identifier) => self.declare_name(arena, name, declaration, flags),
            Some(SyntaxKind::ObjectBindingPattern | SyntaxKind::ArrayBindingPattern) => {
                self.bind_children(arena, name)
            }
            _ => {}
        }
    }

    fn declare_name(
        &mut self,
        arena: &NodeArena,
        name: NodeIndex,
        declaration: NodeIndex,
        flags: u32,
    ) {
        let Some(text) = arena.identifier_text(name) else {
            return;
        };
        // Recovery identifiers declare nothing.
        if text.is_empty() {
            return;
        }
        let scope = self.declaration_scope(flags);
        self.declare_symbol(scope, text.to_string(), flags, arena, declaration);
    }

    /// `var`s and parameters go to the nearest function scope, everything
    /// else to the innermost scope.
    fn declaration_scope(&self, flags: u32) -> ScopeId {
        if flags & (symbol_flags::FUNCTION_SCOPED_VARIABLE | symbol_flags::PARAMETER) == 0 {
            return self.current_scope;
        }
        let mut scope_id = self.current_scope;
        while let Some(scope) = self.scopes.get(scope_id.0 as usize) {
            if scope.is_function_scope() {
                return scope_id;
            }
            match scope.parent {
                Some(parent) => scope_id = parent,
                None => break,
            }
        }
        scope_id
    }

    fn declare_symbol(
        &mut self,
        scope: ScopeId,
        name: String,
        flags: u32,
        arena: &NodeArena,
        declaration: NodeIndex,
    ) -> SymbolId {
        let existing = self
            .scopes
            .get(scope.0 as usize)
            .and_then(|s| s.locals.get(&name).copied());
        let symbol = match existing {
            Some(symbol) => {
                if let Some(merged) = self.symbols.get_mut(symbol) {
                    merged.flags |= flags;
                }
                symbol
            }
            None => {
                let symbol = self.symbols.alloc(flags, name.clone());
                if let Some(s) = self.scopes.get_mut(scope.0 as usize) {
                    s.locals.insert(name, symbol);
                }
                symbol
            }
        };
        self.add_declaration(symbol, arena, declaration);
        symbol
    }

    fn add_declaration(&mut self, symbol: SymbolId, arena: &NodeArena, declaration: NodeIndex) {
        let id = arena.id(declaration);
        if let Some(s) = self.symbols.get_mut(symbol) {
            s.declarations.push(declaration);
            if s.value_declaration.is_none() {
                s.value_declaration = declaration;
                s.value_declaration_id = id;
            }
        }
        self.node_symbols.insert(id, symbol);
    }

    fn push_scope(&mut self, kind: ScopeKind, container: NodeIndex) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes
            .push(Scope::new(kind, Some(self.current_scope), container));
        self.node_scope_ids.insert(container, id);
        self.current_scope = id;
        id
    }

    fn pop_scope(&mut self) {
        if let Some(parent) = self
            .scopes
            .get(self.current_scope.0 as usize)
            .and_then(|scope| scope.parent)
        {
            self.current_scope = parent;
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn file_locals(&self) -> &Scope {
        &self.scopes[ScopeId::FILE.0 as usize]
    }

    /// Declaration node id → symbol, in binding order.
    pub fn node_symbols(&self) -> &FxIndexMap<NodeId, SymbolId> {
        &self.node_symbols
    }

    pub fn symbol_of_declaration(&self, declaration: NodeId) -> Option<SymbolId> {
        self.node_symbols.get(&declaration).copied()
    }

    /// Scope a node is lexically inside of.
    pub fn enclosing_scope(&self, arena: &NodeArena, mut idx: NodeIndex) -> ScopeId {
        while idx.is_some() {
            if let Some(&scope) = self.node_scope_ids.get(&idx) {
                return scope;
            }
            idx = arena.parent(idx);
        }
        ScopeId::FILE
    }

    /// Resolve `name` as seen from `from`, walking enclosing scopes outwards
    /// to the file scope.
    pub fn resolve_name(&self, arena: &NodeArena, from: NodeIndex, name: &str) -> Option<SymbolId> {
        let mut scope_id = Some(self.enclosing_scope(arena, from));
        while let Some(id) = scope_id {
            let scope = self.scopes.get(id.0 as usize)?;
            if let Some(&symbol) = scope.locals.get(name) {
                return Some(symbol);
            }
            scope_id = scope.parent;
        }
        None
    }

    /// The value symbols declared in this file, one per symbol, keyed on its
    /// value declaration.
    pub fn value_symbols(&self, arena: &NodeArena) -> Vec<ValueSymbol> {
        self.node_symbols
            .iter()
            .filter_map(|(&node, &symbol_id)| {
                let symbol = self.symbols.get(symbol_id)?;
                if symbol.value_declaration_id != node || !symbol.has_flags(symbol_flags::VALUE) {
                    return None;
                }
                Some(ValueSymbol {
                    name: Arc::from(symbol.escaped_name.as_str()),
                    declaration: DeclarationRef::new(Arc::clone(&self.file_name), node),
                    kind: arena.kind(symbol.value_declaration)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod binder_tests;
