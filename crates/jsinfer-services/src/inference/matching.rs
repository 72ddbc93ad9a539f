//! Structural matching of declarations across an edit.
//!
//! Two declarations are the same logical declaration when they and every
//! pair of ancestors up to the source file have the same kind and the same
//! name. Names compare by text, binding patterns element-wise and computed
//! names by expression structure.

use jsinfer_binder::SourceFile;
use jsinfer_common::NodeId;
use jsinfer_parser::{NodeArena, NodeData, NodeIndex};
use jsinfer_scanner::SyntaxKind;

/// Whether `old` in `old_file` and `new` in `new_file` declare the same thing.
pub fn declarations_match(
    old_file: &SourceFile,
    old: NodeId,
    new_file: &SourceFile,
    new: NodeId,
) -> bool {
    match (old_file.node_by_id(old), new_file.node_by_id(new)) {
        (Some(old), Some(new)) => nodes_match(old_file.arena(), old, new_file.arena(), new),
        _ => false,
    }
}

pub fn nodes_match(
    old_arena: &NodeArena,
    mut old: NodeIndex,
    new_arena: &NodeArena,
    mut new: NodeIndex,
) -> bool {
    loop {
        let (Some(old_kind), Some(new_kind)) = (old_arena.kind(old), new_arena.kind(new)) else {
            return false;
        };
        match (old_kind == SyntaxKind::SourceFile, new_kind == SyntaxKind::SourceFile) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }
        if old_kind != new_kind
            || !names_match(
                old_arena,
                old_arena.declaration_name(old),
                new_arena,
                new_arena.declaration_name(new),
            )
        {
            return false;
        }
        old = old_arena.parent(old);
        new = new_arena.parent(new);
    }
}

fn names_match(
    old_arena: &NodeArena,
    old: NodeIndex,
    new_arena: &NodeArena,
    new: NodeIndex,
) -> bool {
    if old.is_none() || new.is_none() {
        return old.is_none() && new.is_none();
    }
    let kind = old_arena.kind(old);
    if kind != new_arena.kind(new) {
        return false;
    }
    match kind {
        Some(SyntaxKind::Identifier | SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral) => {
            old_arena.text_of(old) == new_arena.text_of(new)
        }
        Some(SyntaxKind::ObjectBindingPattern | SyntaxKind::ArrayBindingPattern) => {
            binding_patterns_match(old_arena, old, new_arena, new)
        }
        Some(SyntaxKind::ComputedPropertyName) => {
            match (old_arena.get_computed_property(old), new_arena.get_computed_property(new)) {
                (Some(old), Some(new)) => {
                    expressions_match(old_arena, old.expression, new_arena, new.expression)
                }
                _ => false,
            }
        }
        _ => false,
    }
}

fn binding_patterns_match(
    old_arena: &NodeArena,
    old: NodeIndex,
    new_arena: &NodeArena,
    new: NodeIndex,
) -> bool {
    let (Some(old), Some(new)) = (
        old_arena.get_binding_pattern(old),
        new_arena.get_binding_pattern(new),
    ) else {
        return false;
    };
    old.elements.len() == new.elements.len()
        && old
            .elements
            .iter()
            .zip(&new.elements)
            .all(|(&old, &new)| binding_elements_match(old_arena, old, new_arena, new))
}

fn binding_elements_match(
    old_arena: &NodeArena,
    old: NodeIndex,
    new_arena: &NodeArena,
    new: NodeIndex,
) -> bool {
    let (Some(old), Some(new)) = (
        old_arena.get_binding_element(old),
        new_arena.get_binding_element(new),
    ) else {
        return false;
    };
    let kind = old_arena.kind(old.name);
    if kind != new_arena.kind(new.name) {
        return false;
    }
    match kind {
        Some(SyntaxKind::Identifier) => {
            old_arena.identifier_text(old.name) == new_arena.identifier_text(new.name)
        }
        Some(SyntaxKind::ObjectBindingPattern | SyntaxKind::ArrayBindingPattern) => {
            binding_patterns_match(old_arena, old.name, new_arena, new.name)
        }
        _ => false,
    }
}

fn expressions_match(
    old_arena: &NodeArena,
    old: NodeIndex,
    new_arena: &NodeArena,
    new: NodeIndex,
) -> bool {
    let kind = old_arena.kind(old);
    if kind != new_arena.kind(new) {
        return false;
    }
    match kind {
        Some(SyntaxKind::Identifier | SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral) => {
            old_arena.text_of(old) == new_arena.text_of(new)
        }
        _ => structural_equals(old_arena, old, new_arena, new),
    }
}

/// Same shape: kinds and operators agree node for node. Leaf text is not
/// compared.
fn structural_equals(
    old_arena: &NodeArena,
    old: NodeIndex,
    new_arena: &NodeArena,
    new: NodeIndex,
) -> bool {
    let (Some(old_node), Some(new_node)) = (old_arena.get(old), new_arena.get(new)) else {
        return old.is_none() && new.is_none();
    };
    if old_node.kind != new_node.kind {
        return false;
    }
    let operators_match = match (&old_node.data, &new_node.data) {
        (NodeData::Binary(old), NodeData::Binary(new)) => old.operator == new.operator,
        (NodeData::Unary(old), NodeData::Unary(new)) => old.operator == new.operator,
        (NodeData::VariableDeclarationList(old), NodeData::VariableDeclarationList(new)) => {
            old.keyword == new.keyword
        }
        _ => true,
    };
    if !operators_match {
        return false;
    }

    let old_children = old_arena.children(old);
    let new_children = new_arena.children(new);
    old_children.len() == new_children.len()
        && old_children
            .iter()
            .zip(&new_children)
            .all(|(&old, &new)| structural_equals(old_arena, old, new_arena, new))
}

#[cfg(test)]
#[path = "../../tests/matching_tests.rs"]
mod matching_tests;
