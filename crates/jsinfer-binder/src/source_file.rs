//! Source files: a syntax tree plus a binder slot that is filled at most once.

use crate::state::{BinderState, FxIndexMap};
use crate::symbols::{SymbolId, ValueSymbol};
use jsinfer_common::{ContractViolation, NodeId, TextChangeRange, TextSpan};
use jsinfer_parser::{NodeArena, NodeIndex, SyntaxTree};
use once_cell::sync::OnceCell;
use std::sync::Arc;

#[derive(Debug)]
pub struct SourceFile {
    tree: SyntaxTree,
    binder: OnceCell<BinderState>,
}

impl SourceFile {
    pub fn parse(file_name: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> SourceFile {
        SourceFile::from_tree(SyntaxTree::parse(file_name, text))
    }

    pub fn from_tree(tree: SyntaxTree) -> SourceFile {
        SourceFile {
            tree,
            binder: OnceCell::new(),
        }
    }

    /// Replace the text covered by `span` with `replacement`, returning the
    /// new (unbound) file and the change range describing the edit.
    pub fn update(&self, span: TextSpan, replacement: &str) -> (SourceFile, TextChangeRange) {
        let old_text = self.tree.text();
        let start = floor_char_boundary(old_text, span.start as usize);
        let end = ceil_char_boundary(old_text, (span.end() as usize).max(start));

        let mut new_text =
            String::with_capacity(old_text.len() - (end - start) + replacement.len());
        new_text.push_str(&old_text[..start]);
        new_text.push_str(replacement);
        new_text.push_str(&old_text[end..]);

        let change = TextChangeRange::new(
            TextSpan::from_bounds(start as u32, end as u32),
            replacement.len() as u32,
        );
        let tree = self.tree.reparse(new_text, change);
        (SourceFile::from_tree(tree), change)
    }

    /// Reparse with entirely new text.
    pub fn replace_text(&self, text: &str) -> (SourceFile, TextChangeRange) {
        let length = self.tree.text().len() as u32;
        self.update(TextSpan::new(0, length), text)
    }

    #[inline]
    pub fn file_name(&self) -> &str {
        self.tree.file_name()
    }

    #[inline]
    pub fn file_name_arc(&self) -> Arc<str> {
        self.tree.file_name_arc()
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.tree.text()
    }

    #[inline]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    #[inline]
    pub fn arena(&self) -> &NodeArena {
        self.tree.arena()
    }

    #[inline]
    pub fn root(&self) -> NodeIndex {
        self.tree.root()
    }

    #[inline]
    pub fn node_by_id(&self, id: NodeId) -> Option<NodeIndex> {
        self.tree.node_by_id(id)
    }

    pub fn binder(&self) -> Option<&BinderState> {
        self.binder.get()
    }

    pub fn is_bound(&self) -> bool {
        self.binder.get().is_some()
    }

    /// The declaration node → symbol map, present once the file is bound.
    pub fn node_to_symbol(&self) -> Option<&FxIndexMap<NodeId, SymbolId>> {
        self.binder().map(BinderState::node_symbols)
    }

    /// Value symbols of a bound file.
    pub fn value_symbols(&self) -> Result<Vec<ValueSymbol>, ContractViolation> {
        let binder = self.binder().ok_or_else(|| ContractViolation::MissingNodeMap {
            file_name: self.file_name().to_string(),
        })?;
        Ok(binder.value_symbols(self.arena()))
    }
}

fn floor_char_boundary(text: &str, mut offset: usize) -> usize {
    offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn ceil_char_boundary(text: &str, mut offset: usize) -> usize {
    offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset += 1;
    }
    offset
}

/// Bind `file`. Binding is one-shot: a file that is already bound is a
/// contract violation.
pub fn bind_source_file(file: &SourceFile) -> Result<&BinderState, ContractViolation> {
    if file.is_bound() {
        return Err(ContractViolation::FileAlreadyBound {
            file_name: file.file_name().to_string(),
        });
    }
    Ok(file.binder.get_or_init(|| BinderState::bind(&file.tree)))
}

#[cfg(test)]
#[path = "../tests/source_file_tests.rs"]
mod source_file_tests;
