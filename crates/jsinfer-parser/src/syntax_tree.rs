//! A parsed file and its incremental reparse.
//!
//! `reparse` parses the new text from scratch and then carries node identity
//! over from the old tree: a node lying entirely before the edit, or entirely
//! after it once shifted by the length delta, keeps the `NodeId` of the old
//! node with the same kind, span and text. Nodes that touch the edit (and
//! therefore every ancestor of the edit) get fresh ids.

use crate::base::NodeIndex;
use crate::node::{Node, NodeArena};
use crate::state::ParserState;
use jsinfer_common::{Diagnostic, NodeId, TextChangeRange};
use jsinfer_scanner::SyntaxKind;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct SyntaxTree {
    file_name: Arc<str>,
    text: Arc<str>,
    arena: NodeArena,
    root: NodeIndex,
    diagnostics: Vec<Diagnostic>,
}

impl SyntaxTree {
    pub fn parse(file_name: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> SyntaxTree {
        let file_name = file_name.into();
        let text = text.into();
        let mut parser = ParserState::new(Arc::clone(&text));
        let root = parser.parse_source_file();
        let (arena, diagnostics) = parser.into_parts();
        SyntaxTree {
            file_name,
            text,
            arena,
            root,
            diagnostics,
        }
    }

    /// Parse `new_text`, the result of applying `change` to this tree's text.
    pub fn reparse(&self, new_text: impl Into<Arc<str>>, change: TextChangeRange) -> SyntaxTree {
        let mut tree = SyntaxTree::parse(Arc::clone(&self.file_name), new_text);
        let reused = tree.reuse_node_ids(self, change);
        debug!(
            file = %self.file_name,
            reused,
            total = tree.arena.len(),
            "reparsed syntax tree"
        );
        tree
    }

    fn reuse_node_ids(&mut self, old: &SyntaxTree, change: TextChangeRange) -> usize {
        let mut old_nodes: FxHashMap<(SyntaxKind, u32, u32), NodeIndex> = FxHashMap::default();
        for index in old.arena.indices() {
            if let Some(node) = old.arena.get(index) {
                old_nodes.entry((node.kind, node.pos, node.end)).or_insert(index);
            }
        }

        let change_start = change.span.start;
        let new_change_end = change.span.start + change.new_length;
        let delta = change.delta();

        let mut reused = 0;
        for node in &mut self.arena.nodes {
            let old_bounds = if node.end <= change_start {
                Some((node.pos, node.end))
            } else if node.pos >= new_change_end {
                shift(node.pos, -delta).zip(shift(node.end, -delta))
            } else {
                None
            };
            let Some((old_pos, old_end)) = old_bounds else {
                continue;
            };
            let Some(old_index) = old_nodes.remove(&(node.kind, old_pos, old_end)) else {
                continue;
            };
            let Some(old_node) = old.arena.get(old_index) else {
                continue;
            };
            if node_source(&self.text, node) == node_source(&old.text, old_node) {
                node.id = old_node.id;
                reused += 1;
            }
        }

        self.arena.rebuild_id_index();
        reused
    }

    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[inline]
    pub fn file_name_arc(&self) -> Arc<str> {
        Arc::clone(&self.file_name)
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    #[inline]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.arena.get(index)
    }

    /// Source text of a node, without leading trivia.
    pub fn node_text(&self, index: NodeIndex) -> &str {
        self.arena
            .get(index)
            .map_or("", |node| node_source(&self.text, node))
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<NodeIndex> {
        self.arena.index_of(id)
    }

    /// Deepest node whose token range contains `offset`.
    pub fn node_at_offset(&self, offset: u32) -> NodeIndex {
        let mut current = self.root;
        'descend: loop {
            for child in self.arena.children(current) {
                if let Some(node) = self.arena.get(child)
                    && node.start <= offset
                    && offset < node.end
                {
                    current = child;
                    continue 'descend;
                }
            }
            return current;
        }
    }

    /// Smallest node whose full range (trivia included) covers `[start, end]`.
    ///
    /// Adjacent siblings may both cover a range that touches their shared
    /// boundary; the later one wins.
    pub fn covering_node(&self, start: u32, end: u32) -> NodeIndex {
        let mut current = self.root;
        loop {
            let covering = self.arena.children(current).into_iter().filter(|&child| {
                self.arena
                    .get(child)
                    .is_some_and(|node| node.pos <= start && node.end >= end)
            });
            match covering.last() {
                Some(child) => current = child,
                None => return current,
            }
        }
    }
}

fn node_source<'a>(text: &'a str, node: &Node) -> &'a str {
    text.get(node.start as usize..node.end as usize).unwrap_or("")
}

fn shift(offset: u32, delta: i64) -> Option<u32> {
    u32::try_from(i64::from(offset) + delta).ok()
}

#[cfg(test)]
#[path = "../tests/syntax_tree_tests.rs"]
mod syntax_tree_tests;
