//! NodeArena creation and bookkeeping methods.

use crate::base::NodeIndex;
use crate::node::{Node, NodeArena, NodeData};
use jsinfer_common::NodeId;
use jsinfer_scanner::SyntaxKind;
use std::sync::atomic::{AtomicU32, Ordering};

/// Ids start at 1; `NodeId::NONE` is 0.
static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(1);

/// Allocate a process-unique node id.
pub(crate) fn next_node_id() -> NodeId {
    NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node with a fresh id. Parents are filled in by `set_parents`.
    pub(crate) fn add_node(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        start: u32,
        end: u32,
        data: NodeData,
    ) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            pos,
            start,
            end,
            parent: NodeIndex::NONE,
            id: next_node_id(),
            data,
        });
        index
    }

    /// Get a node by index.
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).map(|node| node.kind)
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |node| node.parent)
    }

    #[inline]
    pub fn id(&self, index: NodeIndex) -> NodeId {
        self.get(index).map_or(NodeId::NONE, |node| node.id)
    }

    /// Look a node up by its stable id.
    #[inline]
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    /// All node indices in allocation order.
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.nodes.len() as u32).map(NodeIndex)
    }

    /// Link every node reachable from `root` to its parent and index ids.
    pub(crate) fn finish(&mut self, root: NodeIndex) {
        let mut stack = vec![root];
        while let Some(parent) = stack.pop() {
            for child in self.children(parent) {
                if let Some(node) = self.get_mut(child) {
                    node.parent = parent;
                }
                stack.push(child);
            }
        }
        self.rebuild_id_index();
    }

    pub(crate) fn rebuild_id_index(&mut self) {
        self.id_index.clear();
        self.id_index.reserve(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            self.id_index.insert(node.id, NodeIndex(i as u32));
        }
    }
}
