//! Stable identifiers for syntax nodes and the declarations they introduce.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Process-unique identity of a syntax node.
///
/// Assigned when the node is parsed and carried over by an incremental reparse
/// when the node lies entirely outside the edited range. Caches keyed by
/// `NodeId` therefore survive edits elsewhere in the same file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for "no node".
    pub const NONE: NodeId = NodeId(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a declaration lives: the file name plus the declaration node's id.
///
/// File names are stable across edits of the same file, node ids are stable
/// across edits that do not touch the node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeclarationRef {
    pub file_name: Arc<str>,
    pub node: NodeId,
}

impl DeclarationRef {
    pub fn new(file_name: Arc<str>, node: NodeId) -> Self {
        DeclarationRef { file_name, node }
    }
}

impl fmt::Display for DeclarationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.file_name, self.node)
    }
}
