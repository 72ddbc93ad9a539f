//! Syntax tree and parser for the jsinfer inference engine.
//!
//! - `NodeArena` / `Node` / `NodeIndex` - arena-allocated syntax tree
//! - `ParserState` - recursive-descent parser for the script subset
//! - `SyntaxTree` - a parsed file with incremental reparse that keeps the
//!   `NodeId`s of nodes untouched by an edit

mod base;
pub use base::{NodeIndex, NodeList};

mod node;
pub use node::*;

mod node_arena;
mod node_access;
pub use node_access::{
    is_declaration_kind, is_expression_kind, is_function_like_kind, is_variable_like_kind,
};

mod state;
mod state_expressions;
mod state_statements;
pub use state::ParserState;

mod syntax_tree;
pub use syntax_tree::SyntaxTree;
