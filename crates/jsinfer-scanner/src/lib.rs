//! Script scanner/tokenizer for the jsinfer inference engine.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token and node kinds
//! - `ScannerState` - Tokenizer state machine
//! - Token classification helpers (`token_is_keyword`, `token_is_assignment_operator`, ...)

mod syntax_kind;
pub use syntax_kind::*;

mod scanner;
pub use scanner::{ScannerSnapshot, ScannerState};
