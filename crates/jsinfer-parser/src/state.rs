//! Parser state and token-level helpers.
//!
//! Statement parsing lives in `state_statements`, expression parsing in
//! `state_expressions`. The parser never fails: errors are recorded as
//! diagnostics and missing pieces are filled with empty identifiers.

use crate::base::NodeIndex;
use crate::node::{IdentifierData, NodeArena, NodeData};
use jsinfer_common::limits::MAX_PARSER_NESTING_DEPTH;
use jsinfer_common::{Diagnostic, TextSpan};
use jsinfer_scanner::{
    ScannerState, SyntaxKind, keyword_to_text, punctuation_to_text,
};
use std::sync::Arc;

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// End of the last consumed token.
    pub(crate) previous_token_end: u32,
    pub(crate) recursion_depth: u32,
    /// Position of the last reported error, used to suppress cascades.
    last_error_pos: Option<u32>,
}

impl ParserState {
    pub fn new(source_text: Arc<str>) -> ParserState {
        ParserState {
            scanner: ScannerState::new(source_text),
            arena: NodeArena::new(),
            diagnostics: Vec::new(),
            previous_token_end: 0,
            recursion_depth: 0,
            last_error_pos: None,
        }
    }

    /// Consume the parser, returning the arena and all diagnostics sorted by
    /// position.
    pub fn into_parts(mut self) -> (NodeArena, Vec<Diagnostic>) {
        let mut diagnostics = self.scanner.take_diagnostics();
        diagnostics.append(&mut self.diagnostics);
        diagnostics.sort_by_key(|d| d.span.start);
        (self.arena, diagnostics)
    }

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.scanner.token() == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_full_start()
    }

    #[inline]
    pub(crate) fn token_start(&self) -> u32 {
        self.scanner.token_start()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.previous_token_end = self.scanner.token_end();
        self.scanner.scan()
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report it as missing.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let text = punctuation_to_text(kind)
            .or_else(|| keyword_to_text(kind))
            .unwrap_or("token");
        self.error_at_current_token(format!("'{text}' expected."));
        false
    }

    /// Automatic semicolon insertion: a statement may end without `;` before
    /// `}`, at end of file or before a line break.
    pub(crate) fn parse_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return;
        }
        if self.can_parse_semicolon() {
            return;
        }
        self.error_at_current_token("';' expected.");
    }

    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.scanner.has_preceding_line_break()
    }

    pub(crate) fn error_at_current_token(&mut self, message: impl Into<String>) {
        let start = self.token_start();
        let end = self.scanner.token_end().max(start);
        self.error(TextSpan::from_bounds(start, end), message);
    }

    pub(crate) fn error(&mut self, span: TextSpan, message: impl Into<String>) {
        // One error per position keeps recovery from cascading.
        if self.last_error_pos == Some(span.start) {
            return;
        }
        self.last_error_pos = Some(span.start);
        self.diagnostics.push(Diagnostic::new(span, message));
    }

    pub(crate) fn add(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        start: u32,
        data: NodeData,
    ) -> NodeIndex {
        let end = self.previous_token_end.max(start);
        self.arena.add_node(kind, pos, start, end, data)
    }

    /// A zero-width identifier standing in for something the parser expected
    /// but did not find.
    pub(crate) fn create_missing_identifier(&mut self, message: &str) -> NodeIndex {
        self.error_at_current_token(message);
        let pos = self.previous_token_end;
        self.arena.add_node(
            SyntaxKind::Identifier,
            pos,
            pos,
            pos,
            NodeData::Identifier(IdentifierData {
                text: String::new(),
            }),
        )
    }

    /// Enter one level of syntactic nesting. Returns false (after reporting)
    /// once the nesting limit is reached.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSER_NESTING_DEPTH {
            self.error_at_current_token("Maximum nesting depth exceeded.");
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    #[inline]
    pub(crate) fn leave_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }
}

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod parser_tests;
