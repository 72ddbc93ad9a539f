//! Tokenizer state machine.
//!
//! Positions are byte offsets into the source text. The scanner skips trivia
//! (whitespace, line breaks, comments) before each token and remembers where
//! the trivia started so nodes can record both their full start and their
//! token start.

use crate::syntax_kind::{SyntaxKind, text_to_keyword};
use jsinfer_common::{Diagnostic, TextSpan};
use std::sync::Arc;

/// Snapshot of the scanner position, used for look-ahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
    diagnostics_len: usize,
}

pub struct ScannerState {
    source: Arc<str>,
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
    diagnostics: Vec<Diagnostic>,
}

impl ScannerState {
    pub fn new(source: Arc<str>) -> Self {
        ScannerState {
            source,
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            preceding_line_break: false,
            diagnostics: Vec::new(),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Start of the current token including its leading trivia.
    #[inline]
    pub fn token_full_start(&self) -> u32 {
        offset_u32(self.full_start)
    }

    #[inline]
    pub fn token_start(&self) -> u32 {
        offset_u32(self.token_start)
    }

    #[inline]
    pub fn token_end(&self) -> u32 {
        offset_u32(self.pos)
    }

    /// Cooked value of the current token: identifier name, string contents
    /// without quotes and escapes, or numeric literal text.
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    pub fn token_text(&self) -> &str {
        &self.source[self.token_start..self.pos]
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    /// Rewind to a position previously captured with `snapshot`.
    pub fn restore(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.preceding_line_break = false;
        self.token_value.clear();
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.peek() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '{' => self.single(SyntaxKind::OpenBraceToken),
            '}' => self.single(SyntaxKind::CloseBraceToken),
            '(' => self.single(SyntaxKind::OpenParenToken),
            ')' => self.single(SyntaxKind::CloseParenToken),
            '[' => self.single(SyntaxKind::OpenBracketToken),
            ']' => self.single(SyntaxKind::CloseBracketToken),
            ';' => self.single(SyntaxKind::SemicolonToken),
            ',' => self.single(SyntaxKind::CommaToken),
            '?' => self.single(SyntaxKind::QuestionToken),
            ':' => self.single(SyntaxKind::ColonToken),
            '~' => self.single(SyntaxKind::TildeToken),
            '"' | '\'' => {
                self.bump();
                self.scan_string_body(ch);
                SyntaxKind::StringLiteral
            }
            '.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.scan_number(),
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier(),
            _ => self.scan_operator(ch),
        };
        self.token
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.bump();
        kind
    }

    fn scan_operator(&mut self, ch: char) -> SyntaxKind {
        // Longest match first.
        const OPERATORS: &[(&str, SyntaxKind)] = &[
            (">>>=", SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
            ("===", SyntaxKind::EqualsEqualsEqualsToken),
            ("!==", SyntaxKind::ExclamationEqualsEqualsToken),
            (">>>", SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
            ("<<=", SyntaxKind::LessThanLessThanEqualsToken),
            (">>=", SyntaxKind::GreaterThanGreaterThanEqualsToken),
            ("==", SyntaxKind::EqualsEqualsToken),
            ("!=", SyntaxKind::ExclamationEqualsToken),
            ("<=", SyntaxKind::LessThanEqualsToken),
            (">=", SyntaxKind::GreaterThanEqualsToken),
            ("<<", SyntaxKind::LessThanLessThanToken),
            (">>", SyntaxKind::GreaterThanGreaterThanToken),
            ("++", SyntaxKind::PlusPlusToken),
            ("--", SyntaxKind::MinusMinusToken),
            ("&&", SyntaxKind::AmpersandAmpersandToken),
            ("||", SyntaxKind::BarBarToken),
            ("+=", SyntaxKind::PlusEqualsToken),
            ("-=", SyntaxKind::MinusEqualsToken),
            ("*=", SyntaxKind::AsteriskEqualsToken),
            ("/=", SyntaxKind::SlashEqualsToken),
            ("%=", SyntaxKind::PercentEqualsToken),
            ("&=", SyntaxKind::AmpersandEqualsToken),
            ("|=", SyntaxKind::BarEqualsToken),
            ("^=", SyntaxKind::CaretEqualsToken),
            ("=", SyntaxKind::EqualsToken),
            ("<", SyntaxKind::LessThanToken),
            (">", SyntaxKind::GreaterThanToken),
            ("+", SyntaxKind::PlusToken),
            ("-", SyntaxKind::MinusToken),
            ("*", SyntaxKind::AsteriskToken),
            ("/", SyntaxKind::SlashToken),
            ("%", SyntaxKind::PercentToken),
            ("&", SyntaxKind::AmpersandToken),
            ("|", SyntaxKind::BarToken),
            ("^", SyntaxKind::CaretToken),
            ("!", SyntaxKind::ExclamationToken),
        ];

        let rest = &self.source[self.pos..];
        for (text, kind) in OPERATORS {
            if rest.starts_with(text) {
                self.pos += text.len();
                return *kind;
            }
        }

        self.bump();
        self.error(
            TextSpan::from_bounds(self.token_start(), self.token_end()),
            format!("Invalid character '{ch}'."),
        );
        SyntaxKind::Unknown
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        while let Some(c) = self.peek()
            && is_identifier_part(c)
        {
            self.bump();
        }
        let text = &self.source[self.token_start..self.pos];
        self.token_value.push_str(text);
        text_to_keyword(text).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        if self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X')) {
            self.pos += 2;
            let digits_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            }
            if self.pos == digits_start {
                self.error(
                    TextSpan::from_bounds(self.token_start(), self.token_end()),
                    "Hexadecimal digit expected.",
                );
            }
        } else {
            self.skip_digits();
            if self.peek() == Some('.') {
                self.bump();
                self.skip_digits();
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                let save = self.pos;
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.skip_digits();
                } else {
                    self.pos = save;
                }
            }
        }

        if self.peek().is_some_and(is_identifier_start) {
            let bad_start = self.token_end();
            while self.peek().is_some_and(is_identifier_part) {
                self.bump();
            }
            self.error(
                TextSpan::from_bounds(bad_start, self.token_end()),
                "An identifier or keyword cannot immediately follow a numeric literal.",
            );
        }

        let text = &self.source[self.token_start..self.pos];
        self.token_value.push_str(text);
        SyntaxKind::NumericLiteral
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    /// Scan the remainder of a string literal after its opening quote.
    fn scan_string_body(&mut self, quote: char) {
        loop {
            let Some(c) = self.peek() else {
                self.error(
                    TextSpan::from_bounds(self.token_start(), self.token_end()),
                    "Unterminated string literal.",
                );
                return;
            };
            match c {
                c if c == quote => {
                    self.bump();
                    return;
                }
                '\n' | '\r' => {
                    self.error(
                        TextSpan::from_bounds(self.token_start(), self.token_end()),
                        "Unterminated string literal.",
                    );
                    return;
                }
                '\\' => {
                    self.bump();
                    self.scan_escape();
                }
                _ => {
                    self.bump();
                    self.token_value.push(c);
                }
            }
        }
    }

    fn scan_escape(&mut self) {
        let Some(c) = self.peek() else {
            return;
        };
        self.bump();
        match c {
            'n' => self.token_value.push('\n'),
            't' => self.token_value.push('\t'),
            'r' => self.token_value.push('\r'),
            'b' => self.token_value.push('\u{8}'),
            'f' => self.token_value.push('\u{c}'),
            'v' => self.token_value.push('\u{b}'),
            '0' if !self.peek().is_some_and(|d| d.is_ascii_digit()) => self.token_value.push('\0'),
            'x' => self.scan_hex_escape(2),
            'u' => self.scan_hex_escape(4),
            // Line continuation.
            '\n' => {}
            '\r' => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            other => self.token_value.push(other),
        }
    }

    fn scan_hex_escape(&mut self, digits: usize) {
        let start = self.pos;
        let end = start + digits;
        let hex = self.source.get(start..end).filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()));
        match hex
            .and_then(|h| u32::from_str_radix(h, 16).ok())
            .and_then(char::from_u32)
        {
            Some(ch) => {
                self.pos = end;
                self.token_value.push(ch);
            }
            None => self.error(
                TextSpan::from_bounds(offset_u32(start), offset_u32(start)),
                "Hexadecimal digit expected.",
            ),
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                    self.preceding_line_break = true;
                    self.bump();
                }
                '/' if self.peek_at(1) == Some('/') => {
                    while let Some(c) = self.peek()
                        && !is_line_break(c)
                    {
                        self.bump();
                    }
                }
                '/' if self.peek_at(1) == Some('*') => {
                    let comment_start = self.pos;
                    self.pos += 2;
                    match self.source[self.pos..].find("*/") {
                        Some(offset) => {
                            let body = &self.source[self.pos..self.pos + offset];
                            if body.chars().any(is_line_break) {
                                self.preceding_line_break = true;
                            }
                            self.pos += offset + 2;
                        }
                        None => {
                            self.pos = self.source.len();
                            self.error(
                                TextSpan::from_bounds(
                                    offset_u32(comment_start),
                                    offset_u32(self.pos),
                                ),
                                "'*/' expected.",
                            );
                        }
                    }
                }
                c if c.is_whitespace() => self.bump(),
                _ => break,
            }
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    #[inline]
    fn peek_at(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    #[inline]
    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn error(&mut self, span: TextSpan, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(span, message));
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_alphanumeric()
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[inline]
fn offset_u32(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod scanner_tests;
