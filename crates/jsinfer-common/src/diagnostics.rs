//! Syntax diagnostics reported by the scanner and parser.

use crate::span::TextSpan;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub span: TextSpan,
    pub message: String,
}

impl Diagnostic {
    pub fn new(span: TextSpan, message: impl Into<String>) -> Self {
        Diagnostic {
            span,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}: {}", self.span.start, self.span.end(), self.message)
    }
}
