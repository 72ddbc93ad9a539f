//! Common types and utilities for the jsinfer inference engine.
//!
//! This crate provides foundational types used across all jsinfer crates:
//! - Hash-consing storage (`HashTable`, `Hashable`, `hash_combine`)
//! - Stable node identity (`NodeId`, `DeclarationRef`)
//! - Text spans and edit ranges (`TextSpan`, `TextChangeRange`)
//! - Syntax diagnostics (`Diagnostic`)
//! - Engine limits and thresholds
//! - Contract violation errors shared by the updater, binder and interner

// Hash-consing table keyed by a custom hash/equality pair
pub mod hash_table;
pub use hash_table::{HashTable, Hashable, compute_hash, hash_combine};

// Stable identifiers that survive reparsing
pub mod ids;
pub use ids::{DeclarationRef, NodeId};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::{TextChangeRange, TextSpan};

// Scanner and parser diagnostics
pub mod diagnostics;
pub use diagnostics::Diagnostic;

// Centralized limits and thresholds
pub mod limits;

// Caller contract violations
pub mod error;
pub use error::ContractViolation;
