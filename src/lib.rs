//! jsinfer: incremental, cycle-safe type inference for loosely-typed script
//! source.
//!
//! The layers live in their own crates and are re-exported here:
//!
//! - [`common`] - hash-consing table, node ids, spans, limits, contract errors
//! - [`scanner`] / [`parser`] - the script subset and its arena syntax tree
//! - [`binder`] - source files, scopes and value symbols
//! - [`solver`] - the type algebra, lazy symbol resolution and the evaluator
//! - [`services`] - the inference engine, its updater and the project host

// Common types - ids, spans, the hash-consing table and contract violations
pub use jsinfer_common as common;
pub use jsinfer_common::{ContractViolation, DeclarationRef, NodeId, TextChangeRange, TextSpan};

// Scanner and parser - script subset and incremental reparse
pub use jsinfer_parser as parser;
pub use jsinfer_scanner as scanner;
pub use jsinfer_scanner::SyntaxKind;

// Binder - one-shot binding of source files
pub use jsinfer_binder as binder;
pub use jsinfer_binder::{SourceFile, bind_source_file};

// Solver - type information values and their evaluation
pub use jsinfer_solver as solver;
pub use jsinfer_solver::{TypeArena, TypeInfoId};

// Services - engine, updater, reference tracking and the project host
pub use jsinfer_services as services;
pub use jsinfer_services::{
    EngineConfig, EngineUpdater, InferenceEngine, Program, Project, ReferenceManager,
    ReferenceTracker, TextEdit,
};

// Tracing configuration (JSINFER_LOG / JSINFER_LOG_FORMAT)
pub mod tracing_config;
