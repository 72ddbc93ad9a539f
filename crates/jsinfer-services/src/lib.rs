//! Inference services for the jsinfer engine.
//!
//! - `InferenceEngine` - structural inference, declaration typing and the
//!   cascade that keeps cached declaration types current across edits
//! - `EngineUpdater` - one edit transaction (add / remove / update files)
//! - `ReferenceTracker` / `ReferenceManager` - identifier ↔ declaration
//!   bookkeeping across files
//! - `Program` - the snapshot of files a query runs against
//! - `Project` - a host owning an engine and its files
//! - `EngineConfig` - tracked file extensions and recursion limits

pub mod config;
pub use config::EngineConfig;

pub mod program;
pub use program::Program;

pub mod references;
pub use references::{
    BidirectionalReferences, FileReferences, FxIndexSet, ProgramChange, ReferenceTracker,
};

mod reference_manager;
pub use reference_manager::ReferenceManager;

pub mod inference;
pub use inference::{EngineUpdater, InferenceEngine, UpdateTransaction};

pub mod project;
pub use project::{Project, TextEdit};

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;
