//! Caller contract violations.
//!
//! These are never transient: each one means the embedding tool broke the
//! engine's sequencing contract (or handed it inconsistent input). They are
//! propagated to the caller and must not be retried or ignored. "No type
//! information" is not an error and is modelled as `Option::None` instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("file '{file_name}' was already added in this update")]
    FileAlreadyAdded { file_name: String },

    #[error("file '{file_name}' was already removed in this update")]
    FileAlreadyRemoved { file_name: String },

    #[error("file '{file_name}' was already updated in this update")]
    FileAlreadyUpdated { file_name: String },

    #[error("an update of '{pending}' is still outstanding; cannot start updating '{file_name}'")]
    OutstandingUpdate { pending: String, file_name: String },

    #[error("'{file_name}' finished updating without a matching before-update notification")]
    MissingBeforeUpdate { file_name: String },

    #[error("before-update was for '{expected}' but after-update was for '{actual}'")]
    UpdatedFileNameMismatch { expected: String, actual: String },

    #[error("update finished while '{file_name}' still has an outstanding before-update")]
    UpdateNotFinished { file_name: String },

    #[error("key with hash code {hash} was already in the hash table")]
    DuplicateKey { hash: i32 },

    #[error("file '{file_name}' is already bound")]
    FileAlreadyBound { file_name: String },

    #[error("file '{file_name}' has no node-to-symbol map; it was never bound")]
    MissingNodeMap { file_name: String },
}
