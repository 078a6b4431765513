//! Reference resolution and sync state for externally managed git checkouts
//!
//! - `areas`: command execution, git invocations and the working copy on disk
//! - `artifacts`: declarations, head state, reference classification, remotes and status
//! - `commands`: the `checkout` and `status` operations
//! - `config`: runtime settings
//! - `errors`: error types

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;
