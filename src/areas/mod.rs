//! Runtime components
//!
//! - `executor`: the command executor port and its process-backed implementation
//! - `git`: the git command lines, bound to one directory
//! - `repository`: an external, pairing its declaration with its working copy
//! - `working_copy`: filesystem facts about where an external lives

pub mod executor;
pub mod git;
pub mod repository;
pub mod working_copy;
