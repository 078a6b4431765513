//! Deciding what a reference string names
//!
//! The same string can be a tag, a local branch, a branch on a remote and a
//! commit prefix all at once. These modules probe each fact separately and turn
//! the combination into an accept/reject decision.

pub mod classification;
pub mod classifier;
