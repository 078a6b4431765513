//! Data structures and parsing
//!
//! - `declaration`: the url and reference an external is declared with
//! - `head`: parsing the current head state out of `git branch -vv`
//! - `reference`: classifying a reference as tag, branch and/or hash
//! - `remote`: remote bindings and url handling
//! - `status`: sync and clean verdicts for a working copy

pub mod declaration;
pub mod head;
pub mod reference;
pub mod remote;
pub mod status;
