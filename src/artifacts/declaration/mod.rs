//! What an external is supposed to be
//!
//! - `repository_declaration`: the declared url and the single branch, tag or hash
//!   an external must be checked out at

pub mod repository_declaration;

/// Url value meaning "this working copy has no remote, use local refs only"
pub const LOCAL_PATH_INDICATOR: &str = ".";
