//! Current head state, recovered from `git branch -vv`
//!
//! There is no plumbing command that reports the *name* of what is checked out
//! together with its upstream, so the porcelain listing is parsed instead. Each
//! output shape has its own pattern below.
//!
//! "detached at" means HEAD still sits on the commit the name points to;
//! "detached from" means commits were made on top of it. Older git (1.8 era)
//! printed "detached from" for both.

pub mod head_state;

/// `* (HEAD detached at origin/feature-2) 36418b4 Work on feature2`
pub const DETACHED_AT_REGEX: &str = r"\* \((?:\w+\s+)?detached at ([\w\-./]+)\)";

/// `* (HEAD detached from origin/feature-2) 1c455f6 work on great new feature!`
pub const DETACHED_FROM_REGEX: &str = r"\* \((?:\w+\s+)?detached from ([\w\-./]+)\)\s+(\w+)";

/// `* master 408a8920 [origin/master: ahead 3] more junk`
///
/// The bracket has to follow the hash directly, brackets in the subject don't count.
pub const TRACKED_BRANCH_REGEX: &str = r"^\*\s+(\S+)\s+[0-9a-fA-F]+\s+\[([^\]]*)\]";

/// Content of the tracking bracket: `origin/master` or `origin/master: ahead 3, behind 2`
pub const TRACKING_REGEX: &str = r"^([\w\-./]+)(?::\s+([\w\s,]+))?$";

pub const ACTIVE_MARKER: char = '*';
