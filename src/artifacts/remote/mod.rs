//! Remote bindings
//!
//! - `url`: recognising and normalising remote and local repository urls
//! - `remote_binding`: the (name, url) pairs a working copy knows about, and
//!   deriving a safe name for a url it doesn't know yet

pub mod remote_binding;
pub mod url;

/// Stripped from url segments before they become part of a remote name
pub const UNSAFE_CHARACTERS: &str = "!@#$%^&*()[]{}\\/,;~:?";

/// `user@host:path`, ssh shorthand without a scheme
pub const SCP_LIKE_REGEX: &str = r"^[\w.\-]+@[\w.\-]+:";

/// `${VAR}` or `$VAR`
pub const ENV_VAR_REGEX: &str = r"\$\{(\w+)\}|\$(\w+)";

pub const UNKNOWN_REMOTE: &str = "unknown_remote";

/// Used when neither the url nor the component yields a usable name
pub const FALLBACK_REMOTE: &str = "external";

/// Anything git's refname rules reject within a single remote name component
pub const INVALID_REMOTE_NAME_REGEX: &str =
    r"^[.\-]|\.\.|\.lock$|\.$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f/]";
