use crate::artifacts::remote::{FALLBACK_REMOTE, INVALID_REMOTE_NAME_REGEX, UNSAFE_CHARACTERS};
use crate::artifacts::remote::url::{expand_local_url, is_remote_url, split_remote_url};
use crate::errors::Result;
use derive_new::new;
use regex::Regex;

/// A remote as configured in a working copy.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RemoteBinding {
    name: String,
    url: String,
}

impl RemoteBinding {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parse `git remote --verbose`, one binding per remote name.
    ///
    /// ```text
    /// origin  https://github.com/ESMCI/cime.git (fetch)
    /// origin  https://github.com/ESMCI/cime.git (push)
    /// ```
    pub fn parse_remote_verbose(git_output: &str) -> Vec<RemoteBinding> {
        git_output
            .lines()
            .filter_map(|line| {
                let mut fields = line.split_whitespace();
                Some((fields.next()?, fields.next()?))
            })
            .fold(Vec::new(), |mut bindings, (name, url)| {
                if !bindings.iter().any(|b: &RemoteBinding| b.name == name) {
                    bindings.push(RemoteBinding::new(name.to_string(), url.to_string()));
                }
                bindings
            })
    }

    pub fn find_by_url<'b>(bindings: &'b [RemoteBinding], url: &str) -> Option<&'b RemoteBinding> {
        bindings.iter().find(|binding| binding.url == url.trim())
    }

    /// Derive a remote name for `url` that git accepts and that no existing binding uses.
    ///
    /// The name is `<base>_<repo>` from the last two path segments, e.g.
    /// `https://github.com/ESMCI/cime.git` becomes `ESMCI_cime.git`. Two
    /// different urls can share trailing segments (`/a/repos/x` and `/b/repos/x`),
    /// so a numeric suffix is added when the name is already taken.
    pub fn synthesize_name(
        url: &str,
        component: &str,
        existing: &[RemoteBinding],
    ) -> Result<String> {
        let path = if is_remote_url(url) {
            split_remote_url(url)
        } else {
            expand_local_url(url, component)?
        };

        let mut segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(strip_unsafe)
            .filter(|segment| !segment.is_empty())
            .rev();
        let repo_name = segments.next();
        let base_name = segments.next();

        let derived = match (base_name, repo_name) {
            (Some(base), Some(repo)) => format!("{}_{}", base, repo),
            (None, Some(repo)) => repo,
            _ => String::new(),
        };

        let mut base = FALLBACK_REMOTE.to_string();
        for candidate in [derived, strip_unsafe(component)] {
            let candidate = sanitize_name(&candidate);
            if !candidate.is_empty() && is_valid_remote_name(&candidate)? {
                base = candidate;
                break;
            }
        }

        let is_taken = |name: &str| existing.iter().any(|binding| binding.name == name);
        if !is_taken(&base) {
            return Ok(base);
        }

        let mut suffix = 2;
        loop {
            let candidate = format!("{}_{}", base, suffix);
            if !is_taken(&candidate) {
                return Ok(candidate);
            }
            suffix += 1;
        }
    }
}

/// Whether git accepts `name` as a remote, i.e. as a component of
/// `refs/remotes/<name>/...`.
pub fn is_valid_remote_name(name: &str) -> Result<bool> {
    Ok(!name.is_empty() && !Regex::new(INVALID_REMOTE_NAME_REGEX)?.is_match(name))
}

fn strip_unsafe(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| !UNSAFE_CHARACTERS.contains(*c) && !c.is_whitespace() && !c.is_control())
        .collect()
}

/// Apply the refname rules character stripping can't: no `..`, no leading `.`
/// or `-`, no trailing `.` or `.lock`.
fn sanitize_name(name: &str) -> String {
    let mut name = name.to_string();
    while name.contains("..") {
        name = name.replace("..", ".");
    }

    loop {
        let trimmed = name.trim_start_matches(['-', '.']).trim_end_matches('.');
        let trimmed = trimmed.strip_suffix(".lock").unwrap_or(trimmed);
        if trimmed.len() == name.len() {
            return name;
        }
        name = trimmed.to_string();
    }
}
