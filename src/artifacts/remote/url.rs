use crate::artifacts::remote::{ENV_VAR_REGEX, SCP_LIKE_REGEX};
use crate::errors::{ExternalsError, Result};
use regex::Regex;

/// Remote urls have a scheme (`https://`, `ssh://`, `file://`) or the ssh
/// shorthand `git@github.com:org/repo`. Anything else is a local path.
pub fn is_remote_url(url: &str) -> bool {
    url.contains("://") || Regex::new(SCP_LIKE_REGEX).is_ok_and(|re| re.is_match(url))
}

/// Reduce a remote url to a `/`-separated path, dropping scheme and credentials
/// so the trailing segments are the interesting ones.
pub fn split_remote_url(url: &str) -> String {
    let without_scheme = match url.split_once("://") {
        Some((_, rest)) => rest,
        None => url,
    };

    match Regex::new(SCP_LIKE_REGEX)
        .ok()
        .and_then(|re| re.find(without_scheme).map(|m| m.end()))
    {
        Some(end) => format!(
            "{}/{}",
            &without_scheme[..end - 1],
            &without_scheme[end..]
        ),
        None => without_scheme.to_string(),
    }
}

/// Expand `~`, `$VAR` and `${VAR}` in a local path.
///
/// `~user` is not supported and is reported rather than left in place, where it
/// would end up as a literal path segment.
pub fn expand_local_url(url: &str, component: &str) -> Result<String> {
    let url = expand_home(url, component)?;

    let re = Regex::new(ENV_VAR_REGEX)?;
    let mut expanded = String::with_capacity(url.len());
    let mut last = 0;

    for caps in re.captures_iter(&url) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
        let variable = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();

        let value = std::env::var(variable).map_err(|_| ExternalsError::UnresolvedLocalUrl {
            component: component.to_string(),
            url: url.clone(),
            unresolved: format!("${}", variable),
        })?;

        expanded.push_str(&url[last..whole.start]);
        expanded.push_str(&value);
        last = whole.end;
    }
    expanded.push_str(&url[last..]);

    Ok(expanded)
}

fn expand_home(url: &str, component: &str) -> Result<String> {
    let Some(rest) = url.strip_prefix('~') else {
        return Ok(url.to_string());
    };

    let unresolved = |unresolved: &str| ExternalsError::UnresolvedLocalUrl {
        component: component.to_string(),
        url: url.to_string(),
        unresolved: unresolved.to_string(),
    };

    if !rest.is_empty() && !rest.starts_with('/') {
        let user = rest.split('/').next().unwrap_or_default();
        return Err(unresolved(&format!("~{}", user)));
    }

    let home = home::home_dir().ok_or_else(|| unresolved("~"))?;
    Ok(format!("{}{}", home.display(), rest))
}
