use crate::artifacts::head::{
    ACTIVE_MARKER, DETACHED_AT_REGEX, DETACHED_FROM_REGEX, TRACKED_BRANCH_REGEX, TRACKING_REGEX,
};
use crate::errors::{ExternalsError, Result};
use regex::Regex;

/// How far a tracking branch has drifted from its upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Divergence {
    pub ahead: u32,
    pub behind: u32,
    /// upstream branch no longer exists
    pub gone: bool,
}

/// The line `git branch -vv` marks with `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadState {
    /// On a local branch without upstream.
    Branch(String),
    /// On a local branch that tracks `upstream`.
    Tracking {
        branch: String,
        upstream: String,
        divergence: Divergence,
    },
    /// Detached exactly at a tag, remote branch or hash.
    DetachedAt(String),
    /// Detached and moved past `origin`; `hash` is where HEAD is now.
    DetachedFrom { origin: String, hash: String },
}

impl HeadState {
    /// Parse a verbose branch listing.
    ///
    /// `Ok(None)` when no line is marked active, which happens outside a
    /// repository or before the first commit. A marked line that fits none of the
    /// known shapes is an error carrying the line and the whole listing.
    pub fn parse(git_output: &str) -> Result<Option<HeadState>> {
        let Some(line) = git_output
            .lines()
            .find(|line| line.starts_with(ACTIVE_MARKER))
        else {
            return Ok(None);
        };

        // only a parenthesised head can be detached; the subject may say anything
        let parenthesised = line[ACTIVE_MARKER.len_utf8()..].trim_start().starts_with('(');

        let state = if parenthesised && line.contains("detached at") {
            Self::parse_detached_at(line, git_output)?
        } else if parenthesised && line.contains("detached from") {
            Self::parse_detached_from(line, git_output)?
        } else if let Some(tracking) = Self::parse_tracking(line, git_output)? {
            tracking
        } else {
            Self::parse_local_branch(line, git_output)?
        };

        Ok(Some(state))
    }

    /// Name of what is checked out, for display and comparison.
    ///
    /// Past a named reference the hash is reported instead of the name, since the
    /// name no longer describes the content.
    pub fn current_ref(&self) -> &str {
        match self {
            HeadState::Branch(branch) => branch,
            HeadState::Tracking { upstream, .. } => upstream,
            HeadState::DetachedAt(name) => name,
            HeadState::DetachedFrom { hash, .. } => hash,
        }
    }

    fn parse_detached_at(line: &str, git_output: &str) -> Result<HeadState> {
        let caps = Regex::new(DETACHED_AT_REGEX)?
            .captures(line)
            .ok_or_else(|| head_state_error("\"detached at\"", line, git_output))?;

        Ok(HeadState::DetachedAt(caps[1].trim().to_string()))
    }

    fn parse_detached_from(line: &str, git_output: &str) -> Result<HeadState> {
        let caps = Regex::new(DETACHED_FROM_REGEX)?
            .captures(line)
            .ok_or_else(|| head_state_error("\"detached from\"", line, git_output))?;

        Ok(HeadState::DetachedFrom {
            origin: caps[1].to_string(),
            hash: caps[2].trim().to_string(),
        })
    }

    fn parse_tracking(line: &str, git_output: &str) -> Result<Option<HeadState>> {
        let Some(caps) = Regex::new(TRACKED_BRANCH_REGEX)?.captures(line) else {
            return Ok(None);
        };
        let branch = caps[1].to_string();

        let tracking = Regex::new(TRACKING_REGEX)?
            .captures(caps[2].trim())
            .ok_or_else(|| head_state_error("tracking branch", line, git_output))?;
        let upstream = tracking[1].trim().to_string();
        let divergence = tracking
            .get(2)
            .map(|annotation| parse_divergence(annotation.as_str()))
            .unwrap_or_default();

        Ok(Some(HeadState::Tracking {
            branch,
            upstream,
            divergence,
        }))
    }

    fn parse_local_branch(line: &str, git_output: &str) -> Result<HeadState> {
        // a parenthesised head we have no pattern for, e.g. "(no branch, rebasing x)"
        if line[ACTIVE_MARKER.len_utf8()..].trim_start().starts_with('(') {
            return Err(head_state_error("detached", line, git_output));
        }

        line.split_whitespace()
            .nth(1)
            .map(|branch| HeadState::Branch(branch.trim().to_string()))
            .ok_or_else(|| head_state_error("local branch", line, git_output))
    }
}

fn parse_divergence(annotation: &str) -> Divergence {
    annotation
        .split(',')
        .map(str::trim)
        .fold(Divergence::default(), |mut divergence, part| {
            let mut words = part.split_whitespace();
            match (words.next(), words.next().and_then(|n| n.parse().ok())) {
                (Some("ahead"), Some(count)) => divergence.ahead = count,
                (Some("behind"), Some(count)) => divergence.behind = count,
                (Some("gone"), _) => divergence.gone = true,
                _ => {}
            }
            divergence
        })
}

fn head_state_error(pattern: &'static str, line: &str, git_output: &str) -> ExternalsError {
    ExternalsError::HeadState {
        component: String::new(),
        pattern,
        line: line.to_string(),
        output: git_output.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::proptest;
    use rstest::rstest;

    const ON_LOCAL_BRANCH: &str = "  feature2 36418b4 [origin/feature2] Work on feature2
* feature3 36418b4 Work on feature2
  master   9b75494 [origin/master] Initialize repository.
";

    const DETACHED_AT_HASH: &str = "* (HEAD detached at 36418b4) 36418b4 Work on feature2
  feature2                   36418b4 [origin/feature2] Work on feature2
  master                     9b75494 [origin/master] Initialize repository.
";

    const DETACHED_AT_REMOTE_BRANCH: &str = "* (HEAD detached at origin/feature2) 36418b4 Work on feature2
  feature2                           36418b4 [origin/feature2] Work on feature2
  feature3                           36418b4 Work on feature2
  master                             9b75494 [origin/master] Initialize repository.
";

    const DETACHED_AT_TAG: &str = "* (HEAD detached at clm4_5_18_r272) b837fc36 clm4_5_18_r272\n";

    const DETACHED_FROM_HASH: &str = "* (HEAD detached from 60b1cc1) 046eeac work on great new feature!
  master                       9b75494 [origin/master] Initialize repository.
";

    const DETACHED_FROM_BRANCH: &str = "* (HEAD detached from origin/feature2) 1c455f6 work on great new feature!
  master                               9b75494 [origin/master] Initialize repository.
";

    const DETACHED_FROM_TAG: &str = "* (HEAD detached from tag1) 3bcf79f work on great new feature!
  master                    9b75494 [origin/master] Initialize repository.
";

    #[rstest]
    #[case::local("* main 9b75494 fix crash when detached at startup\n", HeadState::Branch("main".to_string()))]
    #[case::local_from("* main 9b75494 split out when detached from parent\n", HeadState::Branch("main".to_string()))]
    #[case::tracking(
        "* main 9b75494 [origin/main] fix crash when detached at startup\n",
        HeadState::Tracking {
            branch: "main".to_string(),
            upstream: "origin/main".to_string(),
            divergence: Divergence::default(),
        }
    )]
    #[case::tracking_from(
        "* main 9b75494 [origin/main: behind 1] handle (HEAD detached from x) output\n",
        HeadState::Tracking {
            branch: "main".to_string(),
            upstream: "origin/main".to_string(),
            divergence: Divergence { ahead: 0, behind: 1, gone: false },
        }
    )]
    fn detached_wording_in_the_subject_is_ignored(
        #[case] listing: &str,
        #[case] expected: HeadState,
    ) {
        assert_eq!(HeadState::parse(listing).unwrap(), Some(expected));
    }

    #[rstest]
    #[case::local_branch(ON_LOCAL_BRANCH, "feature3")]
    #[case::detached_at_hash(DETACHED_AT_HASH, "36418b4")]
    #[case::detached_at_remote_branch(DETACHED_AT_REMOTE_BRANCH, "origin/feature2")]
    #[case::detached_at_tag(DETACHED_AT_TAG, "clm4_5_18_r272")]
    #[case::detached_from_hash(DETACHED_FROM_HASH, "046eeac")]
    #[case::detached_from_branch(DETACHED_FROM_BRANCH, "1c455f6")]
    #[case::detached_from_tag(DETACHED_FROM_TAG, "3bcf79f")]
    #[case::tracking("* master 562bac9a [origin/master] more test junk\n", "origin/master")]
    #[case::tracking_ahead("* master 408a8920 [origin/master: ahead 3] more junk\n", "origin/master")]
    #[case::tracking_behind("* master 822d687d [origin/master: behind 3] more junk\n", "origin/master")]
    #[case::tracking_both(
        "* master 408a8920 [origin/master: ahead 3, behind 2] more junk\n",
        "origin/master"
    )]
    fn current_ref_for_each_head_state(#[case] listing: &str, #[case] expected: &str) {
        let state = HeadState::parse(listing).unwrap().unwrap();

        assert_eq!(state.current_ref(), expected);
    }

    #[test]
    fn detached_at_remote_branch_keeps_the_name() {
        let state = HeadState::parse("* (HEAD detached at origin/feature-2) abc123 msg\n")
            .unwrap()
            .unwrap();

        assert_eq!(state, HeadState::DetachedAt("origin/feature-2".to_string()));
    }

    #[test]
    fn detached_from_remote_branch_reports_the_hash() {
        let state = HeadState::parse("* (HEAD detached from origin/feature-2) abc123\n")
            .unwrap()
            .unwrap();

        assert_eq!(
            state,
            HeadState::DetachedFrom {
                origin: "origin/feature-2".to_string(),
                hash: "abc123".to_string(),
            }
        );
        assert_eq!(state.current_ref(), "abc123");
    }

    #[test]
    fn tracking_records_divergence() {
        let state = HeadState::parse("* master 408a8920 [origin/master: ahead 3, behind 2] junk\n")
            .unwrap()
            .unwrap();

        assert_eq!(
            state,
            HeadState::Tracking {
                branch: "master".to_string(),
                upstream: "origin/master".to_string(),
                divergence: Divergence {
                    ahead: 3,
                    behind: 2,
                    gone: false,
                },
            }
        );
    }

    #[test]
    fn tracking_upstream_that_is_gone() {
        let state = HeadState::parse("* topic 408a8920 [origin/topic: gone] junk\n")
            .unwrap()
            .unwrap();

        match state {
            HeadState::Tracking { divergence, .. } => assert!(divergence.gone),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn brackets_in_the_subject_are_not_tracking_info() {
        let state = HeadState::parse("* feature3 36418b4 fix build [ci skip]\n")
            .unwrap()
            .unwrap();

        assert_eq!(state, HeadState::Branch("feature3".to_string()));
    }

    #[test]
    fn empty_listing_has_no_current_ref() {
        assert_eq!(HeadState::parse("").unwrap(), None);
        assert_eq!(
            HeadState::parse("  master 9b75494 Initialize repository.\n").unwrap(),
            None
        );
    }

    #[test]
    fn old_git_detached_wording_without_head_prefix() {
        let state = HeadState::parse("* (detached from v1.0) 3bcf79f work\n")
            .unwrap()
            .unwrap();

        assert_eq!(state.current_ref(), "3bcf79f");
    }

    #[test]
    fn unrecognised_active_line_is_an_error_with_full_output() {
        let listing = "* (no branch, rebasing topic) 3bcf79f wip\n  master 9b75494 init\n";

        let err = HeadState::parse(listing).unwrap_err();
        match &err {
            ExternalsError::HeadState { line, output, .. } => {
                assert_eq!(line, "* (no branch, rebasing topic) 3bcf79f wip");
                assert_eq!(output, listing);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("head state failed"));
    }

    #[test]
    fn malformed_detached_at_is_an_error() {
        let err = HeadState::parse("* (HEAD detached at weird name!) 3bcf79f x\n").unwrap_err();

        assert!(matches!(
            err,
            ExternalsError::HeadState {
                pattern: "\"detached at\"",
                ..
            }
        ));
    }

    proptest! {
        #[test]
        fn parsing_is_idempotent(
            branch in "[a-zA-Z0-9_-]{1,12}(/[a-zA-Z0-9_-]{1,12})?",
            hash in "[0-9a-f]{7,12}",
            ahead in 0u32..50,
            form in 0usize..4,
        ) {
            let listing = match form {
                0 => format!("* {branch} {hash} subject line\n  other {hash} x\n"),
                1 => format!("* {branch} {hash} [origin/{branch}: ahead {ahead}] subject\n"),
                2 => format!("* (HEAD detached at {branch}) {hash} subject\n"),
                _ => format!("* (HEAD detached from {branch}) {hash} subject\n"),
            };

            let first = HeadState::parse(&listing).unwrap();
            let second = HeadState::parse(&listing).unwrap();
            assert_eq!(&first, &second);
            assert!(first.is_some());
        }
    }
}
