use crate::artifacts::declaration::LOCAL_PATH_INDICATOR;
use crate::errors::{ExternalsError, Result};
use std::fmt;

/// Where the declared reference comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteUrl {
    /// Resolve against the working copy's own refs, no fetch, no remote prefix.
    LocalOnly,
    Url(String),
}

impl RemoteUrl {
    pub fn parse(url: &str) -> Self {
        let url = url.trim();
        if url == LOCAL_PATH_INDICATOR {
            RemoteUrl::LocalOnly
        } else {
            RemoteUrl::Url(url.to_string())
        }
    }
}

impl fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteUrl::LocalOnly => write!(f, "{}", LOCAL_PATH_INDICATOR),
            RemoteUrl::Url(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredRef {
    Branch(String),
    Tag(String),
    Hash(String),
}

impl DeclaredRef {
    pub fn name(&self) -> &str {
        match self {
            DeclaredRef::Branch(name) | DeclaredRef::Tag(name) | DeclaredRef::Hash(name) => name,
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, DeclaredRef::Branch(_))
    }
}

/// A single external as declared by the manifest layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDeclaration {
    component: String,
    url: RemoteUrl,
    target: DeclaredRef,
}

impl RepositoryDeclaration {
    /// Build a declaration, requiring exactly one of branch, tag or hash.
    ///
    /// Blank values count as unset, since manifests routinely carry empty fields.
    pub fn try_new(
        component: impl Into<String>,
        url: &str,
        branch: Option<&str>,
        tag: Option<&str>,
        hash: Option<&str>,
    ) -> Result<Self> {
        let component = component.into();

        let given = [
            ("branch", branch.map(str::trim).filter(|s| !s.is_empty())),
            ("tag", tag.map(str::trim).filter(|s| !s.is_empty())),
            ("hash", hash.map(str::trim).filter(|s| !s.is_empty())),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.map(|value| (kind, value.to_string())))
        .collect::<Vec<_>>();

        let target = match given.as_slice() {
            [] => return Err(ExternalsError::MissingReference { component }),
            [(kind, value)] => match *kind {
                "branch" => DeclaredRef::Branch(value.clone()),
                "tag" => DeclaredRef::Tag(value.clone()),
                _ => DeclaredRef::Hash(value.clone()),
            },
            many => {
                let found = many
                    .iter()
                    .map(|(kind, value)| format!("{kind} \"{value}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(ExternalsError::ConflictingReference { component, found });
            }
        };

        Ok(Self {
            component,
            url: RemoteUrl::parse(url),
            target,
        })
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn url(&self) -> &RemoteUrl {
        &self.url
    }

    pub fn target(&self) -> &DeclaredRef {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Some("main"), None, None, DeclaredRef::Branch("main".into()))]
    #[case(None, Some("v1.0"), None, DeclaredRef::Tag("v1.0".into()))]
    #[case(None, None, Some("abc123"), DeclaredRef::Hash("abc123".into()))]
    #[case(Some(""), Some("  v2 "), None, DeclaredRef::Tag("v2".into()))]
    fn exactly_one_reference_is_accepted(
        #[case] branch: Option<&str>,
        #[case] tag: Option<&str>,
        #[case] hash: Option<&str>,
        #[case] expected: DeclaredRef,
    ) {
        let declaration =
            RepositoryDeclaration::try_new("cism", "https://example/repo.git", branch, tag, hash)
                .unwrap();

        assert_eq!(declaration.target(), &expected);
        assert_eq!(
            declaration.url(),
            &RemoteUrl::Url("https://example/repo.git".into())
        );
    }

    #[test]
    fn no_reference_is_a_configuration_error() {
        let err = RepositoryDeclaration::try_new("cism", ".", None, Some(" "), None).unwrap_err();

        assert!(matches!(err, ExternalsError::MissingReference { .. }));
        assert_eq!(
            err.to_string(),
            "In repo \"cism\": none of branch, hash or tag are set"
        );
    }

    #[test]
    fn several_references_are_rejected() {
        let err = RepositoryDeclaration::try_new("cism", ".", Some("main"), Some("v1"), None)
            .unwrap_err();

        assert!(matches!(err, ExternalsError::ConflictingReference { .. }));
        assert!(err.to_string().contains("branch \"main\", tag \"v1\""));
    }

    #[test]
    fn dot_means_local_only() {
        let declaration =
            RepositoryDeclaration::try_new("cism", " . ", Some("main"), None, None).unwrap();

        assert_eq!(declaration.url(), &RemoteUrl::LocalOnly);
        assert_eq!(declaration.url().to_string(), ".");
    }
}
