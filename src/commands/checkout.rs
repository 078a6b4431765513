use crate::areas::git::Git;
use crate::areas::repository::ExternalRepository;
use crate::artifacts::declaration::repository_declaration::{DeclaredRef, RemoteUrl};
use crate::artifacts::reference::classifier::ReferenceClassifier;
use crate::artifacts::remote::remote_binding::RemoteBinding;
use crate::errors::{ExternalsError, Result};
use tracing::info;

impl ExternalRepository<'_> {
    /// Bring the working copy onto the declared reference, cloning it first if
    /// it does not exist yet.
    pub fn checkout(&self) -> Result<()> {
        let component = self.declaration().component();
        let working_copy = self.working_copy();

        if !working_copy.exists() {
            self.clone_working_copy()?;
        } else if !working_copy.has_metadata() {
            return Err(ExternalsError::NotAWorkingCopy {
                component: component.to_string(),
                path: working_copy.path().to_path_buf(),
            });
        }

        let git = self.git();
        match self.declaration().url() {
            RemoteUrl::LocalOnly => self.checkout_local_ref(&git),
            RemoteUrl::Url(url) => self.checkout_remote_ref(&git, url),
        }
    }

    fn clone_working_copy(&self) -> Result<()> {
        let working_copy = self.working_copy();

        let RemoteUrl::Url(url) = self.declaration().url() else {
            return Err(ExternalsError::NothingToClone {
                component: self.declaration().component().to_string(),
                path: working_copy.path().to_path_buf(),
            });
        };

        let parent = working_copy.parent();
        std::fs::create_dir_all(&parent).map_err(|source| ExternalsError::Io {
            path: parent.clone(),
            source,
        })?;

        info!(
            component = self.declaration().component(),
            "cloning into {}",
            working_copy.path().display()
        );
        self.git_in(&parent)
            .clone_repo(url, &working_copy.dir_name())
    }

    /// The reference is resolved against the working copy's own refs.
    fn checkout_local_ref(&self, git: &Git) -> Result<()> {
        ReferenceClassifier::new(git).validate(self.declaration(), None)?;
        git.checkout(self.declaration().target().name())
    }

    fn checkout_remote_ref(&self, git: &Git, url: &str) -> Result<()> {
        let remote_name = self.bind_remote(git, url)?;

        info!(remote = %remote_name, "fetching");
        git.fetch(&remote_name)?;

        ReferenceClassifier::new(git).validate(self.declaration(), Some(&remote_name))?;

        let target = match self.declaration().target() {
            DeclaredRef::Branch(branch) => format!("{}/{}", remote_name, branch),
            other => other.name().to_string(),
        };
        git.checkout(&target)
    }

    /// Name of the remote pointing at `url`, adding one if none does.
    fn bind_remote(&self, git: &Git, url: &str) -> Result<String> {
        let bindings = RemoteBinding::parse_remote_verbose(&git.remote_verbose()?);

        if let Some(binding) = RemoteBinding::find_by_url(&bindings, url) {
            return Ok(binding.name().to_string());
        }

        let name = RemoteBinding::synthesize_name(url, self.declaration().component(), &bindings)?;
        info!(remote = %name, url, "adding remote");
        git.remote_add(&name, url)?;

        Ok(name)
    }
}
