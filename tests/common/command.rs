use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteStr, PathChild};
use derive_new::new;
use rstest::fixture;
use std::path::{Path, PathBuf};

/// A repository playing the role of the external's upstream, plus a separate
/// directory for the superproject the external is checked out into.
pub struct Upstream {
    pub root: TempDir,
    pub path: PathBuf,
    pub workspace: PathBuf,
}

impl Upstream {
    pub fn url(&self) -> String {
        self.path.display().to_string()
    }

    /// Full hash `reference` resolves to upstream.
    pub fn hash_of(&self, reference: &str) -> String {
        git_output(&self.path, &["rev-parse", &format!("{}^{{commit}}", reference)])
    }
}

/// Upstream layout:
///
/// ```text
/// main:     "Initial commit" (tag v1.0, branch release, branch+tag collide) -- "Second commit"
/// ```
#[fixture]
pub fn upstream() -> Upstream {
    let root = TempDir::new().expect("Failed to create temp dir");
    let path = root.child("upstream").path().to_path_buf();
    let workspace = root.child("workspace").path().to_path_buf();
    std::fs::create_dir_all(&path).expect("Failed to create upstream dir");
    std::fs::create_dir_all(&workspace).expect("Failed to create workspace dir");

    run_git_command(&path, &["init", "--quiet"]).assert().success();

    root.child("upstream/readme.txt")
        .write_str("one\n")
        .expect("Failed to write file");
    git_commit(&path, "Initial commit");
    run_git_command(&path, &["branch", "-M", "main"]).assert().success();
    run_git_command(&path, &["tag", "v1.0"]).assert().success();
    run_git_command(&path, &["branch", "release"]).assert().success();
    run_git_command(&path, &["branch", "collide"]).assert().success();
    run_git_command(&path, &["tag", "collide"]).assert().success();

    root.child("upstream/readme.txt")
        .write_str("two\n")
        .expect("Failed to write file");
    git_commit(&path, "Second commit");

    Upstream {
        root,
        path,
        workspace,
    }
}

pub fn run_extsync_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("extsync").expect("Failed to find extsync binary");
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("EXTSYNC_GIT");
    cmd.env_remove("EXTSYNC_TIMEOUT");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn git_output(dir: &Path, args: &[&str]) -> String {
    let output = run_git_command(dir, args)
        .output()
        .expect("Failed to run git");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[derive(Debug, Clone, new)]
struct RandomAuthor {
    name: String,
    email: String,
}

fn generate_random_author() -> RandomAuthor {
    use fake::Fake;
    use fake::faker::internet::en::FreeEmail;
    use fake::faker::name::en::Name;

    let name = Name().fake::<String>().replace(" ", "_");
    let email = FreeEmail().fake::<String>();
    RandomAuthor::new(name, email)
}

pub fn git_commit(dir: &Path, message: &str) {
    let author = generate_random_author();

    run_git_command(dir, &["add", "."]).assert().success();
    run_git_command(dir, &["commit", "--quiet", "-m", message])
        .envs(vec![
            ("GIT_AUTHOR_NAME", author.name.as_str()),
            ("GIT_AUTHOR_EMAIL", author.email.as_str()),
            ("GIT_AUTHOR_DATE", "2023-01-01 12:00:00 +0000"),
            ("GIT_COMMITTER_NAME", author.name.as_str()),
            ("GIT_COMMITTER_EMAIL", author.email.as_str()),
            ("GIT_COMMITTER_DATE", "2023-01-01 12:00:00 +0000"),
        ])
        .assert()
        .success();
}
