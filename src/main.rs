use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use extsync::areas::repository::ExternalRepository;
use extsync::areas::working_copy::WorkingCopy;
use extsync::artifacts::declaration::repository_declaration::RepositoryDeclaration;
use extsync::config::Settings;
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(
    name = "extsync",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Check out and inspect git externals",
    long_about = "This tool brings an external git working copy onto a declared branch, tag or hash \
    and reports whether it is still on that reference and whether its tracked files are modified.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence"
    )]
    verbose: u8,
    #[arg(
        long = "git",
        env = "EXTSYNC_GIT",
        global = true,
        value_name = "PROGRAM",
        help = "The git program to run"
    )]
    git_program: Option<String>,
    #[arg(
        long,
        env = "EXTSYNC_TIMEOUT",
        global = true,
        value_name = "SECS",
        help = "Kill any git command running longer than this (0 disables)"
    )]
    timeout: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "checkout",
        about = "Check out the declared reference",
        long_about = "This command clones the external if its working copy does not exist, \
        binds a remote for the declared url, fetches it, validates the declared reference \
        and checks it out."
    )]
    Checkout {
        #[command(flatten)]
        external: ExternalArgs,
    },
    #[command(
        name = "status",
        about = "Show whether the working copy is on the declared reference",
        long_about = "This command prints a one-line status: the sync code, the clean code and the path. \
        Nothing in the working copy is modified."
    )]
    Status {
        #[command(flatten)]
        external: ExternalArgs,
        #[arg(long, help = "Also print the full git status output")]
        show_output: bool,
    },
}

#[derive(Args)]
struct ExternalArgs {
    #[arg(index = 1, help = "The path of the working copy")]
    path: PathBuf,
    #[arg(long, help = "The repository url, or '.' to use only the working copy's own refs")]
    url: String,
    #[command(flatten)]
    reference: ReferenceArgs,
    #[arg(long, help = "The component name used in messages (defaults to the directory name)")]
    name: Option<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ReferenceArgs {
    #[arg(long, help = "The branch to check out")]
    branch: Option<String>,
    #[arg(long, help = "The tag to check out")]
    tag: Option<String>,
    #[arg(long, help = "The commit hash to check out")]
    hash: Option<String>,
}

impl ExternalArgs {
    fn declaration(&self) -> Result<(RepositoryDeclaration, WorkingCopy)> {
        let working_copy = WorkingCopy::new(self.path.clone());
        let component = self
            .name
            .clone()
            .unwrap_or_else(|| working_copy.dir_name());

        let declaration = RepositoryDeclaration::try_new(
            component,
            &self.url,
            self.reference.branch.as_deref(),
            self.reference.tag.as_deref(),
            self.reference.hash.as_deref(),
        )?;

        Ok((declaration, working_copy))
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let settings = Settings::new(cli.git_program.clone(), cli.timeout);
    let executor = settings.executor();

    match &cli.command {
        Commands::Checkout { external } => {
            let (declaration, working_copy) = external.declaration()?;
            let repository =
                ExternalRepository::new(declaration, working_copy, &executor, &settings.git_program);

            repository.checkout().with_context(|| {
                format!("failed to check out {}", external.path.display())
            })?
        }
        Commands::Status {
            external,
            show_output,
        } => {
            let (declaration, working_copy) = external.declaration()?;
            let repository =
                ExternalRepository::new(declaration, working_copy, &executor, &settings.git_program);

            let status = repository.status().with_context(|| {
                format!("failed to read the status of {}", external.path.display())
            })?;

            println!("{}", status.render(cli.verbose > 0));
            if *show_output && !status.status_output.is_empty() {
                print!("{}", status.status_output);
            }
        }
    }

    Ok(())
}
