//! package-release - CLI entry point.

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use package_release::ship::{ReleaseOptions, ReleaseOutcome, run_release};
use package_release::version::{BumpDirective, BumpType};
use package_release::SystemGit;

/// Write CHANGELOG.md, bump the manifest version and tag the release.
#[derive(Parser, Debug)]
#[command(name = "package-release")]
#[command(about = "Write CHANGELOG.md, bump the manifest version and tag the release")]
#[command(disable_version_flag = true)]
struct Cli {
    /// The version you want to release (overrides --type)
    #[arg(short = 'v', long = "version")]
    version: Option<String>,

    /// Which part of the version to upgrade: major | minor | patch.
    /// Any other value (alpha, beta, ...) upgrades like `1.0.0-alpha.1`
    #[arg(short = 't', long = "type", default_value = "patch")]
    bump_type: BumpType,

    /// Push commits and tags to the remote after releasing
    #[arg(short, long)]
    push: bool,

    /// Only update CHANGELOG.md and the manifest; skip commit and tag
    #[arg(short, long)]
    upgrade_only: bool,
}

/// What the command line asks for.
#[derive(Debug)]
enum Invocation {
    Release(Cli),
    /// Show usage and exit cleanly. Holds clap's rendered help when it was requested.
    Usage(Option<clap::Error>),
}

/// Help requests and malformed flag values both end in usage, never in a failure.
fn parse_invocation<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Release(cli),
        Err(e) if e.kind() == ErrorKind::DisplayHelp => Invocation::Usage(Some(e)),
        Err(e) => {
            debug!(kind = ?e.kind(), "Invalid arguments");
            Invocation::Usage(None)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match parse_invocation(std::env::args_os()) {
        Invocation::Release(cli) => cli,
        Invocation::Usage(help) => {
            let _ = match help {
                Some(e) => e.print(),
                None => Cli::command().print_help(),
            };
            return ExitCode::SUCCESS;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = std::env::current_dir().context("Failed to read the current directory")?;
    let git = SystemGit::new(&root)?;

    let options = ReleaseOptions {
        root,
        directive: BumpDirective::from_args(cli.version, cli.bump_type),
        push: cli.push,
        upgrade_only: cli.upgrade_only,
    };

    match run_release(&options, &git)? {
        ReleaseOutcome::NothingToRelease { version, .. } => {
            println!("There are no commits for v{}. Nothing to release.", version);
        }
        ReleaseOutcome::Released {
            version,
            committed,
            pushed,
        } => {
            if !committed {
                println!(
                    "v{} written to CHANGELOG.md and the manifest; commit and tag skipped.",
                    version
                );
            } else if pushed {
                println!("v{} is released and pushed to remote", version);
            } else {
                println!(
                    "v{} is released, you can run `git push && git push --tags` to push the release with its tag.",
                    version
                );
            }
        }
    }

    Ok(())
}

/// Console logging controlled by RUST_LOG (default: warn).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
