//! CLI argument parsing for solo.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solo: run a command in at most one process at a time on this machine.
///
/// A named lock is a PID record file in a shared lock directory; while a
/// live process holds a name, every other attempt to take it fails fast.
#[derive(Parser, Debug)]
#[command(name = "solo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for solo.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command under a named lock.
    ///
    /// Acquires the lock, runs the command, releases the lock, and exits
    /// with the command's status. Fails fast if another live process holds
    /// the lock.
    Run(RunArgs),

    /// List lock records and whether their owners are alive.
    List(ListArgs),

    /// Remove a lock record by name.
    ///
    /// Requires --force to prevent accidental removal.
    Clear(ClearArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Lock name. Defaults to the wrapped command's program path, scoping
    /// the lock to "one instance of this program".
    #[arg(long)]
    pub name: Option<String>,

    /// On contention, print one diagnostic line and exit immediately
    /// instead of reporting a recoverable error.
    #[arg(long)]
    pub die: bool,

    /// Directory for lock records (overrides configuration).
    #[arg(long)]
    pub lock_dir: Option<PathBuf>,

    /// The command to run and its arguments.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Directory for lock records (overrides configuration).
    #[arg(long)]
    pub lock_dir: Option<PathBuf>,
}

/// Arguments for the `clear` command.
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Name of the lock whose record should be removed.
    pub name: String,

    /// Force removal (required for safety).
    #[arg(long)]
    pub force: bool,

    /// Directory for lock records (overrides configuration).
    #[arg(long)]
    pub lock_dir: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_run_minimal() {
        let cli = Cli::try_parse_from(["solo", "run", "--", "true"]).unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.command, vec!["true"]);
            assert!(args.name.is_none());
            assert!(!args.die);
            assert!(args.lock_dir.is_none());
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_run_full() {
        let cli = Cli::try_parse_from([
            "solo",
            "run",
            "--name",
            "nightly-backup",
            "--die",
            "--lock-dir",
            "/tmp/locks",
            "--",
            "rsync",
            "-av",
            "src/",
            "dst/",
        ])
        .unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.name, Some("nightly-backup".to_string()));
            assert!(args.die);
            assert_eq!(args.lock_dir, Some(PathBuf::from("/tmp/locks")));
            assert_eq!(args.command, vec!["rsync", "-av", "src/", "dst/"]);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_run_requires_a_command() {
        assert!(Cli::try_parse_from(["solo", "run"]).is_err());
    }

    #[test]
    fn parse_run_passes_child_flags_through() {
        let cli = Cli::try_parse_from(["solo", "run", "--", "ls", "-la"]).unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.command, vec!["ls", "-la"]);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_list() {
        let cli = Cli::try_parse_from(["solo", "list"]).unwrap();
        if let Command::List(args) = cli.command {
            assert!(args.lock_dir.is_none());
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn parse_clear() {
        let cli = Cli::try_parse_from(["solo", "clear", "nightly-backup", "--force"]).unwrap();
        if let Command::Clear(args) = cli.command {
            assert_eq!(args.name, "nightly-backup");
            assert!(args.force);
        } else {
            panic!("Expected Clear command");
        }
    }

    #[test]
    fn parse_clear_without_force() {
        let cli = Cli::try_parse_from(["solo", "clear", "x"]).unwrap();
        if let Command::Clear(args) = cli.command {
            assert!(!args.force);
        } else {
            panic!("Expected Clear command");
        }
    }
}
