//! Command implementations for solo.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Commands resolve configuration, build a lock context,
//! and call into the locks module.

use crate::cli::{ClearArgs, Command, ListArgs, RunArgs};
use crate::config::Config;
use crate::context::LockContext;
use crate::error::{Result, SoloError};
use crate::events::{LockObserver, NdjsonObserver, NullObserver};
use crate::locks::{self, Lock};
use crate::process::KillProbe;
use std::path::PathBuf;
use std::sync::Arc;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => cmd_run(args),
        Command::List(args) => cmd_list(args),
        Command::Clear(args) => cmd_clear(args),
    }
}

/// Resolve configuration plus the CLI's directory override into a context.
fn resolve_context(config: &Config, lock_dir: Option<PathBuf>) -> LockContext {
    LockContext::with_override(config, lock_dir)
}

/// Build the event sink named by configuration, if any.
fn resolve_observer(config: &Config) -> Arc<dyn LockObserver> {
    match &config.events_file {
        Some(path) => Arc::new(NdjsonObserver::new(path.clone())),
        None => Arc::new(NullObserver),
    }
}

fn cmd_run(args: RunArgs) -> Result<()> {
    let config = Config::from_env();
    let ctx = resolve_context(&config, args.lock_dir);

    // clap guarantees at least one element via required = true.
    let program = args
        .command
        .first()
        .cloned()
        .ok_or_else(|| SoloError::UserError("no command given".to_string()))?;
    let lock_name = args.name.unwrap_or_else(|| program.clone());

    let lock = Lock::new(&ctx, lock_name)
        .with_die(args.die)
        .with_observer(resolve_observer(&config));

    let guard = lock.acquire()?;

    let status = std::process::Command::new(&program)
        .args(&args.command[1..])
        .status();

    // Release before inspecting the child so the lock never outlives the
    // protected work, even when spawning failed.
    let release = guard.release();

    let status = status
        .map_err(|e| SoloError::Io(format!("failed to run command '{}': {}", program, e)))?;
    release?;

    if status.success() {
        Ok(())
    } else {
        Err(SoloError::CommandFailed(status.code().unwrap_or(1)))
    }
}

fn cmd_list(args: ListArgs) -> Result<()> {
    let config = Config::from_env();
    let ctx = resolve_context(&config, args.lock_dir);

    let locks = locks::list_locks(&ctx, &KillProbe)?;

    if locks.is_empty() {
        println!("No lock records.");
        return Ok(());
    }

    println!("Lock records ({}):", locks.len());
    println!();

    for lock in &locks {
        println!("  {}", lock);
        println!("    Path: {}", lock.path.display());
    }

    let stale_count = locks.iter().filter(|l| !l.alive).count();
    if stale_count > 0 {
        println!();
        println!(
            "Note: {} record(s) are stale and will be reclaimed by the next acquisition.\n\
             Use `solo clear <name> --force` to remove one eagerly.",
            stale_count
        );
    }

    Ok(())
}

fn cmd_clear(args: ClearArgs) -> Result<()> {
    if !args.force {
        return Err(SoloError::UserError(format!(
            "refusing to clear lock '{}' without --force.\n\n\
             Clearing a live holder's record lets a second instance start while the\n\
             first is still running. Only clear records you know are stale.\n\n\
             To clear the record, run:\n  solo clear {} --force",
            args.name, args.name
        )));
    }

    let config = Config::from_env();
    let ctx = resolve_context(&config, args.lock_dir);

    let cleared = locks::clear_record(&ctx, &args.name, &KillProbe)?;

    if cleared.alive {
        eprintln!(
            "Warning: the record's owner (pid {}) is still alive.",
            cleared.pid.unwrap_or(0)
        );
    }

    println!("Cleared lock record: {}", cleared);
    println!("  Path: {}", cleared.path.display());

    Ok(())
}
