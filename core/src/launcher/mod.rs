//! Fire-and-forget process launching.
//!
//! An item's command is handed to the host shell as one raw string (`sh -c`
//! on POSIX, `cmd /C` on Windows) instead of being split into argv. That
//! makes pipes, redirection and variable expansion work in commands, and it
//! also means a command is exactly as trustworthy as whoever wrote the config
//! file: anything taken from an untrusted source is a shell injection.
//!
//! The launcher never waits on, reaps or tracks the child. Once the OS has
//! created the process the call returns.

use crate::types::ProgramItem;
use log::{debug, warn};
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;

/// What the launcher asks the OS to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRequest<'a> {
    pub command: &'a str,
    /// `None` inherits the launcher's current directory.
    pub working_dir: Option<&'a Path>,
}

/// Creates a detached OS process. Implemented by [`ShellSpawner`]; tests and
/// hosts can substitute their own.
pub trait Spawn {
    fn spawn(&self, request: &SpawnRequest<'_>) -> io::Result<()>;
}

/// Runs commands through a shell interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSpawner {
    program: String,
    flag: String,
}

impl Default for ShellSpawner {
    fn default() -> Self {
        if cfg!(windows) {
            Self::with_shell("cmd", "/C")
        } else {
            Self::with_shell("sh", "-c")
        }
    }
}

impl ShellSpawner {
    /// `program flag <command>`, e.g. `bash -c`.
    pub fn with_shell(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, request: &SpawnRequest<'_>) -> Command {
        let mut command = Command::new(&self.program);
        command.arg(&self.flag);
        append_raw_command(&mut command, request.command);

        if let Some(dir) = request.working_dir {
            command.current_dir(dir);
        }
        command.stdin(Stdio::null());
        detach(&mut command);
        command
    }
}

impl Spawn for ShellSpawner {
    fn spawn(&self, request: &SpawnRequest<'_>) -> io::Result<()> {
        // The child handle is dropped on purpose; dropping does not kill it.
        let child = self.command(request).spawn()?;
        debug!("spawned pid {} for {:?}", child.id(), request.command);
        Ok(())
    }
}

#[cfg(unix)]
fn append_raw_command(command: &mut Command, raw: &str) {
    command.arg(raw);
}

/// `cmd` does its own parsing, so the string must not be re-quoted.
#[cfg(windows)]
fn append_raw_command(command: &mut Command, raw: &str) {
    use std::os::windows::process::CommandExt;
    command.raw_arg(raw);
}

#[cfg(not(any(unix, windows)))]
fn append_raw_command(command: &mut Command, raw: &str) {
    command.arg(raw);
}

/// Own process group, so terminal signals aimed at the launcher skip the child.
#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_command: &mut Command) {}

/// The OS refused to start an item's process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to launch {title}\n\ncommand: {command}\n\nerror: {error_message}")]
pub struct LaunchFailure {
    pub title: String,
    pub command: String,
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchResult {
    /// The process was created.
    Started,
    /// The item has no command; nothing was spawned.
    Skipped,
    Failed(LaunchFailure),
}

impl LaunchResult {
    pub fn is_started(&self) -> bool {
        matches!(self, LaunchResult::Started)
    }

    pub fn failure(&self) -> Option<&LaunchFailure> {
        match self {
            LaunchResult::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Starts items as independent processes.
#[derive(Debug, Clone, Default)]
pub struct Launcher<S = ShellSpawner> {
    spawner: S,
}

impl Launcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Spawn> Launcher<S> {
    pub fn with_spawner(spawner: S) -> Self {
        Self { spawner }
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Starts `item.command` in `item.working_dir` (or the current directory
    /// when empty). Never blocks on the child and never panics.
    pub fn launch(&self, item: &ProgramItem) -> LaunchResult {
        if item.command.is_empty() {
            debug!("skipping {:?}: empty command", item.title);
            return LaunchResult::Skipped;
        }

        let request = SpawnRequest {
            command: &item.command,
            working_dir: (!item.working_dir.is_empty()).then(|| Path::new(&item.working_dir)),
        };

        match self.spawner.spawn(&request) {
            Ok(()) => LaunchResult::Started,
            Err(e) => {
                warn!("cannot launch {:?} ({}): {e}", item.title, item.command);
                LaunchResult::Failed(LaunchFailure {
                    title: item.title.clone(),
                    command: item.command.clone(),
                    error_message: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests;
