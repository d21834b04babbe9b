//! # toolfs Process Execution (`common::process`)
//!
//! File: cli/src/common/process.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module runs the commands the operation layer constructs. It is kept
//! deliberately thin: it knows how to spawn a process, wait for it, and read
//! its output, but nothing about what the command means.
//!
//! ## Architecture
//!
//! - **`Invocation`**: what to run. Either a structured `Program` (program
//!   name + argument vector, spawned without a shell, so no quoting is
//!   involved) or a textual `Shell` command line for the cases that need
//!   shell features (directory scoping, redirection, globbing).
//! - **`Executor`**: the trait the operation layer talks to.
//!   - `run` reports the outcome as `Result<(), ExecError>`.
//!   - `run_for_status` collapses that to a boolean (exit status zero).
//!   - `run_for_lines` returns stdout split into lines, empty on spawn failure.
//! - **`SystemExecutor`**: spawns real processes, synchronously.
//! - **`DryRunExecutor`**: records invocations instead of running them and
//!   answers with scripted outcomes. Backs `toolfs --dry-run` and serves as
//!   the process mock in tests.
//!
//! Every call blocks until the child exits. There is no timeout: a hung tool
//! hangs the caller.
//!
use crate::common::shell::{quote::quote, ShellFlavor};
use std::cell::RefCell;
use std::fmt;
use std::io;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, trace};

/// A fully assembled, shell-executable command line.
///
/// Built for exactly one invocation; it embeds a specific directory and
/// specific paths, so it is never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine(String);

impl CommandLine {
    pub fn new(line: impl Into<String>) -> Self {
        CommandLine(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Something the executor can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// A program spawned directly with an explicit argument vector.
    Program {
        program: String,
        args: Vec<String>,
        /// Discard stdout and stderr.
        quiet: bool,
    },
    /// A textual command line handed to the shell interpreter.
    Shell(CommandLine),
}

impl Invocation {
    /// Starts a structured invocation of `program`.
    pub fn program(program: impl Into<String>) -> Self {
        Invocation::Program {
            program: program.into(),
            args: Vec::new(),
            quiet: false,
        }
    }

    pub fn shell(line: CommandLine) -> Self {
        Invocation::Shell(line)
    }

    /// Appends one argument.
    ///
    /// # Panics
    ///
    /// In debug builds, if called on a shell invocation: a shell line is
    /// already complete and has no argument vector to extend.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.assert_structured("arg");
        if let Invocation::Program { args, .. } = &mut self {
            args.push(value.into());
        }
        self
    }

    /// Appends several arguments. Same restriction as [`Invocation::arg`].
    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assert_structured("args");
        if let Invocation::Program { args, .. } = &mut self {
            args.extend(values.into_iter().map(Into::into));
        }
        self
    }

    /// Discards the program's output.
    ///
    /// Shell lines carry their own redirections (`ShellFlavor::quiet`), so
    /// calling this on one is a bug, caught in debug builds.
    pub fn quiet(mut self) -> Self {
        self.assert_structured("quiet");
        if let Invocation::Program { quiet, .. } = &mut self {
            *quiet = true;
        }
        self
    }

    fn assert_structured(&self, method: &str) {
        debug_assert!(
            matches!(self, Invocation::Program { .. }),
            "Invocation::{} called on a shell line: {}",
            method,
            self.render(ShellFlavor::Posix)
        );
    }

    /// Renders the invocation as the text a user would type into `flavor`'s shell.
    pub fn render(&self, flavor: ShellFlavor) -> String {
        match self {
            Invocation::Program {
                program,
                args,
                quiet,
            } => {
                let mut words = vec![quote(flavor, program)];
                words.extend(args.iter().map(|a| quote(flavor, a)));
                let line = words.join(" ");
                if *quiet {
                    flavor.quiet(&line)
                } else {
                    line
                }
            }
            Invocation::Shell(line) => line.to_string(),
        }
    }
}

/// Why an invocation did not succeed.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("command not found: {program}")]
    NotFound { program: String },

    #[error("command exited with status {code}")]
    NonZeroExit { code: i32 },

    #[error("command was terminated by a signal")]
    Terminated,

    #[error("failed to spawn command: {0}")]
    Spawn(#[from] io::Error),
}

/// Runs invocations on behalf of the operation layer.
pub trait Executor {
    /// Shell family the executor interprets `Invocation::Shell` lines with.
    fn flavor(&self) -> ShellFlavor;

    /// Runs `invocation` to completion.
    fn run(&self, invocation: &Invocation) -> Result<(), ExecError>;

    /// Runs `invocation` and returns its stdout, one element per line with the
    /// line terminator stripped. Returns an empty vector if it cannot be spawned.
    fn run_for_lines(&self, invocation: &Invocation) -> Vec<String>;

    /// `true` iff the process exited with status zero.
    ///
    /// Spawn failures, missing tools and non-zero exits all collapse to `false`.
    fn run_for_status(&self, invocation: &Invocation) -> bool {
        match self.run(invocation) {
            Ok(()) => true,
            Err(e) => {
                debug!("`{}` failed: {}", invocation.render(self.flavor()), e);
                false
            }
        }
    }
}

/// Executes invocations as real child processes.
#[derive(Debug, Clone, Copy)]
pub struct SystemExecutor {
    flavor: ShellFlavor,
}

impl SystemExecutor {
    pub fn new(flavor: ShellFlavor) -> Self {
        SystemExecutor { flavor }
    }

    fn command_for(&self, invocation: &Invocation) -> (Command, String) {
        match invocation {
            Invocation::Program {
                program,
                args,
                quiet,
            } => {
                let mut command = Command::new(program);
                command.args(args);
                if *quiet {
                    command.stdout(Stdio::null()).stderr(Stdio::null());
                }
                (command, program.clone())
            }
            Invocation::Shell(line) => {
                let (shell, flag) = self.flavor.interpreter();
                let mut command = Command::new(shell);
                command.arg(flag);
                push_shell_line(&mut command, line);
                (command, shell.to_string())
            }
        }
    }

    fn classify(&self, invocation: &Invocation, code: Option<i32>) -> Result<(), ExecError> {
        match code {
            Some(0) => Ok(()),
            Some(code)
                if matches!(invocation, Invocation::Shell(_))
                    && code == self.flavor.not_found_status() =>
            {
                Err(ExecError::NotFound {
                    program: invocation.render(self.flavor),
                })
            }
            Some(code) => Err(ExecError::NonZeroExit { code }),
            None => Err(ExecError::Terminated),
        }
    }
}

/// `cmd.exe` parses its own command line, so the line must reach it verbatim.
#[cfg(windows)]
fn push_shell_line(command: &mut Command, line: &CommandLine) {
    use std::os::windows::process::CommandExt;
    command.raw_arg(line.as_str());
}

#[cfg(not(windows))]
fn push_shell_line(command: &mut Command, line: &CommandLine) {
    command.arg(line.as_str());
}

fn spawn_error(program: String, e: io::Error) -> ExecError {
    if e.kind() == io::ErrorKind::NotFound {
        ExecError::NotFound { program }
    } else {
        ExecError::Spawn(e)
    }
}

impl Executor for SystemExecutor {
    fn flavor(&self) -> ShellFlavor {
        self.flavor
    }

    fn run(&self, invocation: &Invocation) -> Result<(), ExecError> {
        debug!("Running: {}", invocation.render(self.flavor));
        let (mut command, program) = self.command_for(invocation);
        let status = command
            .stdin(Stdio::null())
            .status()
            .map_err(|e| spawn_error(program, e))?;
        trace!("Exit status: {}", status);
        self.classify(invocation, status.code())
    }

    fn run_for_lines(&self, invocation: &Invocation) -> Vec<String> {
        debug!("Reading lines from: {}", invocation.render(self.flavor));
        let (mut command, _) = self.command_for(invocation);
        let output = match command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                debug!("Could not spawn listing command: {}", e);
                return Vec::new();
            }
        };
        if !output.status.success() {
            debug!("Listing command exited with {}", output.status);
        }
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect()
    }
}

type OutcomeFn = Box<dyn Fn(&Invocation) -> bool>;

/// Records invocations instead of running them.
///
/// By default every invocation "succeeds" and produces no output. Tests (and
/// anyone else simulating a host) can script the outcome per invocation and
/// the lines returned to listing operations.
pub struct DryRunExecutor {
    flavor: ShellFlavor,
    recorded: RefCell<Vec<Invocation>>,
    outcome: OutcomeFn,
    lines: Vec<String>,
}

impl DryRunExecutor {
    pub fn new(flavor: ShellFlavor) -> Self {
        DryRunExecutor {
            flavor,
            recorded: RefCell::new(Vec::new()),
            outcome: Box::new(|_| true),
            lines: Vec::new(),
        }
    }

    /// Decides the success of each invocation with `outcome`.
    pub fn with_outcome(mut self, outcome: impl Fn(&Invocation) -> bool + 'static) -> Self {
        self.outcome = Box::new(outcome);
        self
    }

    /// Output returned by every `run_for_lines` call.
    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Everything run so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.recorded.borrow().clone()
    }

    /// Everything run so far, rendered as command lines.
    pub fn rendered(&self) -> Vec<String> {
        self.recorded
            .borrow()
            .iter()
            .map(|i| i.render(self.flavor))
            .collect()
    }
}

impl fmt::Debug for DryRunExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DryRunExecutor")
            .field("flavor", &self.flavor)
            .field("recorded", &self.recorded.borrow().len())
            .finish()
    }
}

impl Executor for DryRunExecutor {
    fn flavor(&self) -> ShellFlavor {
        self.flavor
    }

    fn run(&self, invocation: &Invocation) -> Result<(), ExecError> {
        self.recorded.borrow_mut().push(invocation.clone());
        if (self.outcome)(invocation) {
            Ok(())
        } else {
            Err(ExecError::NonZeroExit { code: 1 })
        }
    }

    fn run_for_lines(&self, invocation: &Invocation) -> Vec<String> {
        self.recorded.borrow_mut().push(invocation.clone());
        self.lines.clone()
    }
}
