//! External process execution.
//!
//! Every step talks to `git`, `gh`, `npm` and the editor through the
//! [`CommandRunner`] trait so the pipeline can be driven without spawning
//! real processes. [`SystemRunner`] is the production implementation,
//! [`ScriptedRunner`] records invocations and replays canned results.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Result of a finished external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// First non-empty line of stderr, for short failure messages.
    pub fn error_line(&self) -> &str {
        self.stderr
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("")
    }

    /// `what`, followed by the first stderr line when there is one.
    ///
    /// Interactive runs leave stderr on the terminal, so there may be nothing to add.
    pub fn failure(&self, what: &str) -> String {
        match self.error_line() {
            "" => what.to_string(),
            line => format!("{what}: {line}"),
        }
    }
}

/// Runs external programs and waits for them to exit.
///
/// `Err` means the program could not be started at all; a program that ran
/// and exited non-zero is `Ok` with `success == false`.
pub trait CommandRunner {
    /// Run and capture stdout/stderr.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput>;

    /// Run with the terminal attached (progress output goes straight to the operator).
    fn run_interactive(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        self.run(program, args, cwd)
    }
}

/// Spawns real processes. No timeout: a hung child hangs the wizard.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        tracing::debug!(program, ?args, cwd = %cwd.display(), "spawning");
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .with_context(|| format!("Failed to run `{}`", display_command(program, args)))?;

        tracing::debug!(program, status = ?output.status, "exited");
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn run_interactive(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        tracing::debug!(program, ?args, cwd = %cwd.display(), "spawning (inherited stdio)");
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to run `{}`", display_command(program, args)))?;

        tracing::debug!(program, ?status, "exited");
        Ok(CommandOutput {
            success: status.success(),
            ..CommandOutput::default()
        })
    }
}

pub fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Started through `run_interactive`
    pub interactive: bool,
}

impl Invocation {
    /// `program arg1 arg2 ...`
    pub fn command_line(&self) -> String {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        display_command(&self.program, &args)
    }
}

type Handler = Box<dyn Fn(&Invocation) -> CommandOutput>;

enum Reply {
    Output(CommandOutput),
    SpawnError(String),
    Handler(Handler),
}

/// Records every call and answers from a table of command-line prefixes.
///
/// Rules are matched in insertion order against `program arg1 arg2 ...`;
/// unmatched commands succeed with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Vec<(String, Reply)>,
    calls: RefCell<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `output` to commands starting with `prefix`.
    pub fn reply(mut self, prefix: &str, output: CommandOutput) -> Self {
        self.rules.push((prefix.to_string(), Reply::Output(output)));
        self
    }

    /// Commands starting with `prefix` exit non-zero.
    pub fn fail(self, prefix: &str) -> Self {
        let stderr = format!("{prefix}: exit status 1");
        self.reply(prefix, CommandOutput::failed(stderr))
    }

    /// Commands starting with `prefix` cannot be spawned.
    pub fn spawn_error(mut self, prefix: &str, message: &str) -> Self {
        self.rules
            .push((prefix.to_string(), Reply::SpawnError(message.to_string())));
        self
    }

    /// Commands starting with `prefix` run `handler` (e.g. to create files a real clone would).
    pub fn on<F>(mut self, prefix: &str, handler: F) -> Self
    where
        F: Fn(&Invocation) -> CommandOutput + 'static,
    {
        self.rules
            .push((prefix.to_string(), Reply::Handler(Box::new(handler))));
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Command lines of every call, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Invocation::command_line).collect()
    }

    /// Whether any recorded command line starts with `prefix`.
    pub fn was_called(&self, prefix: &str) -> bool {
        self.command_lines().iter().any(|c| c.starts_with(prefix))
    }
}

impl ScriptedRunner {
    fn answer(&self, invocation: Invocation) -> Result<CommandOutput> {
        let line = invocation.command_line();
        self.calls.borrow_mut().push(invocation.clone());

        match self.rules.iter().find(|(prefix, _)| line.starts_with(prefix.as_str())) {
            Some((_, Reply::Output(output))) => Ok(output.clone()),
            Some((_, Reply::SpawnError(message))) => anyhow::bail!("{}", message),
            Some((_, Reply::Handler(handler))) => Ok(handler(&invocation)),
            None => Ok(CommandOutput::ok("")),
        }
    }
}

fn invocation(program: &str, args: &[&str], cwd: &Path, interactive: bool) -> Invocation {
    Invocation {
        program: program.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
        cwd: cwd.to_path_buf(),
        interactive,
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        self.answer(invocation(program, args, cwd, false))
    }

    fn run_interactive(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        self.answer(invocation(program, args, cwd, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_runner_matches_prefix_in_order() {
        let runner = ScriptedRunner::new()
            .fail("git push")
            .reply("git", CommandOutput::ok("git version 2.44.0"));

        let cwd = Path::new("/tmp");
        assert!(!runner.run("git", &["push", "-u", "origin", "main"], cwd).unwrap().success);
        let out = runner.run("git", &["--version"], cwd).unwrap();
        assert!(out.success);
        assert_eq!(out.stdout, "git version 2.44.0");

        assert_eq!(
            runner.command_lines(),
            vec!["git push -u origin main", "git --version"]
        );
    }

    #[test]
    fn test_scripted_runner_spawn_error() {
        let runner = ScriptedRunner::new().spawn_error("node", "No such file or directory");
        let err = runner.run("node", &["--version"], Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("No such file"));
        assert!(runner.was_called("node --version"));
    }

    #[test]
    fn test_handler_sees_invocation() {
        let runner = ScriptedRunner::new().on("gh repo clone", |call| {
            CommandOutput::ok(format!("{} into {}", call.args[2], call.args[3]))
        });
        let out = runner
            .run("gh", &["repo", "clone", "o/t", "demo"], Path::new("/w"))
            .unwrap();
        assert_eq!(out.stdout, "o/t into demo");
    }

    #[test]
    fn test_error_line_skips_blank_lines() {
        let out = CommandOutput::failed("\n\n  fatal: not a git repository\nmore");
        assert_eq!(out.error_line(), "fatal: not a git repository");
    }

    #[test]
    fn test_failure_without_stderr_has_no_dangling_colon() {
        assert_eq!(CommandOutput::failed("").failure("npm install failed"), "npm install failed");
        assert_eq!(
            CommandOutput::failed("E404\n").failure("npm install failed"),
            "npm install failed: E404"
        );
    }
}
