//! Low-level git operations

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::paths;
use crate::runner::CommandRunner;

/// Delete the `.git` directory left behind by the template clone.
///
/// Absent metadata is not an error.
pub fn remove_metadata(root: &Path) -> Result<()> {
    let git_dir = paths::project::git_dir(root);
    match fs::remove_dir_all(&git_dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", git_dir.display())),
    }
}

/// Initialize a new repository
pub fn init(runner: &dyn CommandRunner, root: &Path) -> Result<()> {
    let output = runner
        .run("git", &["init"], root)
        .context("Failed to run git init")?;

    if !output.success {
        anyhow::bail!(output.failure("git init failed"));
    }

    Ok(())
}

/// Stage all changes
pub fn add_all(runner: &dyn CommandRunner, root: &Path) -> Result<()> {
    let output = runner
        .run("git", &["add", "."], root)
        .context("Failed to stage changes")?;

    if !output.success {
        anyhow::bail!(output.failure("Failed to stage changes"));
    }

    Ok(())
}

/// Create a commit
pub fn commit(runner: &dyn CommandRunner, root: &Path, message: &str) -> Result<()> {
    let output = runner
        .run("git", &["commit", "-m", message], root)
        .context("Failed to create commit")?;

    if !output.success {
        anyhow::bail!(output.failure("Failed to create commit"));
    }

    Ok(())
}

/// Push `branch` to `origin` and set it as upstream
pub fn push(runner: &dyn CommandRunner, root: &Path, branch: &str) -> Result<()> {
    let output = runner
        .run_interactive("git", &["push", "-u", "origin", branch], root)
        .context("Failed to push")?;

    if !output.success {
        anyhow::bail!(output.failure(&format!("Failed to push {branch}")));
    }

    Ok(())
}
