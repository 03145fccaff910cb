//! GitHub via the `gh` CLI.
//!
//! `gh` handles authentication; we only look at exit status.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::runner::CommandRunner;

/// Check that a repository exists and is visible to the current user.
pub fn repo_view(runner: &dyn CommandRunner, repo: &str, cwd: &Path) -> Result<()> {
    let output = runner
        .run("gh", &["repo", "view", repo], cwd)
        .context("Failed to run `gh repo view`. Is `gh` CLI installed?")?;

    if !output.success {
        bail!(output.failure(&format!("gh repo view {repo} failed")));
    }

    Ok(())
}

/// Clone `repo` into `cwd/target`.
pub fn repo_clone(runner: &dyn CommandRunner, repo: &str, target: &str, cwd: &Path) -> Result<()> {
    let output = runner
        .run_interactive("gh", &["repo", "clone", repo, target], cwd)
        .context("Failed to run `gh repo clone`")?;

    if !output.success {
        bail!(output.failure(&format!("gh repo clone {repo} failed")));
    }

    Ok(())
}

/// Create `path` on GitHub from the local repository at `source`, adding it as `origin`.
pub fn repo_create(
    runner: &dyn CommandRunner,
    path: &str,
    public: bool,
    source: &Path,
) -> Result<()> {
    let visibility = if public { "--public" } else { "--private" };
    let output = runner
        .run(
            "gh",
            &["repo", "create", path, visibility, "--source=.", "--remote=origin"],
            source,
        )
        .context("Failed to run `gh repo create`")?;

    if !output.success {
        bail!(output.failure(&format!("gh repo create {path} failed")));
    }

    Ok(())
}
