//! Package manager invocations (`npm`, `pnpm`, `yarn`, `bun`).

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::runner::CommandRunner;

/// Arguments that add development dependencies for `manager`.
fn add_dev_args(manager: &str) -> [&'static str; 2] {
    match manager {
        "npm" => ["install", "-D"],
        _ => ["add", "-D"],
    }
}

/// Install everything declared in `package.json`
pub fn install(runner: &dyn CommandRunner, manager: &str, root: &Path) -> Result<()> {
    let output = runner
        .run_interactive(manager, &["install"], root)
        .with_context(|| format!("Failed to run `{manager} install`"))?;

    if !output.success {
        bail!(output.failure(&format!("{manager} install failed")));
    }

    Ok(())
}

/// Add `packages` as development dependencies
pub fn add_dev(
    runner: &dyn CommandRunner,
    manager: &str,
    packages: &[&str],
    root: &Path,
) -> Result<()> {
    let mut args: Vec<&str> = add_dev_args(manager).to_vec();
    args.extend_from_slice(packages);

    let output = runner
        .run_interactive(manager, &args, root)
        .with_context(|| format!("Failed to run `{manager} {}`", args.join(" ")))?;

    if !output.success {
        bail!(output.failure(&format!("{manager} failed to add {}", packages.join(", "))));
    }

    Ok(())
}
