//! Template fetch: reachability check, clone, essential-file check.
//!
//! The only step that can end the run. Everything after it edits files it
//! assumes the template shipped, so a broken template is caught here.

use super::{ProjectContext, StepOutcome};
use crate::config::WizardConfig;
use crate::forge::github;
use crate::paths;
use crate::runner::CommandRunner;

pub(super) fn run(
    runner: &dyn CommandRunner,
    config: &WizardConfig,
    ctx: &ProjectContext,
) -> StepOutcome {
    if ctx.root.exists() {
        return StepOutcome::Fatal(format!(
            "Directory {} already exists; pick another project name",
            ctx.root.display()
        ));
    }

    println!("🔍 Checking template {}...", config.template_repo);
    if let Err(e) = github::repo_view(runner, &config.template_repo, &ctx.parent) {
        return StepOutcome::Fatal(format!(
            "Template repository {} is not accessible: {e:#}",
            config.template_repo
        ));
    }

    println!("📥 Cloning template into {}...", ctx.name);
    if let Err(e) = github::repo_clone(runner, &config.template_repo, &ctx.name, &ctx.parent) {
        return StepOutcome::Fatal(format!("Failed to clone template: {e:#}"));
    }

    let missing = missing_essential_files(ctx);
    if !missing.is_empty() {
        return StepOutcome::Fatal(format!("Missing essential files: {}", missing.join(", ")));
    }

    println!("✓ Template cloned into {}", ctx.root.display());
    StepOutcome::Done
}

fn missing_essential_files(ctx: &ProjectContext) -> Vec<&'static str> {
    paths::ESSENTIAL_FILES
        .into_iter()
        .filter(|file| !ctx.root.join(file).is_file())
        .collect()
}
