//! Initial commit and push, editor launch, dependency install.
//!
//! Each sub-step runs regardless of how the previous ones went.

use super::{ProjectContext, StepOutcome};
use crate::answers::SetupAnswers;
use crate::config::WizardConfig;
use crate::git;
use crate::package;
use crate::runner::CommandRunner;

pub(super) fn run(
    runner: &dyn CommandRunner,
    config: &WizardConfig,
    answers: &SetupAnswers,
    ctx: &ProjectContext,
) -> StepOutcome {
    let mut warnings = Vec::new();

    if answers.auto_commit {
        println!("📦 Committing and pushing initial state...");
        if let Err(e) = git::add_all(runner, &ctx.root) {
            warnings.push(format!("{e:#}"));
        }
        if let Err(e) = git::commit(runner, &ctx.root, &config.commit_message) {
            warnings.push(format!("{e:#}"));
        }
        match git::push(runner, &ctx.root, &config.branch) {
            Ok(()) => println!("  ✓ Pushed to origin/{}", config.branch),
            Err(e) => warnings.push(format!("{e:#}")),
        }
    }

    match runner.run_interactive(&config.editor, &["."], &ctx.root) {
        Ok(output) if output.success => println!("📝 Opened {} in {}", ctx.name, config.editor),
        Ok(output) => warnings.push(output.failure(&format!("Could not open {}", config.editor))),
        Err(e) => warnings.push(format!("Could not open {}: {e:#}", config.editor)),
    }

    println!("📦 Installing dependencies...");
    match package::install(runner, &config.package_manager, &ctx.root) {
        Ok(()) => println!("  ✓ Dependencies installed"),
        Err(e) => warnings.push(format!("{e:#}")),
    }

    StepOutcome::from_warnings(warnings)
}
