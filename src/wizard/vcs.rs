use super::{ProjectContext, StepOutcome};
use crate::git;
use crate::runner::CommandRunner;

/// Replace the template's history with a fresh repository.
///
/// Removal and init are independent; a failed removal still attempts init.
pub(super) fn run(runner: &dyn CommandRunner, ctx: &ProjectContext) -> StepOutcome {
    println!("🔧 Starting fresh git history...");
    let mut warnings = Vec::new();

    if let Err(e) = git::remove_metadata(&ctx.root) {
        warnings.push(format!("Failed to remove existing repo: {e:#}"));
    }

    match git::init(runner, &ctx.root) {
        Ok(()) => println!("  ✓ Initialized git repository"),
        Err(e) => warnings.push(format!("{e:#}")),
    }

    StepOutcome::from_warnings(warnings)
}
