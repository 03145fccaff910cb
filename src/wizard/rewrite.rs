use super::{ProjectContext, StepOutcome};
use crate::answers::SetupAnswers;
use crate::config::WizardConfig;
use crate::runner::CommandRunner;
use crate::scaffold;

/// Config rewrite. A failure here only skips the rest of this step.
pub(super) fn run(
    runner: &dyn CommandRunner,
    config: &WizardConfig,
    answers: &SetupAnswers,
    ctx: &ProjectContext,
) -> StepOutcome {
    println!("⚙️  Configuring project for {}...", answers.ui_framework);
    match scaffold::rewrite(runner, &config.package_manager, answers, &ctx.root) {
        Ok(report) => {
            tracing::debug!(?report, "rewrite finished");
            StepOutcome::Done
        }
        Err(e) => StepOutcome::Warned(vec![format!("{e:#}")]),
    }
}
