use super::{ProjectContext, StepOutcome};
use crate::answers::SetupAnswers;
use crate::config::WizardConfig;
use crate::forge::{self, github};
use crate::runner::CommandRunner;

/// Create the GitHub repository and wire it up as `origin`.
pub(super) fn run(
    runner: &dyn CommandRunner,
    config: &WizardConfig,
    answers: &SetupAnswers,
    ctx: &ProjectContext,
) -> StepOutcome {
    let path =
        forge::qualified_repo_path(&answers.project_name, &answers.owner, &config.organization);
    println!(
        "🌐 Creating {} repository {} in {}...",
        answers.visibility(),
        path,
        forge::describe_owner(&answers.owner, &config.organization)
    );

    match github::repo_create(runner, &path, answers.public, &ctx.root) {
        Ok(()) => {
            println!("  ✓ Created {}", path);
            StepOutcome::Done
        }
        Err(e) => StepOutcome::Warned(vec![format!("Failed to create GitHub repository: {e:#}")]),
    }
}
